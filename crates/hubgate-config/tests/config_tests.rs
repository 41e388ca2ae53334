// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Hubgate configuration system.

use std::io::Write;

use hubgate_config::diagnostic::{ConfigError, suggest_key};
use hubgate_config::model::HubgateConfig;
use hubgate_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use hubgate_core::ServiceKind;

/// A full config with every known field deserializes successfully.
#[test]
fn valid_toml_deserializes_into_hubgate_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 9090
log_level = "debug"
max_body_bytes = 1048576
adapter_timeout_secs = 20
shutdown_grace_secs = 5
cors_permissive = false
metrics_enabled = false

[[services]]
name = "minio"
kind = "builtin"
endpoint = "http://localhost:9000"

[[services]]
name = "ext"
kind = "dynamic"
url = "http://ext.internal"
options = { path = "/opt/hubgate/libext.so", region = "eu" }
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.bind_address(), "0.0.0.0:9090");
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.server.max_body_bytes, 1_048_576);
    assert_eq!(config.server.adapter_timeout_secs, Some(20));
    assert_eq!(config.server.shutdown_grace_secs, 5);
    assert!(!config.server.cors_permissive);
    assert!(!config.server.metrics_enabled);

    assert_eq!(config.services.len(), 2);
    assert_eq!(config.services[0].name, "minio");
    assert_eq!(config.services[0].kind, ServiceKind::Builtin);
    assert_eq!(config.services[1].kind, ServiceKind::Dynamic);
    assert_eq!(config.services[1].endpoint, "http://ext.internal");
    assert_eq!(
        config.services[1].plugin_path(),
        Some("/opt/hubgate/libext.so")
    );
    assert_eq!(config.services[1].option("region"), Some("eu"));
}

/// Declaration order of services is preserved.
#[test]
fn services_keep_declaration_order() {
    let toml = r#"
[[services]]
name = "zeta"
kind = "builtin"

[[services]]
name = "alpha"
kind = "builtin"
"#;
    let config = load_config_from_str(toml).unwrap();
    let names: Vec<&str> = config.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
}

/// An empty document yields the compiled defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.max_body_bytes, 10 * 1024 * 1024);
    assert!(config.server.adapter_timeout_secs.is_none());
    assert!(config.server.cors_permissive);
    assert!(config.services.is_empty());
}

/// Serialized defaults round through JSON without losing the server section.
#[test]
fn serialized_defaults_are_sensible() {
    let json = serde_json::to_value(HubgateConfig::default()).unwrap();
    assert_eq!(json["server"]["port"], 8080);
    assert_eq!(json["server"]["log_level"], "info");
    assert!(json["services"].as_array().unwrap().is_empty());
}

/// Unknown key in [server] produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_server_key_suggests_correction() {
    let toml = r#"
[server]
prot = 8080
"#;

    let errors = load_and_validate_str(toml).expect_err("typo should fail");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "prot" && suggestion.as_deref() == Some("port")
        )
    });
    assert!(found, "expected UnknownKey for `prot`, got: {errors:?}");
}

/// Unknown key inside a [[services]] entry is rejected too.
#[test]
fn unknown_service_key_is_rejected() {
    let toml = r#"
[[services]]
name = "minio"
kind = "builtin"
endpont = "http://localhost:9000"
"#;

    let errors = load_and_validate_str(toml).expect_err("typo should fail");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "endpont" && suggestion.as_deref() == Some("endpoint")
        )
    });
    assert!(found, "expected UnknownKey for `endpont`, got: {errors:?}");
}

/// Unknown top-level sections are rejected.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[plugins]
dir = "/opt"
"#;
    let errors = load_and_validate_str(toml).expect_err("unknown section should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "plugins"))
    );
}

/// A service kind outside builtin/dynamic fails to load.
#[test]
fn unknown_service_kind_is_rejected() {
    let toml = r#"
[[services]]
name = "x"
kind = "plugin"
"#;
    let errors = load_and_validate_str(toml).expect_err("bad kind should fail");
    assert!(
        errors.iter().any(|e| e.to_string().contains("plugin")),
        "error should name the bad value, got: {errors:?}"
    );
}

/// A service entry without a kind reports the missing key.
#[test]
fn missing_service_kind_is_reported() {
    let toml = r#"
[[services]]
name = "x"
"#;
    let errors = load_and_validate_str(toml).expect_err("missing kind should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key.ends_with("kind"))),
        "got: {errors:?}"
    );
}

/// Wrong value types are reported as InvalidType.
#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[server]
port = "eighty"
"#;
    let errors = load_and_validate_str(toml).expect_err("string port should fail");
    let at = errors.iter().find_map(|e| match e {
        ConfigError::InvalidType { key, at, .. } if key.ends_with("port") => Some(*at),
        _ => None,
    });
    let span = at.flatten().expect("invalid type should point into the source");
    assert_eq!(&toml[span.offset()..span.offset() + span.len()], "port");
}

/// Duplicate service names are refused before anything loads.
#[test]
fn duplicate_service_names_fail_validation() {
    let toml = r#"
[[services]]
name = "minio"
kind = "builtin"

[[services]]
name = "minio"
kind = "builtin"
endpoint = "http://other:9000"
"#;
    let errors = load_and_validate_str(toml).expect_err("duplicates should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate"))
    ));
}

/// Dynamic services must name their library.
#[test]
fn dynamic_service_requires_path() {
    let toml = r#"
[[services]]
name = "ext"
kind = "dynamic"
"#;
    let errors = load_and_validate_str(toml).expect_err("missing path should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("options.path"))
    ));
}

/// Every validation failure is reported at once.
#[test]
fn validation_collects_all_errors() {
    let toml = r#"
[server]
log_level = "loud"
max_body_bytes = 0

[[services]]
name = "a/b"
kind = "builtin"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert_eq!(errors.len(), 3, "got: {errors:?}");
}

/// load_and_validate_str with a valid document returns the config.
#[test]
fn load_and_validate_valid_toml() {
    let toml = r#"
[server]
port = 7000

[[services]]
name = "echo"
kind = "builtin"
"#;
    let config = load_and_validate_str(toml).expect("valid TOML should validate");
    assert_eq!(config.server.port, 7000);
    assert_eq!(config.services[0].name, "echo");
}

/// An explicit config file is read from disk.
#[test]
fn load_and_validate_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[server]\nport = 7100\n\n[[services]]\nname = \"repocate\"\nkind = \"builtin\"\nendpoint = \"http://localhost:4000\""
    )
    .unwrap();

    let config = load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.server.port, 7100);
    assert_eq!(config.services[0].endpoint, "http://localhost:4000");
}

/// A typo in an explicit file carries a source span into that file.
#[test]
fn load_and_validate_path_points_at_typo() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nhots = \"0.0.0.0\"").unwrap();

    let errors = load_and_validate_path(file.path()).expect_err("typo should fail");
    let span = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey { key, at, .. } if key == "hots" => Some(*at),
        _ => None,
    });
    assert!(matches!(span, Some(Some(_))), "got: {errors:?}");
}

/// A missing explicit file is an error, not silently skipped.
#[test]
fn load_and_validate_path_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let errors = load_and_validate_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(errors[0].to_string().contains("does not exist"));
}

#[test]
fn suggestions_cover_server_keys() {
    let valid = &["host", "port", "log_level", "max_body_bytes"];
    assert_eq!(suggest_key("log_lvel", valid), Some("log_level".to_string()));
    assert_eq!(suggest_key("zzzzzz", valid), None);
}

/// ConfigError implements miette::Diagnostic and renders.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "prot".to_string(),
        suggestion: Some("port".to_string()),
        valid_keys: "host, port".to_string(),
        at: None,
        source_code: None,
    };

    assert_eq!(
        error.code().unwrap().to_string(),
        "hubgate::config::unknown_key"
    );
    assert!(error.help().unwrap().to_string().contains("did you mean `port`"));

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("prot"));
}
