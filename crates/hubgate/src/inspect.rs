// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hubgate check` and `hubgate services`.

use std::fmt::Write as _;

use hubgate_config::HubgateConfig;
use hubgate_core::{HubgateError, ServiceKind};
use hubgate_registry::{BuiltinCatalog, ServiceLoader};

/// Instantiate every declared service without binding a socket.
///
/// Returns one report line per service. Stops at the first failure, exactly
/// as `serve` would.
pub fn check_services(
    config: &HubgateConfig,
    catalog: BuiltinCatalog,
) -> Result<Vec<String>, HubgateError> {
    let loader = ServiceLoader::new(catalog);
    let mut report = Vec::with_capacity(config.services.len());
    for decl in &config.services {
        let adapter = loader.instantiate(decl)?;
        report.push(format!(
            "ok  {} ({}, adapter `{}`)",
            decl.name,
            decl.kind,
            adapter.name()
        ));
    }
    Ok(report)
}

/// Render the declared services as an aligned table.
pub fn services_table(config: &HubgateConfig) -> String {
    if config.services.is_empty() {
        return "no services declared\n".to_string();
    }

    let width = config
        .services
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:<8}  TARGET", "NAME", "KIND");
    for decl in &config.services {
        let target = match decl.kind {
            ServiceKind::Builtin => decl.endpoint.as_str(),
            ServiceKind::Dynamic => decl.plugin_path().unwrap_or("<missing path>"),
        };
        let _ = writeln!(out, "{:<width$}  {:<8}  {target}", decl.name, decl.kind.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubgate_core::ServiceDeclaration;

    fn config(services: Vec<ServiceDeclaration>) -> HubgateConfig {
        HubgateConfig {
            services,
            ..HubgateConfig::default()
        }
    }

    #[test]
    fn check_reports_each_service() {
        let config = config(vec![ServiceDeclaration::builtin("echo", "")]);
        let report = check_services(&config, hubgate_integrations::builtin_catalog()).unwrap();
        assert_eq!(report, vec!["ok  echo (builtin, adapter `echo`)"]);
    }

    #[test]
    fn check_fails_on_unknown_builtin() {
        let config = config(vec![ServiceDeclaration::builtin("ftp", "")]);
        let err = check_services(&config, hubgate_integrations::builtin_catalog()).unwrap_err();
        assert!(matches!(err, HubgateError::UnknownBuiltinService { .. }));
    }

    #[test]
    fn table_lists_targets() {
        let config = config(vec![
            ServiceDeclaration::builtin("minio", "http://localhost:9000"),
            ServiceDeclaration::dynamic("echo-plugin", "", "/opt/libecho.so"),
        ]);
        let table = services_table(&config);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].contains("builtin") && lines[1].ends_with("http://localhost:9000"));
        assert!(lines[2].contains("dynamic") && lines[2].ends_with("/opt/libecho.so"));
    }

    #[test]
    fn empty_table() {
        assert_eq!(services_table(&HubgateConfig::default()), "no services declared\n");
    }
}
