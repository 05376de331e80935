use std::sync::PoisonError;

use robson_core::Settings;
use serde_json::Value;
use tower_lsp::lsp_types::{ConfigurationItem, Url};
use tracing::{debug, warn};

use super::state::RobsonLanguageServer;
use super::CONFIG_SECTION;

/// Parses the `RobsonAnalyzer` section; an absent section means defaults.
pub(crate) fn parse_settings(value: Value) -> anyhow::Result<Settings> {
    if value.is_null() {
        return Ok(Settings::default());
    }
    Settings::from_json(value)
}

impl RobsonLanguageServer {
    /// Settings for `uri`: fetched from the client and cached when it supports
    /// `workspace/configuration`, else the global settings.
    pub(crate) async fn document_settings(&self, uri: &Url) -> Settings {
        if !self.flags().configuration {
            return self.global_settings();
        }
        if let Some(cached) = self.settings_cache.get(uri) {
            return cached.clone();
        }

        let items = vec![ConfigurationItem {
            scope_uri: Some(uri.clone()),
            section: Some(CONFIG_SECTION.to_string()),
        }];
        let fetched = match self.client.configuration(items).await {
            Ok(values) => parse_settings(values.into_iter().next().unwrap_or(Value::Null)),
            Err(err) => Err(anyhow::anyhow!("configuration request failed: {err}")),
        };
        match fetched {
            Ok(settings) => {
                debug!(%uri, max_problems = settings.max_number_of_problems, "fetched document settings");
                self.settings_cache.insert(uri.clone(), settings.clone());
                settings
            }
            Err(err) => {
                warn!(%uri, "falling back to global settings: {err:#}");
                self.global_settings()
            }
        }
    }

    pub(crate) fn global_settings(&self) -> Settings {
        self.global_settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the global settings from a `didChangeConfiguration` payload.
    pub(crate) fn update_global_settings(&self, payload: &Value) {
        let section = payload.get(CONFIG_SECTION).cloned().unwrap_or(Value::Null);
        let settings = parse_settings(section).unwrap_or_else(|err| {
            warn!("ignoring invalid {CONFIG_SECTION} settings: {err:#}");
            Settings::default()
        });
        *self.global_settings.write().unwrap_or_else(PoisonError::into_inner) = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robson_core::InstructionSet;

    #[test]
    fn test_null_section_uses_defaults() {
        assert_eq!(parse_settings(Value::Null).unwrap(), Settings::default());
    }

    #[test]
    fn test_section_fields() {
        let settings = parse_settings(serde_json::json!({
            "maxNumberOfProblems": 3,
            "instructionSet": "extended"
        }))
        .unwrap();
        assert_eq!(settings.max_number_of_problems, 3);
        assert_eq!(settings.instruction_set, InstructionSet::Extended);
    }

    #[test]
    fn test_invalid_section_is_an_error() {
        assert!(parse_settings(serde_json::json!({ "maxNumberOfProblems": "many" })).is_err());
    }
}
