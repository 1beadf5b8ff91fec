//! Provider configuration
//!
//! `server_url`, `api_token` and `insecure` come from the provider block and
//! fall back to `NETBOX_SERVER_URL`, `NETBOX_API_TOKEN` and `NETBOX_INSECURE`.

use crate::framework::{Attr, Diagnostics};
use serde::Deserialize;
use std::fmt;

/// Server URL variable
pub const ENV_SERVER_URL: &str = "NETBOX_SERVER_URL";
/// API token variable
pub const ENV_API_TOKEN: &str = "NETBOX_API_TOKEN";
/// Skip TLS verification when set to `true`
pub const ENV_INSECURE: &str = "NETBOX_INSECURE";

/// The provider block as configured
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfigModel {
    pub server_url: Attr<String>,
    pub api_token: Attr<String>,
    pub insecure: Attr<bool>,
}

/// Resolved connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// NetBox base URL
    pub server_url: String,
    /// API token
    pub api_token: String,
    /// Skip TLS certificate verification
    pub insecure: bool,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("server_url", &self.server_url)
            .field("api_token", &mask_token(&self.api_token))
            .field("insecure", &self.insecure)
            .finish()
    }
}

/// First and last four characters of a token, for logs
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn unknown_error(diags: &mut Diagnostics, attribute: &str, what: &str, variable: &str) {
    diags.add_attribute_error(
        attribute,
        format!("Unknown Netbox {}", what),
        format!(
            "The provider cannot create the Netbox API client as there is an unknown configuration \
             value for the Netbox {}. Either set the value statically in the configuration, or use \
             the {} environment variable.",
            what, variable
        ),
    );
}

impl ProviderConfig {
    /// Resolve with `env` looking up variables. Configured values win over
    /// the environment; an empty string counts as unset.
    pub fn resolve(
        model: &ProviderConfigModel,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Diagnostics> {
        let mut diags = Diagnostics::new();
        if model.server_url.is_unknown() {
            unknown_error(&mut diags, "server_url", "Server URL", ENV_SERVER_URL);
        }
        if model.api_token.is_unknown() {
            unknown_error(&mut diags, "api_token", "API Token", ENV_API_TOKEN);
        }
        if diags.has_error() {
            return Err(diags);
        }

        let pick = |attr: &Attr<String>, variable: &str| {
            attr.as_str()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .or_else(|| env(variable).filter(|s| !s.is_empty()))
        };
        let server_url = pick(&model.server_url, ENV_SERVER_URL);
        let api_token = pick(&model.api_token, ENV_API_TOKEN);
        let insecure = match model.insecure.value() {
            Some(insecure) => *insecure,
            None => env(ENV_INSECURE).is_some_and(|v| v == "true"),
        };

        if server_url.is_none() {
            diags.add_attribute_error(
                "server_url",
                "Missing Netbox Server URL",
                format!(
                    "The provider cannot create the Netbox API client as there is a missing or empty \
                     value for the Netbox server URL. Set the server_url value in the configuration or \
                     use the {} environment variable.",
                    ENV_SERVER_URL
                ),
            );
        }
        if api_token.is_none() {
            diags.add_attribute_error(
                "api_token",
                "Missing Netbox API Token",
                format!(
                    "The provider cannot create the Netbox API client as there is a missing or empty \
                     value for the Netbox API token. Set the api_token value in the configuration or \
                     use the {} environment variable.",
                    ENV_API_TOKEN
                ),
            );
        }

        match (server_url, api_token) {
            (Some(server_url), Some(api_token)) => Ok(Self {
                server_url: server_url.trim_end_matches('/').to_string(),
                api_token,
                insecure,
            }),
            _ => Err(diags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn model(url: Attr<String>, token: Attr<String>) -> ProviderConfigModel {
        ProviderConfigModel {
            server_url: url,
            api_token: token,
            insecure: Attr::Null,
        }
    }

    #[test]
    fn environment_fills_gaps() {
        let config = ProviderConfig::resolve(
            &ProviderConfigModel::default(),
            env(&[
                (ENV_SERVER_URL, "https://netbox.example.com/"),
                (ENV_API_TOKEN, "0123456789abcdef"),
                (ENV_INSECURE, "true"),
            ]),
        )
        .unwrap();
        assert_eq!(config.server_url, "https://netbox.example.com");
        assert_eq!(config.api_token, "0123456789abcdef");
        assert!(config.insecure);
    }

    #[test]
    fn configuration_overrides_environment() {
        let config = ProviderConfig::resolve(
            &ProviderConfigModel {
                server_url: Attr::Value("https://config.example.com".to_string()),
                api_token: Attr::Value("config-token-value".to_string()),
                insecure: Attr::Value(false),
            },
            env(&[
                (ENV_SERVER_URL, "https://env.example.com"),
                (ENV_API_TOKEN, "env-token"),
                (ENV_INSECURE, "true"),
            ]),
        )
        .unwrap();
        assert_eq!(config.server_url, "https://config.example.com");
        assert_eq!(config.api_token, "config-token-value");
        assert!(!config.insecure);
    }

    #[test]
    fn insecure_only_for_literal_true() {
        let config = ProviderConfig::resolve(
            &model(Attr::Value("https://n".to_string()), Attr::Value("t".to_string())),
            env(&[(ENV_INSECURE, "1")]),
        )
        .unwrap();
        assert!(!config.insecure);
    }

    #[test]
    fn missing_values_are_attribute_errors() {
        let diags = ProviderConfig::resolve(&model(Attr::Value(String::new()), Attr::Null), env(&[]))
            .unwrap_err();
        let found: Vec<_> = diags
            .iter()
            .map(|d| (d.attribute.as_deref(), d.summary.as_str()))
            .collect();
        assert_eq!(
            found,
            [
                (Some("server_url"), "Missing Netbox Server URL"),
                (Some("api_token"), "Missing Netbox API Token"),
            ]
        );
    }

    #[test]
    fn unknown_values_are_rejected() {
        let diags = ProviderConfig::resolve(&model(Attr::Unknown, Attr::Value("t".to_string())), env(&[]))
            .unwrap_err();
        assert_eq!(diags.iter().next().unwrap().summary, "Unknown Netbox Server URL");
    }

    #[test]
    fn token_is_masked() {
        assert_eq!(mask_token("0123456789abcdef"), "0123...cdef");
        assert_eq!(mask_token("short"), "*****");
        let config = ProviderConfig {
            server_url: "https://n".to_string(),
            api_token: "0123456789abcdef".to_string(),
            insecure: false,
        };
        assert!(!format!("{:?}", config).contains("456789ab"));
    }
}
