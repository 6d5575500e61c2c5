//! Server configuration.
//!
//! Loaded from a TOML file with `CAPSCOPE__`-prefixed environment variable
//! overrides (for example `CAPSCOPE__SERVER__PORT=9090`). The `[[seed.*]]`
//! tables provision the in-memory backend at startup: capabilities, groups,
//! users, and application registrations.

use capscope_auth::AuthConfig;
use serde::{Deserialize, Serialize};

/// Root server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub seed: SeedConfig,
}

impl ServerConfig {
    /// Validates cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        for app in &self.seed.applications {
            if app.client_id.is_empty() {
                return Err("seed.applications entries need a client_id".to_string());
            }
        }
        for capability in &self.seed.capabilities {
            if capability.name.is_empty() {
                return Err("seed.capabilities entries need a name".to_string());
            }
        }
        Ok(())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directive, e.g. "info" or "capscope_auth=debug".
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// =============================================================================
// Seed data
// =============================================================================

/// Records provisioned into the in-memory backend at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub groups: Vec<GroupSeed>,
    pub capabilities: Vec<CapabilitySeed>,
    pub users: Vec<UserSeed>,
    pub applications: Vec<ApplicationSeed>,
}

/// A group to provision. Referenced from capabilities and users by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSeed {
    pub name: String,
}

/// A capability to provision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitySeed {
    pub name: String,

    /// Granted to every application without explicit assignment.
    pub default: bool,

    pub rules: Vec<RuleSeed>,

    /// Names of groups whose members are granted this capability.
    pub groups: Vec<String>,
}

impl Default for CapabilitySeed {
    fn default() -> Self {
        Self {
            name: String::new(),
            default: false,
            rules: Vec::new(),
            groups: Vec::new(),
        }
    }
}

/// A single protected-resource rule on a seeded capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSeed {
    pub method: String,
    pub path_pattern: String,
}

/// A user account to provision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSeed {
    pub username: String,
    pub organization: Option<String>,
    pub groups: Vec<String>,
}

impl Default for UserSeed {
    fn default() -> Self {
        Self {
            username: String::new(),
            organization: None,
            groups: Vec::new(),
        }
    }
}

/// An application registration to provision.
///
/// `client_secret` is taken in plain text and hashed at startup; prefer
/// supplying it through `CAPSCOPE__`-prefixed environment overrides rather
/// than committing it to the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationSeed {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub name: String,
    pub grant_type: capscope_auth::GrantType,
    pub redirect_uris: Vec<String>,

    /// Owning username; must match a seeded user.
    pub owner: Option<String>,

    /// Names of capabilities assigned to this application.
    pub capabilities: Vec<String>,

    pub logo_uri: String,
    pub tos_uri: String,
    pub policy_uri: String,
    pub contacts: String,
}

impl Default for ApplicationSeed {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: None,
            name: String::new(),
            grant_type: capscope_auth::GrantType::AuthorizationCode,
            redirect_uris: Vec::new(),
            owner: None,
            capabilities: Vec::new(),
            logo_uri: String::new(),
            tos_uri: String::new(),
            policy_uri: String::new(),
            contacts: String::new(),
        }
    }
}

pub mod loader {
    use super::ServerConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub fn load_config(path: Option<&str>) -> Result<ServerConfig, String> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if pathbuf.exists() {
                    builder = builder.add_source(File::from(pathbuf));
                }
            }
            None => {
                let default_path = PathBuf::from("capscope.toml");
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g. CAPSCOPE__SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("CAPSCOPE")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: ServerConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.seed.capabilities.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_seed_toml() {
        let toml = r#"
            [server]
            port = 9090

            [[seed.capabilities]]
            name = "token_management"

            [[seed.capabilities.rules]]
            method = "GET"
            path_pattern = "/v1/o/tokens/"

            [[seed.users]]
            username = "anna"

            [[seed.applications]]
            client_id = "app-one"
            client_secret = "s3cret"
            name = "App One"
            redirect_uris = ["https://app.example.com/cb"]
            capabilities = ["token_management"]
        "#;
        let config: ServerConfig = toml::from_str(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.seed.capabilities[0].rules[0].method, "GET");
        assert_eq!(config.seed.applications[0].capabilities.len(), 1);
    }

    #[test]
    fn test_validate_rejects_nameless_capability() {
        let mut config = ServerConfig::default();
        config.seed.capabilities.push(CapabilitySeed::default());
        assert!(config.validate().is_err());
    }
}
