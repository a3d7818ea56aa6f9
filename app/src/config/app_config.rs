//! Runtime application configuration loaded from environment variables.

use std::path::PathBuf;

use qr_engine::CornerStyle;

use super::defaults::get_default;
use super::validation::validate_setting;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub default_size: u32,
    pub default_corner: CornerStyle,
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".into(),
            server_port: 8080,
            default_size: qr_engine::DEFAULT_SIZE,
            default_corner: CornerStyle::Square,
            data_dir: default_data_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Values failing validation are logged and replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> String {
            let fallback = get_default(key).unwrap_or_default();
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => {
                    let v = v.trim().to_string();
                    match validate_setting(key, &v) {
                        Ok(()) => v,
                        Err(e) => {
                            tracing::warn!("Invalid {key}={v:?} ({e}), using default {fallback:?}");
                            fallback.to_string()
                        }
                    }
                }
                _ => fallback.to_string(),
            }
        };

        let data_dir = lookup("QR_STUDIO_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Self {
            server_host: g("SERVER_HOST"),
            server_port: g("SERVER_PORT").parse().unwrap_or(8080),
            default_size: g("DEFAULT_QR_SIZE")
                .parse()
                .unwrap_or(qr_engine::DEFAULT_SIZE),
            default_corner: g("DEFAULT_CORNER_STYLE").parse().unwrap_or_default(),
            data_dir,
        }
    }

    /// `host:port` string the server binds to. IPv6 hosts are bracketed.
    pub fn bind_addr(&self) -> String {
        if self.server_host.contains(':') {
            format!("[{}]:{}", self.server_host, self.server_port)
        } else {
            format!("{}:{}", self.server_host, self.server_port)
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("local.db")
    }
}

/// ~/.qr-studio, or ./.qr-studio when no home directory is known.
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".qr-studio")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.default_size, 256);
        assert_eq!(config.default_corner, CornerStyle::Square);
        assert!(config.data_dir.ends_with(".qr-studio"));
    }

    #[test]
    fn valid_values_override_defaults() {
        let config = config_from(&[
            ("SERVER_PORT", "9000"),
            ("DEFAULT_QR_SIZE", "512"),
            ("DEFAULT_CORNER_STYLE", "rounded"),
            ("QR_STUDIO_DATA_DIR", "/tmp/qr"),
        ]);
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.default_size, 512);
        assert_eq!(config.default_corner, CornerStyle::Rounded);
        assert_eq!(config.db_path(), PathBuf::from("/tmp/qr/local.db"));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = config_from(&[("SERVER_PORT", "nope"), ("DEFAULT_QR_SIZE", "5")]);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.default_size, 256);
    }

    #[test]
    fn bind_addr_brackets_ipv6_hosts() {
        let config = config_from(&[("SERVER_HOST", "localhost")]);
        assert_eq!(config.bind_addr(), "localhost:8080");

        let config = config_from(&[("SERVER_HOST", "::1"), ("SERVER_PORT", "81")]);
        assert_eq!(config.bind_addr(), "[::1]:81");
    }
}
