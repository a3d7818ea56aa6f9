//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

const DEFS: &[(&str, &str, &str)] = &[
    ("SERVER_HOST", "127.0.0.1", "Interface the web server binds to"),
    ("SERVER_PORT", "8080", "Port the web server listens on"),
    ("DEFAULT_QR_SIZE", "256", "QR edge length in pixels when none is given"),
    ("DEFAULT_CORNER_STYLE", "square", "Corner style when none is given (square/rounded)"),
];

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}
