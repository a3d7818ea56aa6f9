//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

use qr_engine::{CornerStyle, MAX_SIZE, MIN_SIZE};

static RE_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(localhost|(\d{1,3}\.){3}\d{1,3}|[0-9A-Fa-f:]+|[A-Za-z0-9][A-Za-z0-9.\-]*)$")
        .unwrap()
});

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "SERVER_HOST" => {
            if !RE_HOST.is_match(value) {
                return Err("must be a hostname or IP address".into());
            }
        }
        "SERVER_PORT" => validate_int_range(value, 1, 65535)?,
        "DEFAULT_QR_SIZE" => validate_int_range(value, i64::from(MIN_SIZE), i64::from(MAX_SIZE))?,
        "DEFAULT_CORNER_STYLE" => {
            value
                .parse::<CornerStyle>()
                .map_err(|_| "must be 'square' or 'rounded'")?;
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
