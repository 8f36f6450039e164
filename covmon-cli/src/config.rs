//! YAML configuration loading.

use std::path::Path;

use anyhow::{Context, Result};
use covmon::CovmonConfig;
use serde_yaml::Value;

use crate::crypt::{Crypter, encrypted_payload};

/// Read, decrypt and validate the configuration file at `path`.
pub fn load(path: &Path) -> Result<CovmonConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading configuration {}", path.display()))?;
    parse(&text, Crypter::from_env).with_context(|| format!("loading {}", path.display()))
}

/// Parse YAML text. `crypter` is only invoked when an `ENC(...)` value is present.
pub fn parse<F, E>(text: &str, crypter: F) -> Result<CovmonConfig>
where
    F: FnOnce() -> std::result::Result<Crypter, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut value: Value = serde_yaml::from_str(text).context("invalid YAML")?;
    if contains_encrypted(&value) {
        let mut crypter = crypter().context("configuration holds ENC(...) values")?;
        decrypt_values(&mut value, &mut crypter, "")?;
    }
    let config: CovmonConfig = serde_yaml::from_value(value).context("invalid configuration")?;
    config.validate()?;
    Ok(config)
}

fn contains_encrypted(value: &Value) -> bool {
    match value {
        Value::String(s) => encrypted_payload(s).is_some(),
        Value::Sequence(items) => items.iter().any(contains_encrypted),
        Value::Mapping(map) => map.values().any(contains_encrypted),
        Value::Tagged(t) => contains_encrypted(&t.value),
        _ => false,
    }
}

fn decrypt_values(value: &mut Value, crypter: &mut Crypter, at: &str) -> Result<()> {
    match value {
        Value::String(s) => {
            if let Some(payload) = encrypted_payload(s) {
                let plain = crypter
                    .decrypt(payload)
                    .with_context(|| format!("decrypting {at}"))?;
                *s = plain;
            }
        }
        Value::Sequence(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                decrypt_values(item, crypter, &format!("{at}[{i}]"))?;
            }
        }
        Value::Mapping(map) => {
            for (k, v) in map.iter_mut() {
                let key = k.as_str().unwrap_or("?");
                let path = if at.is_empty() {
                    key.to_string()
                } else {
                    format!("{at}.{key}")
                };
                decrypt_values(v, crypter, &path)?;
            }
        }
        Value::Tagged(t) => decrypt_values(&mut t.value, crypter, at)?,
        _ => {}
    }
    Ok(())
}
