use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "/api/tasks";
pub const DEFAULT_NOTICE_DISMISS_MS: u32 = 3_000;

/// How the list reacts to a local mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Wait for the server, then re-read the whole list.
    #[default]
    FullRefetch,
    /// Patch the local copy first, then re-read to reconcile.
    Optimistic,
}

impl SyncPolicy {
    pub fn as_key(self) -> &'static str {
        match self {
            SyncPolicy::FullRefetch => "full-refetch",
            SyncPolicy::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for SyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for SyncPolicy {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full-refetch" | "full" | "refetch" => Ok(SyncPolicy::FullRefetch),
            "optimistic" => Ok(SyncPolicy::Optimistic),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    /// New tasks are posted with this status. `true` means done, which is
    /// what the API has always been sent.
    pub default_status_on_create: bool,
    pub sync_policy: SyncPolicy,
    pub notice_dismiss_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            default_status_on_create: true,
            sync_policy: SyncPolicy::default(),
            notice_dismiss_ms: DEFAULT_NOTICE_DISMISS_MS,
        }
    }
}

impl ClientConfig {
    #[tracing::instrument(skip(self, overrides))]
    pub fn apply_overrides<I>(&mut self, overrides: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in overrides {
            debug!(key = %key, value = %value, "applying override");
            match key.as_str() {
                "api_base" => {
                    let trimmed = value.trim();
                    if trimmed.is_empty() {
                        return Err(invalid(key, value));
                    }
                    self.api_base = trimmed.to_string();
                }
                "default_status_on_create" => {
                    self.default_status_on_create =
                        parse_bool(&value).ok_or_else(|| invalid(key.clone(), value.clone()))?;
                }
                "sync_policy" => {
                    self.sync_policy = value
                        .parse()
                        .map_err(|()| invalid(key.clone(), value.clone()))?;
                }
                "notice_dismiss_ms" => {
                    self.notice_dismiss_ms = value
                        .trim()
                        .parse()
                        .map_err(|_| invalid(key.clone(), value.clone()))?;
                }
                _ => return Err(ConfigError::UnknownKey(key)),
            }
        }
        Ok(())
    }
}

fn invalid(key: String, value: String) -> ConfigError {
    ConfigError::InvalidValue { key, value }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_match_the_api_contract() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.api_base, "/api/tasks");
        assert!(cfg.default_status_on_create);
        assert_eq!(cfg.sync_policy, SyncPolicy::FullRefetch);
        assert_eq!(cfg.notice_dismiss_ms, DEFAULT_NOTICE_DISMISS_MS);
    }

    #[test]
    fn overrides_apply_in_order() {
        let mut cfg = ClientConfig::default();
        cfg.apply_overrides(pairs(&[
            ("api_base", "http://localhost:3000/api/tasks"),
            ("default_status_on_create", "off"),
            ("sync_policy", "Optimistic"),
            ("notice_dismiss_ms", "1500"),
        ]))
        .expect("apply overrides");

        assert_eq!(cfg.api_base, "http://localhost:3000/api/tasks");
        assert!(!cfg.default_status_on_create);
        assert_eq!(cfg.sync_policy, SyncPolicy::Optimistic);
        assert_eq!(cfg.notice_dismiss_ms, 1500);
    }

    #[test]
    fn bad_override_is_reported() {
        let mut cfg = ClientConfig::default();
        let err = cfg
            .apply_overrides(pairs(&[("default_status_on_create", "maybe")]))
            .expect_err("invalid bool");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = cfg
            .apply_overrides(pairs(&[("theme", "dark")]))
            .expect_err("unknown key");
        assert_eq!(err, ConfigError::UnknownKey("theme".to_string()));
    }
}
