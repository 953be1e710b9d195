use crate::model::DEFAULT_FREE_TEXT_MAX_LENGTH;

pub const DEFAULT_PAGE_LIMIT: u64 = 100;
pub const MAX_PAGE_LIMIT: u64 = 1000;

pub const ENV_FREE_TEXT_MAX_LENGTH: &str = "REACTIONS_DEFAULT_FREE_TEXT_MAX_LENGTH";
pub const ENV_DEFAULT_PAGE_LIMIT: &str = "REACTIONS_DEFAULT_PAGE_LIMIT";
pub const ENV_MAX_PAGE_LIMIT: &str = "REACTIONS_MAX_PAGE_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeeperConfig {
    /// Free-text length limit written into the params of newly created subspaces.
    pub default_free_text_max_length: u32,
    /// Page size used when a query leaves `limit` at zero.
    pub default_page_limit: u64,
    /// Upper bound applied to every requested page size.
    pub max_page_limit: u64,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            default_free_text_max_length: DEFAULT_FREE_TEXT_MAX_LENGTH,
            default_page_limit: DEFAULT_PAGE_LIMIT,
            max_page_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl KeeperConfig {
    /// Build from process environment; unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |name: &str| {
            let raw = lookup(name)?;
            match raw.trim().parse::<u64>() {
                Ok(value) if value > 0 => Some(value),
                _ => {
                    log::warn!("ignoring invalid {name}={raw:?}");
                    None
                }
            }
        };

        let default_free_text_max_length = read(ENV_FREE_TEXT_MAX_LENGTH)
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or(defaults.default_free_text_max_length);
        let max_page_limit = read(ENV_MAX_PAGE_LIMIT).unwrap_or(defaults.max_page_limit);
        let default_page_limit = read(ENV_DEFAULT_PAGE_LIMIT)
            .unwrap_or(defaults.default_page_limit)
            .min(max_page_limit);

        Self {
            default_free_text_max_length,
            default_page_limit,
            max_page_limit,
        }
    }

    /// Resolve a requested page size: zero means the default, anything else is capped.
    pub fn page_limit(&self, requested: u64) -> u64 {
        if requested == 0 {
            self.default_page_limit
        } else {
            requested.min(self.max_page_limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let cfg = KeeperConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, KeeperConfig::default());
        assert_eq!(cfg.default_free_text_max_length, 2);
        assert_eq!(cfg.default_page_limit, 100);
        assert_eq!(cfg.max_page_limit, 1000);
    }

    #[test]
    fn overrides_are_applied_and_invalid_values_ignored() {
        let cfg = KeeperConfig::from_lookup(lookup(&[
            (ENV_FREE_TEXT_MAX_LENGTH, "5"),
            (ENV_DEFAULT_PAGE_LIMIT, "not-a-number"),
            (ENV_MAX_PAGE_LIMIT, "50"),
        ]));
        assert_eq!(cfg.default_free_text_max_length, 5);
        assert_eq!(cfg.max_page_limit, 50);
        // default limit is clamped under the configured maximum
        assert_eq!(cfg.default_page_limit, 50);
    }

    #[test]
    fn page_limit_resolution() {
        let cfg = KeeperConfig::default();
        assert_eq!(cfg.page_limit(0), 100);
        assert_eq!(cfg.page_limit(10), 10);
        assert_eq!(cfg.page_limit(5000), 1000);
    }
}
