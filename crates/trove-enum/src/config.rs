use serde::Deserialize;

/// Configuration for an enumeration run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnumerateConfig {
    /// Collapse rolls within the same table band into one weighted item.
    /// Disable for an exact leaf-by-leaf audit.
    pub skip: bool,
    /// Stop after this many distinct items. `None` = run to completion.
    pub limit: Option<u64>,
}

impl Default for EnumerateConfig {
    fn default() -> Self {
        Self {
            skip: true,
            limit: None,
        }
    }
}

impl EnumerateConfig {
    /// Enable or disable band skipping.
    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Stop after `limit` distinct items.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EnumerateConfig::default();
        assert!(config.skip);
        assert_eq!(config.limit, None);
    }

    #[test]
    fn builder_chain() {
        let config = EnumerateConfig::default().with_skip(false).with_limit(50);
        assert!(!config.skip);
        assert_eq!(config.limit, Some(50));
    }

    #[test]
    fn loads_from_json() {
        let config: EnumerateConfig = serde_json::from_str(r#"{"limit": 10}"#).unwrap();
        assert!(config.skip);
        assert_eq!(config.limit, Some(10));
    }
}
