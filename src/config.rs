//! Hierarchy configuration

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::memory::cache::CachePolicy;

/// Sizes of every level, fixed for the lifetime of a run
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    pub l1: CachePolicy,
    pub l2: CachePolicy,
    pub scratchpad_capacity_bytes: u64,
    pub global_capacity_bytes: u64,
    pub line_store: LineStoreKind,
}

impl Default for HierarchyConfig {
    /// 32KB L1, 2MB L2, 128KB scratchpad and 8GB of global memory
    fn default() -> Self {
        Self {
            l1: CachePolicy::l1(),
            l2: CachePolicy::l2(),
            scratchpad_capacity_bytes: 128 * 1024,
            global_capacity_bytes: 8 * 1024 * 1024 * 1024,
            line_store: LineStoreKind::default(),
        }
    }
}

impl HierarchyConfig {
    /// Load a JSON configuration file.
    /// Missing fields take their default values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(path.into(), e.to_string()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ConfigError::LoadError(path.into(), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.l1.validate("L1")?;
        self.l2.validate("L2")?;
        if self.scratchpad_capacity_bytes == 0 {
            return Err(ConfigError::ZeroCapacity("Scratchpad"));
        }
        if self.global_capacity_bytes == 0 {
            return Err(ConfigError::ZeroCapacity("Global memory"));
        }
        Ok(())
    }
}

/// How a cache keeps its resident lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStoreKind {
    /// Recency index, logarithmic eviction
    #[default]
    Ordered,
    /// Insertion-ordered map with a linear eviction scan
    Scan,
}

impl FromStr for LineStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ordered" => Ok(LineStoreKind::Ordered),
            "scan" => Ok(LineStoreKind::Scan),
            _ => Err(format!(
                "Invalid line store: '{}'. Expected 'ordered' or 'scan'.",
                s
            )),
        }
    }
}

impl fmt::Display for LineStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStoreKind::Ordered => f.write_str("ordered"),
            LineStoreKind::Scan => f.write_str("scan"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HierarchyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.l1, CachePolicy::make(32768, 64));
        assert_eq!(config.l2, CachePolicy::make(2097152, 64));
        assert_eq!(config.scratchpad_capacity_bytes, 131072);
        assert_eq!(config.global_capacity_bytes, 8589934592);
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut config = HierarchyConfig::default();
        config.scratchpad_capacity_bytes = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroCapacity("Scratchpad"))
        );

        let mut config = HierarchyConfig::default();
        config.l2.line_size_bytes = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroLineSize("L2")));
    }

    #[test]
    fn test_partial_json() {
        let config: HierarchyConfig = serde_json::from_str(
            r#"{ "l1": { "capacity_bytes": 4096, "line_size_bytes": 32 },
                 "line_store": "scan" }"#,
        )
        .unwrap();
        assert_eq!(config.l1, CachePolicy::make(4096, 32));
        assert_eq!(config.l2, CachePolicy::l2());
        assert_eq!(config.line_store, LineStoreKind::Scan);
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir()
            .join(format!("memsim_config_{}.json", std::process::id()));
        let config = HierarchyConfig {
            scratchpad_capacity_bytes: 1024,
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string(&config).unwrap())
            .unwrap();
        let loaded = HierarchyConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);

        let missing = std::env::temp_dir().join("memsim_missing_config.json");
        assert!(matches!(
            HierarchyConfig::load(&missing),
            Err(ConfigError::LoadError(..))
        ));
    }

    #[test]
    fn test_line_store_kind() {
        assert_eq!("SCAN".parse::<LineStoreKind>(), Ok(LineStoreKind::Scan));
        assert_eq!(
            "ordered".parse::<LineStoreKind>(),
            Ok(LineStoreKind::Ordered)
        );
        assert!("lru".parse::<LineStoreKind>().is_err());
    }
}
