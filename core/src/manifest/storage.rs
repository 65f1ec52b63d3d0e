use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_yielder_stores_path() -> String {
    "./yielder_depositers".to_string()
}

fn default_consolidated_log() -> String {
    "./message.txt".to_string()
}

/// Where the transform writes: the directory holding one depositer store per
/// yielder, and the consolidated per-block summary log next to it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Storage {
    #[serde(default = "default_yielder_stores_path")]
    pub yielder_stores_path: String,

    #[serde(default = "default_consolidated_log")]
    pub consolidated_log: String,
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            yielder_stores_path: default_yielder_stores_path(),
            consolidated_log: default_consolidated_log(),
        }
    }
}

impl Storage {
    pub fn yielder_stores_dir(&self) -> PathBuf {
        PathBuf::from(&self.yielder_stores_path)
    }

    pub fn consolidated_log_path(&self) -> PathBuf {
        PathBuf::from(&self.consolidated_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_paths_have_defaults() {
        let storage: Storage = serde_yaml::from_str("{}").unwrap();

        assert_eq!(storage.yielder_stores_path, "./yielder_depositers");
        assert_eq!(storage.consolidated_log, "./message.txt");
    }
}
