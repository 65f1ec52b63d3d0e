use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::manifest::{
    storage::Storage,
    stream::{Filter, StreamDetails},
};

fn default_network() -> String {
    "starknet".to_string()
}

fn default_storage() -> Storage {
    Storage::default()
}

/// Known event selectors, kept as configuration so new farms can label
/// their events without a code change. Unused by the transform itself.
fn default_event_labels() -> HashMap<String, String> {
    HashMap::from([
        (
            "0x034e55c1cd55f1338241b50d352f0e91c7e4ffad0e4271d64eb347589ebdfd16".to_string(),
            "mint".to_string(),
        ),
        (
            "0x0099cd8bde557814842a3121e8ddfd433a539b8c9f14bf31ebf108d12e6196e9".to_string(),
            "transfer".to_string(),
        ),
    ])
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkType {
    #[default]
    Console,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Manifest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default = "default_network")]
    pub network: String,

    pub stream: StreamDetails,

    #[serde(default)]
    pub filter: Filter,

    #[serde(default)]
    pub sink_type: SinkType,

    #[serde(default = "default_storage")]
    pub storage: Storage,

    #[serde(default = "default_event_labels")]
    pub labels: HashMap<String, String>,
}
