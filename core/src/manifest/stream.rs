use serde::{Deserialize, Serialize};

use crate::types::block::StreamStatus;

fn default_finality() -> StreamStatus {
    StreamStatus::Accepted
}

/// Connection details for the upstream block stream. The stream service is
/// an external collaborator, this is carried as configuration only.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StreamDetails {
    pub url: String,

    pub starting_block: u64,

    #[serde(default = "default_finality")]
    pub finality: StreamStatus,
}

/// One upstream address/key filter entry. Filtering happens in the stream
/// service before blocks are delivered, never in the transform.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EventFilter {
    pub from_address: String,

    pub keys: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Filter {
    #[serde(default)]
    pub events: Vec<EventFilter>,
}
