use std::path::Path;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{
    store::{AppendError, AsyncLineAppender, YielderStores},
    types::block::Block,
};

#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    #[error("Could not append depositer to store for yielder {yielder}: {source}")]
    AppendFailed {
        yielder: String,
        #[source]
        source: AppendError,
    },

    #[error("Could not append block summary to the consolidated log: {0}")]
    SummaryAppendFailed(#[source] AppendError),

    #[error("Could not serialize block summary: {0}")]
    SummarySerializationFailed(#[from] serde_json::Error),

    #[error("Event {index} carries no data fields to read a depositer from")]
    MalformedEvent { index: usize },
}

/// Outcome of one per-event append. The per-block summary line is the JSON
/// array of these, in delivery order, and the same sequence is handed back
/// to the downstream sink.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DepositAppend {
    pub yielder: String,
    pub depositer: String,
}

/// The per-block transform: one depositer line per event into the store
/// keyed by the emitting yielder, then one summary line per block into the
/// consolidated log.
///
/// Appends are requested in delivery order but complete in any order; the
/// summary is only written once every per-event append has landed, so a
/// failed append never leaves a summary behind. Processing is append-only
/// with no dedup - replaying a block appends every line again.
pub struct DepositTransform {
    stores: YielderStores,
    consolidated: AsyncLineAppender,
}

impl DepositTransform {
    pub fn new(yielder_stores_dir: impl AsRef<Path>, consolidated_log: impl AsRef<Path>) -> Self {
        DepositTransform {
            stores: YielderStores::new(yielder_stores_dir.as_ref()),
            consolidated: AsyncLineAppender::new(consolidated_log.as_ref()),
        }
    }

    pub fn from_storage(storage: &crate::manifest::storage::Storage) -> Self {
        DepositTransform::new(storage.yielder_stores_dir(), storage.consolidated_log_path())
    }

    pub async fn process_block(&self, block: Block) -> Result<Vec<DepositAppend>, TransformError> {
        // The upstream filter only forwards deposit events, which always
        // carry the depositer in data[0]. An empty data array means that
        // contract was broken, so bail before any write goes out.
        let mut appends = Vec::with_capacity(block.events.len());
        for (index, event) in block.events.iter().enumerate() {
            let depositer = event
                .event
                .data
                .first()
                .ok_or(TransformError::MalformedEvent { index })?;

            appends.push(DepositAppend {
                yielder: event.event.from_address.clone(),
                depositer: depositer.clone(),
            });
        }

        // Requests go out in delivery order and complete in any order. Each
        // one takes its store's write slot at request time, so lines in a
        // store always land in delivery order.
        let pending: Vec<_> = appends
            .iter()
            .map(|append| self.stores.appender_for(&append.yielder).append(&append.depositer))
            .collect();

        for (result, append) in join_all(pending).await.into_iter().zip(&appends) {
            if let Err(source) = result {
                error!("Depositer append for yielder {} failed: {}", append.yielder, source);
                return Err(TransformError::AppendFailed {
                    yielder: append.yielder.clone(),
                    source,
                });
            }
        }

        let summary = serde_json::to_string(&appends)?;
        self.consolidated
            .append(&summary)
            .await
            .map_err(TransformError::SummaryAppendFailed)?;

        debug!("Appended {} depositers across the block", appends.len());

        Ok(appends)
    }
}
