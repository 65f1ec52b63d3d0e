use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use tracing::debug;

use crate::store::line_appender::AsyncLineAppender;

/// The set of per-yielder depositer stores, one file per yielder address
/// under a common directory.
///
/// Appenders are cached so every event for the same yielder, in this block
/// or a later one, shares the appender and with it the write-order
/// turnstile.
pub struct YielderStores {
    dir: PathBuf,
    appenders: Mutex<HashMap<String, Arc<AsyncLineAppender>>>,
}

impl YielderStores {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        YielderStores { dir: dir.into(), appenders: Mutex::new(HashMap::new()) }
    }

    /// Returns the appender for `yielder`, creating it on first use. The
    /// backing file only comes into existence on the first append.
    pub fn appender_for(&self, yielder: &str) -> Arc<AsyncLineAppender> {
        let mut appenders =
            self.appenders.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        Arc::clone(appenders.entry(yielder.to_string()).or_insert_with(|| {
            debug!("Opening depositer store for yielder {}", yielder);
            Arc::new(AsyncLineAppender::new(self.dir.join(format!("{yielder}.txt"))))
        }))
    }
}
