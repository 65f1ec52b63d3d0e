// public
pub mod manifest;
pub mod transform;
pub mod types;

mod store;
pub use store::{AppendError, AsyncLineAppender, YielderStores};

mod logger;
pub use logger::{setup_info_logger, setup_logger};

// export 3rd party dependencies
pub use tokio::main as indexer_main;
pub use tracing::{error as indexer_error, info as indexer_info};
