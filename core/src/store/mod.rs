mod line_appender;
pub use line_appender::{AppendError, AsyncLineAppender};

mod yielder;
pub use yielder::YielderStores;
