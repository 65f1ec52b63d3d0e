pub mod core;
pub mod storage;
pub mod stream;
pub mod yaml;
