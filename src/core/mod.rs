pub mod byte_order;
pub mod companion;
pub mod config;
pub mod constants;
pub mod error;
pub mod filename;
pub mod format;
pub mod rollover;
pub mod search;
pub mod store;
