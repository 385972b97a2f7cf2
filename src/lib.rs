// Navigation-class sensor file reader
// Headerless fixed-record files with GPS seconds-of-week timestamps

pub mod core;

// Re-export main types
pub use core::byte_order::ByteOrderCodec;
pub use core::companion::{CompanionKind, CompanionResolver};
pub use core::config::StoreConfig;
pub use core::error::{NavError, Result};
pub use core::filename::FileStamp;
pub use core::format::{FileTimeDomain, NavigationRecord, PrecisionRecord, RawSample, RecordKind};
pub use core::search::SearchResult;
pub use core::store::{write_record, RecordStore};

#[cfg(test)]
mod tests {
    #[test]
    fn test_constants() {
        use crate::core::constants::*;
        assert_eq!(WEEK_SECONDS, 604_800.0);
        assert_eq!(NAVIGATION_RECORD_SIZE, 136);
        assert_eq!(PRECISION_RECORD_SIZE, 80);
    }
}
