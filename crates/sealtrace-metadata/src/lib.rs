pub mod metadata_log;

pub use metadata_log::{lookup_in, MetadataLog};
