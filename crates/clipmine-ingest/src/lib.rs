//! Record ingestion for the ClipMine pipeline.
//!
//! Converts the two raw input shapes — chat replay JSON and subtitle JSON —
//! into normalized, time-sorted record tables. Malformed entries are skipped
//! individually; only an unparseable top-level document is an error.
//! Fetching the documents from the video platform is the data-retrieval
//! collaborator's job, not this crate's.

pub mod chat;
pub mod error;
pub mod subtitles;

pub use chat::parse_chat_log;
pub use error::{IngestError, IngestResult};
pub use subtitles::parse_subtitle_document;
