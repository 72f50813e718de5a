//! Batch listing and label export domain.
//!
//! This crate contains the rules for listing stock batches and exporting
//! their labels, implemented purely as deterministic logic (no IO, no HTTP,
//! no storage). The client crate wires these to the network and to navigable
//! URL state.

pub mod batch;
pub mod download;
pub mod export;
pub mod query;

pub use batch::{BatchKind, BatchSummary};
pub use download::{DialogState, DownloadOptions, DownloadOptionsCollector};
pub use export::ExportRequest;
pub use query::{QueryState, SortOrder};
