//! `stockbatch-client`
//!
//! **Responsibility:** client-side core of the batch list + label export view.
//!
//! This crate provides:
//! - Query derivation from navigable URL state (`QueryStateController`)
//! - Staleness-guarded batch list fetching (`BatchListFetcher`)
//! - Fire-and-forget label downloads (`DownloadTrigger`)
//! - The page orchestrator a rendering layer drives (`BatchesPage`)
//!
//! Rendering is out of scope: a view reads the state exposed here and forwards
//! user intents back.

pub mod config;
pub mod download;
pub mod fetcher;
pub mod navigation;
pub mod page;
pub mod source;

pub use config::{ClientConfig, ConfigError};
pub use download::{DownloadTrigger, HttpDownloader, export_batch};
pub use fetcher::{BatchListFetcher, ListState, RequestToken};
pub use navigation::{MemoryNavigator, NavigableState, QueryParams, QueryPatch, QueryStateController};
pub use page::{BatchesPage, summary_line};
pub use source::{BatchSource, FetchError, HttpBatchSource};
