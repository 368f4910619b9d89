//! # sheetgate-server
//!
//! HTTP server exposing a running spreadsheet application's active workbook
//! over three routes: a health probe, a tabular read of a sheet's used
//! range, and a batch of cell/range writes. Every request re-resolves the
//! application/workbook/sheet chain from live automation-host state; there
//! is no caching and no cross-request coordination.

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::create_router;
