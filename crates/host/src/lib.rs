//! # sheetgate-host
//!
//! Automation host abstraction for sheetgate.
//!
//! The [`AutomationHost`] trait is the narrow interface the rest of the
//! system requires of the desktop-automation binding: enumerate open
//! workbooks, report active targets, read a sheet's used range, and write
//! values. [`Locator`] layers the named-vs-active resolution pattern on top
//! of it, and [`bridge::StdioBridge`] is the live implementation that talks
//! to a helper process attached to the running spreadsheet application.

pub mod bridge;
pub mod locator;
pub mod protocol;

use sheetgate_core::{CellScalar, UsedRange};
use thiserror::Error;

pub use bridge::{BridgeConfig, StdioBridge};
pub use locator::{Locator, Lookup};

/// Errors from the automation host transport.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Failed to spawn bridge process: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Bridge process not running")]
    NotRunning,

    #[error("Failed to send command to bridge: {0}")]
    Send(String),

    #[error("Failed to read response from bridge: {0}")]
    Read(String),

    #[error("Bridge protocol error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Command(String),

    #[error("Unexpected response data from bridge")]
    UnexpectedResponse,
}

/// The contract required of the automation binding.
///
/// Every call hits the live application state; implementations do not cache.
/// Calls are synchronous and block for their duration.
pub trait AutomationHost: Send + Sync {
    /// Whether the spreadsheet application is reachable right now.
    fn ping(&self) -> Result<bool, HostError>;

    /// Names of all open workbooks.
    fn workbook_names(&self) -> Result<Vec<String>, HostError>;

    /// Name of the currently active workbook, if any.
    fn active_workbook(&self) -> Result<Option<String>, HostError>;

    /// Sheet names of the given workbook.
    fn sheet_names(&self, workbook: &str) -> Result<Vec<String>, HostError>;

    /// Name of the workbook's currently active sheet, if any.
    fn active_sheet(&self, workbook: &str) -> Result<Option<String>, HostError>;

    /// The sheet's populated region, or `None` for a blank sheet.
    fn used_range(&self, workbook: &str, sheet: &str) -> Result<Option<UsedRange>, HostError>;

    /// Write a scalar to a single cell address (A1 notation).
    fn write_cell(
        &self,
        workbook: &str,
        sheet: &str,
        cell: &str,
        value: CellScalar,
    ) -> Result<(), HostError>;

    /// Write a grid of values to a range address (A1 notation).
    fn write_range(
        &self,
        workbook: &str,
        sheet: &str,
        range: &str,
        values: Vec<Vec<CellScalar>>,
    ) -> Result<(), HostError>;
}
