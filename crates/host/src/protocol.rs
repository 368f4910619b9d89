//! Wire protocol between the server and the automation helper process.
//!
//! The protocol is JSON-over-stdio: one JSON object per line in each
//! direction, with a monotonically increasing request id correlating
//! responses to requests.

use serde::{Deserialize, Serialize};
use sheetgate_core::{CellScalar, UsedRange};

/// A command sent to the automation helper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Monotonically increasing request ID for correlating responses.
    pub id: u64,
    /// The command to execute.
    #[serde(flatten)]
    pub command: Command,
}

/// Commands the server can send to the helper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params", rename_all = "snake_case")]
pub enum Command {
    /// Check that the spreadsheet application is reachable.
    Ping,

    /// List the names of all open workbooks.
    ListWorkbooks,

    /// Report the currently active workbook, if any.
    ActiveWorkbook,

    /// List the sheet names of a workbook.
    ListSheets { workbook: String },

    /// Report a workbook's currently active sheet, if any.
    ActiveSheet { workbook: String },

    /// Report a sheet's used range (anchor coordinates plus value grid).
    UsedRange { workbook: String, sheet: String },

    /// Assign a scalar value to a cell address.
    WriteCell {
        workbook: String,
        sheet: String,
        cell: String,
        value: CellScalar,
    },

    /// Assign a grid of values to a range address.
    WriteRange {
        workbook: String,
        sheet: String,
        range: String,
        values: Vec<Vec<CellScalar>>,
    },
}

/// A response sent from the helper back to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// The request ID this response corresponds to.
    pub id: u64,
    /// The result of the command.
    #[serde(flatten)]
    pub result: ResponseResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResponseResult {
    Ok {
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<ResponseData>,
    },
    Error {
        message: String,
    },
}

/// Data returned in successful responses.
///
/// Externally tagged: the payload is `{"names": [...]}`, `{"active": ...}`,
/// or `{"range": ...}`, so the variant key disambiguates even when the
/// content is null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseData {
    /// A list of workbook or sheet names.
    Names(Vec<String>),
    /// The active workbook/sheet name, when one exists.
    Active(Option<String>),
    /// The used range of a sheet, when the sheet is not blank.
    Range(Option<UsedRange>),
}
