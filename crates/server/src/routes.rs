//! Route handlers for the three endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::{InvalidHeaderValue, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use sheetgate_core::{CellScalar, Table};
use sheetgate_host::{AutomationHost, Locator, Lookup};
use sheetgate_primitives::{CellAddress, CellRange};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Cell mappings are only included for result sets up to this many rows.
/// The cap bounds response size and is deliberately not configurable.
const CELL_MAPPING_MAX_ROWS: usize = 100;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub host: Arc<dyn AutomationHost>,
}

/// Create the application router.
///
/// Cross-origin requests are restricted to the configured origin and the
/// GET/POST/OPTIONS methods.
pub fn create_router(
    config: &ServerConfig,
    host: Arc<dyn AutomationHost>,
) -> Result<Router, InvalidHeaderValue> {
    let origin: HeaderValue = config.allowed_origin.parse()?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(health))
        .route("/api/excel-data", get(excel_data))
        .route("/api/write-excel", post(write_excel))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { host }))
}

/// Resolve application → workbook → worksheet, converting each absence to
/// the response the caller should return. Used by both the read and write
/// handlers; the health handler stops at the workbook step.
fn resolve_target(
    host: &dyn AutomationHost,
    workbook: Option<&str>,
    sheet: Option<&str>,
) -> Result<(String, String), ApiError> {
    let locator = Locator::new(host);

    if !matches!(locator.resolve_application(), Lookup::Found(())) {
        return Err(ApiError::HostUnavailable(
            "No Excel application running".to_string(),
        ));
    }

    let workbook = match locator.resolve_workbook(workbook)? {
        Lookup::Found(name) => name,
        Lookup::NotFoundByName(name) => {
            return Err(ApiError::NotFound(format!("Workbook '{name}' not found")));
        }
        Lookup::NoActiveTarget => {
            return Err(ApiError::NotFound("No active workbook found".to_string()));
        }
    };

    let sheet = match locator.resolve_worksheet(&workbook, sheet)? {
        Lookup::Found(name) => name,
        Lookup::NotFoundByName(name) => {
            return Err(ApiError::NotFound(format!(
                "Sheet '{name}' not found in workbook '{workbook}'"
            )));
        }
        Lookup::NoActiveTarget => {
            return Err(ApiError::NotFound(
                "No active worksheet found".to_string(),
            ));
        }
    };

    Ok((workbook, sheet))
}

// -- GET /health --

async fn health(State(state): State<AppState>) -> Response {
    let locator = Locator::new(state.host.as_ref());

    if !matches!(locator.resolve_application(), Lookup::Found(())) {
        return unhealthy(
            StatusCode::SERVICE_UNAVAILABLE,
            "No Excel application running",
        );
    }

    match locator.resolve_workbook(None) {
        Ok(Lookup::Found(workbook)) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "workbook": workbook })),
        )
            .into_response(),
        Ok(_) => unhealthy(StatusCode::NOT_FOUND, "No active workbook found"),
        Err(err) => unhealthy(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    }
}

fn unhealthy(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({ "status": "unhealthy", "error": error }))).into_response()
}

// -- GET /api/excel-data --

#[derive(Debug, Deserialize)]
struct DataQuery {
    workbook: Option<String>,
    sheet: Option<String>,
    #[serde(default = "default_true")]
    include_cell_mapping: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct DataResponse {
    workbook: String,
    sheet: String,
    data: Vec<IndexMap<String, JsonValue>>,
    shape: (usize, usize),
    #[serde(skip_serializing_if = "Option::is_none")]
    cell_mapping: Option<IndexMap<String, JsonValue>>,
}

async fn excel_data(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Result<Json<DataResponse>, ApiError> {
    let (workbook, sheet) = resolve_target(
        state.host.as_ref(),
        query.workbook.as_deref(),
        query.sheet.as_deref(),
    )?;

    let range = state
        .host
        .used_range(&workbook, &sheet)?
        .ok_or_else(|| ApiError::NotFound("No data found in worksheet".to_string()))?;

    let table = match Table::from_used_range(&range)? {
        Some(table) if !table.records.is_empty() => table,
        _ => return Err(ApiError::NotFound("No data found in worksheet".to_string())),
    };

    let shape = table.shape();
    let cell_mapping = (query.include_cell_mapping && shape.0 <= CELL_MAPPING_MAX_ROWS)
        .then(|| table.cell_mapping(range.row, range.column));

    tracing::debug!(
        %workbook,
        %sheet,
        rows = shape.0,
        cols = shape.1,
        "served tabular read"
    );

    Ok(Json(DataResponse {
        workbook,
        sheet,
        data: table.records,
        shape,
        cell_mapping,
    }))
}

// -- POST /api/write-excel --

#[derive(Debug, Deserialize)]
struct WriteRequest {
    operations: Option<Vec<JsonValue>>,
    workbook: Option<String>,
    sheet: Option<String>,
}

#[derive(Debug, Serialize)]
struct WriteResponse {
    results: Vec<OpOutcome>,
}

/// Per-operation outcome, positionally matching the input operations.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum OpOutcome {
    Success { success: String },
    Error { error: String },
}

async fn write_excel(
    State(state): State<AppState>,
    payload: Result<Json<WriteRequest>, JsonRejection>,
) -> Result<Json<WriteResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|_| ApiError::Validation("No operations provided".to_string()))?;

    let operations = request
        .operations
        .ok_or_else(|| ApiError::Validation("No operations provided".to_string()))?;

    let (workbook, sheet) = resolve_target(
        state.host.as_ref(),
        request.workbook.as_deref(),
        request.sheet.as_deref(),
    )?;

    // One operation failing must not abort the batch; each outcome lands in
    // the results list at the operation's position.
    let results = operations
        .iter()
        .map(|op| apply_operation(state.host.as_ref(), &workbook, &sheet, op))
        .collect();

    Ok(Json(WriteResponse { results }))
}

fn apply_operation(
    host: &dyn AutomationHost,
    workbook: &str,
    sheet: &str,
    op: &JsonValue,
) -> OpOutcome {
    match op.get("type").and_then(JsonValue::as_str) {
        Some("write_cell") => {
            let Some(cell) = op.get("cell").and_then(JsonValue::as_str).filter(|c| !c.is_empty())
            else {
                return OpOutcome::Error {
                    error: "Cell address required for write_cell operation".to_string(),
                };
            };
            let Some(value) = op.get("value") else {
                return OpOutcome::Error {
                    error: "Value required for write_cell operation".to_string(),
                };
            };
            // Reject malformed addresses locally instead of round-tripping
            // them through the host.
            if let Err(err) = CellAddress::from_a1(cell) {
                return OpOutcome::Error {
                    error: format!("Failed to write to cell {cell}: {err}"),
                };
            }
            let Some(scalar) = CellScalar::from_json(value) else {
                return OpOutcome::Error {
                    error: format!("Failed to write to cell {cell}: unsupported value type"),
                };
            };
            match host.write_cell(workbook, sheet, cell, scalar) {
                Ok(()) => OpOutcome::Success {
                    success: format!("Written '{}' to cell {cell}", display_value(value)),
                },
                Err(err) => OpOutcome::Error {
                    error: format!("Failed to write to cell {cell}: {err}"),
                },
            }
        }
        Some("write_range") => {
            let range = op.get("range").and_then(JsonValue::as_str).filter(|r| !r.is_empty());
            let values = op.get("values").and_then(grid_from_json);
            let (Some(range), Some(values)) = (range, values) else {
                return OpOutcome::Error {
                    error: "Range and values required for write_range operation".to_string(),
                };
            };
            let parsed = match CellRange::from_a1(range) {
                Ok(parsed) => parsed.normalized(),
                Err(err) => {
                    return OpOutcome::Error {
                        error: format!("Failed to write to range {range}: {err}"),
                    };
                }
            };
            // A bare cell address anchors the grid; an explicit rectangle
            // must match the grid's shape.
            if parsed.start != parsed.end {
                let rows = values.len() as u32;
                let cols = values.iter().map(Vec::len).max().unwrap_or(0) as u32;
                if rows != parsed.rows() || cols != parsed.cols() {
                    return OpOutcome::Error {
                        error: format!(
                            "Failed to write to range {range}: \
                             {rows}x{cols} values do not fit {parsed}"
                        ),
                    };
                }
            }
            match host.write_range(workbook, sheet, range, values) {
                Ok(()) => OpOutcome::Success {
                    success: format!("Written data to range {range}"),
                },
                Err(err) => OpOutcome::Error {
                    error: format!("Failed to write to range {range}: {err}"),
                },
            }
        }
        _ => {
            // A missing or non-string type field reads as its JSON rendering.
            let label = op
                .get("type")
                .map(display_value)
                .unwrap_or_else(|| "null".to_string());
            OpOutcome::Error {
                error: format!("Unknown operation type: {label}"),
            }
        }
    }
}

/// Render the value the way it was written, for the success message.
fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a non-empty grid of rows of scalars. Returns `None` for anything
/// else, which the caller reports as a per-operation error.
fn grid_from_json(values: &JsonValue) -> Option<Vec<Vec<CellScalar>>> {
    let rows = values.as_array().filter(|rows| !rows.is_empty())?;
    rows.iter()
        .map(|row| {
            row.as_array()?
                .iter()
                .map(CellScalar::from_json)
                .collect::<Option<Vec<_>>>()
        })
        .collect()
}
