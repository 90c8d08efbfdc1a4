//! Read-only inventory endpoints.

use axum::Json;
use axum::extract::{Path, State};

use bistro_protocol::{Table, TableId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/v1/tables — all tables in stored order.
pub async fn list_tables(State(state): State<AppState>) -> Json<Vec<Table>> {
    Json(state.inventory().tables().to_vec())
}

/// GET /api/v1/tables/{id} — one table.
pub async fn get_table(
    State(state): State<AppState>,
    Path(table_id): Path<u32>,
) -> ApiResult<Json<Table>> {
    state
        .inventory()
        .get(TableId(table_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("table {table_id} not found")))
}
