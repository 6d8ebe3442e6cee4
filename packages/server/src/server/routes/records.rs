//! Record REST endpoints.
//!
//! GET    /records?name=&course=&page=&size=&sort=[&sort=...]
//! POST   /records
//! GET    /records/:id
//! PUT    /records/:id
//! DELETE /records/:id
//!
//! Handlers only extract parameters and pick status codes; filtering and
//! validation happen in `RecordService`.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    Json,
};
use crate::common::{Page, PageParams, RecordId};
use crate::domains::records::{Record, RecordError, RecordInput};
use crate::server::app::AxumAppState;
use crate::server::ApiError;

/// List query. Decoded from raw pairs because `sort` may repeat; for the
/// other keys the last occurrence wins. Unknown keys are ignored.
#[derive(Debug, Default)]
pub struct ListRecordsQuery {
    pub name: Option<String>,
    pub course: Option<String>,
    pub paging: PageParams,
}

impl ListRecordsQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => query.name = Some(value),
                "course" => query.course = Some(value),
                "page" => query.paging.page = Some(value),
                "size" => query.paging.size = Some(value),
                "sort" => query.paging.sort.push(value),
                _ => {}
            }
        }
        query
    }
}

pub async fn list_records(
    Extension(state): Extension<AxumAppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<Record>>, ApiError> {
    let query = ListRecordsQuery::from_pairs(pairs);
    let request = query.paging.validate().map_err(RecordError::from)?;

    let page = state
        .server_deps
        .records
        .search(query.name.as_deref(), query.course.as_deref(), &request)
        .await?;
    Ok(Json(page))
}

pub async fn create_record(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<RecordInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let Json(input) = body?;
    let record = state.server_deps.records.create(&input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_record(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<Record>, ApiError> {
    let record = state.server_deps.records.get(id).await?;
    Ok(Json(record))
}

pub async fn update_record(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<RecordId>,
    body: Result<Json<RecordInput>, JsonRejection>,
) -> Result<Json<Record>, ApiError> {
    let Json(input) = body?;
    let record = state.server_deps.records.update(id, &input).await?;
    Ok(Json(record))
}

/// Always 204: deleting an id that does not exist is treated as success.
pub async fn delete_record(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError> {
    state.server_deps.records.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
