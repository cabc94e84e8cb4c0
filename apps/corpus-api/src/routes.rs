use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use corpus_domain::TriState;
use corpus_service::{
	Direction, Error as ServiceError, ExportRequest, ExportResponse, GetRecordRequest,
	ListIdsRequest, ListIdsResponse, NavigateRequest, NavigateResponse, PageRequest, PageResponse,
	ProjectCountsRequest, ProjectCountsResponse, RecordItem, TagStatsRequest, TagStatsResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/projects/{project_id}/records", get(page_records))
		.route("/v1/projects/{project_id}/records/export", get(export_records))
		.route("/v1/projects/{project_id}/records/tags", post(tag_statistics))
		.route("/v1/projects/{project_id}/records/navigate", get(navigate_record))
		.route("/v1/projects/{project_id}/records/ids", get(list_record_ids))
		.route("/v1/projects/{project_id}/records/counts", get(project_counts))
		.route("/v1/projects/{project_id}/records/{record_id}", get(get_record))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

/// `status` folds to the confirmed criterion: `confirmed` and
/// `unconfirmed` constrain, anything else means all records.
fn confirmed_from_status(status: Option<&str>) -> Option<bool> {
	match status {
		Some("confirmed") => Some(true),
		Some("unconfirmed") => Some(false),
		_ => None,
	}
}

#[derive(Debug, Deserialize)]
struct PageQuery {
	page: Option<u32>,
	page_size: Option<u32>,
	status: Option<String>,
	field: Option<String>,
	input: Option<String>,
	has_cot: Option<TriState>,
	is_distill: Option<TriState>,
}

async fn page_records(
	State(state): State<AppState>,
	Path(project_id): Path<String>,
	Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>, ApiError> {
	let response = state
		.service
		.page_records(PageRequest {
			project_id,
			page: query.page,
			page_size: query.page_size,
			confirmed: confirmed_from_status(query.status.as_deref()),
			field: query.field,
			input: query.input,
			has_cot: query.has_cot.unwrap_or_default(),
			is_distill: query.is_distill.unwrap_or_default(),
		})
		.await?;

	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
	status: Option<String>,
	balance_config: Option<String>,
}

async fn export_records(
	State(state): State<AppState>,
	Path(project_id): Path<String>,
	Query(query): Query<ExportQuery>,
) -> Result<Json<ExportResponse>, ApiError> {
	let response = state
		.service
		.export_records(ExportRequest {
			project_id,
			confirmed: confirmed_from_status(query.status.as_deref()),
			balance_config: query.balance_config,
		})
		.await?;

	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct TagStatsBody {
	status: Option<String>,
}

async fn tag_statistics(
	State(state): State<AppState>,
	Path(project_id): Path<String>,
	Json(body): Json<TagStatsBody>,
) -> Result<Json<TagStatsResponse>, ApiError> {
	let response = state
		.service
		.tag_statistics(TagStatsRequest {
			project_id,
			confirmed: confirmed_from_status(body.status.as_deref()),
		})
		.await?;

	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct NavigateQuery {
	record_id: Uuid,
	direction: Direction,
}

async fn navigate_record(
	State(state): State<AppState>,
	Path(project_id): Path<String>,
	Query(query): Query<NavigateQuery>,
) -> Result<Json<NavigateResponse>, ApiError> {
	let response = state
		.service
		.navigate_record(NavigateRequest {
			project_id,
			record_id: query.record_id,
			direction: query.direction,
		})
		.await?;

	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct ListIdsQuery {
	status: Option<String>,
	field: Option<String>,
	input: Option<String>,
	has_cot: Option<TriState>,
	is_distill: Option<TriState>,
}

async fn list_record_ids(
	State(state): State<AppState>,
	Path(project_id): Path<String>,
	Query(query): Query<ListIdsQuery>,
) -> Result<Json<ListIdsResponse>, ApiError> {
	let response = state
		.service
		.list_record_ids(ListIdsRequest {
			project_id,
			confirmed: confirmed_from_status(query.status.as_deref()),
			field: query.field,
			input: query.input,
			has_cot: query.has_cot.unwrap_or_default(),
			is_distill: query.is_distill.unwrap_or_default(),
		})
		.await?;

	Ok(Json(response))
}

async fn project_counts(
	State(state): State<AppState>,
	Path(project_id): Path<String>,
) -> Result<Json<ProjectCountsResponse>, ApiError> {
	let response = state.service.project_counts(ProjectCountsRequest { project_id }).await?;

	Ok(Json(response))
}

async fn get_record(
	State(state): State<AppState>,
	Path((_project_id, record_id)): Path<(String, Uuid)>,
) -> Result<Json<RecordItem>, ApiError> {
	let response = state.service.get_record(GetRecordRequest { record_id }).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "not_found", message),
			ServiceError::Storage { message } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
