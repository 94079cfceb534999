use axum::{
	Json, Router,
	body::Body,
	extract::{
		FromRequestParts, Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::{Request, StatusCode, header, request::Parts},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::state::AppState;
use vault_domain::{reading::ReadingCursor, relative_time, tag_colors::TagColor};
use vault_service::{
	CreateEntryRequest, Dashboard, Entry, EntryPage, Error, Insight, SearchRequest, SearchResponse,
	TagCatalogue, TagView, UpdateEntryRequest, browse,
};

pub const HEADER_USER_ID: &str = "X-Vault-User-Id";

const ERROR_INVALID_REQUEST: &str = "INVALID_REQUEST";
const ERROR_AUTH_REQUIRED: &str = "AUTH_REQUIRED";
const ERROR_NOT_FOUND: &str = "NOT_FOUND";
const ERROR_STORAGE: &str = "STORAGE_ERROR";
const ERROR_CONFIGURATION: &str = "CONFIGURATION_ERROR";

pub fn router(state: AppState) -> Router {
	let api = Router::new()
		.route("/v1/entries", get(list_entries).post(create_entry))
		.route("/v1/entries/search", post(search_entries))
		.route("/v1/entries/{entry_id}", get(get_entry).patch(update_entry).delete(delete_entry))
		.route("/v1/reading", get(reading))
		.route("/v1/tags", get(list_tags))
		.route("/v1/tags/{name}/color", put(set_tag_color))
		.route("/v1/insights", post(record_insight))
		.route("/v1/insights/latest", get(latest_insight))
		.route("/v1/dashboard", get(dashboard))
		.layer(middleware::from_fn_with_state(state.clone(), api_auth_middleware));

	Router::new().route("/health", get(health)).merge(api).with_state(state)
}

pub struct Caller(pub Option<Uuid>);
impl<S> FromRequestParts<S> for Caller
where
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let Some(raw) = parts.headers.get(HEADER_USER_ID) else {
			return Ok(Self(None));
		};
		let raw = raw.to_str().map_err(|_| invalid_user_header())?.trim();

		if raw.is_empty() {
			return Ok(Self(None));
		}

		Uuid::parse_str(raw).map(|user_id| Self(Some(user_id))).map_err(|_| invalid_user_header())
	}
}

#[derive(Debug, Deserialize)]
struct PageQuery {
	page: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ReadingQuery {
	index: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ReadingResponse {
	entry: Option<Entry>,
	index: usize,
	total: usize,
	label: String,
	has_prev: bool,
	has_next: bool,
	created_ago: Option<String>,
}

#[derive(Debug, Serialize)]
struct LatestInsightResponse {
	insight: Option<Insight>,
	message: String,
}

#[derive(Debug, Deserialize)]
struct RecordInsightRequest {
	content: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::AuthRequired => json_error(
				StatusCode::UNAUTHORIZED,
				ERROR_AUTH_REQUIRED,
				"Please sign in to continue.",
				None,
			),
			Error::InvalidRequest { message, field } => json_error(
				StatusCode::BAD_REQUEST,
				ERROR_INVALID_REQUEST,
				message,
				field.map(|field| vec![field]),
			),
			Error::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, ERROR_NOT_FOUND, message, None),
			Error::Storage { message } => {
				tracing::error!(error = %message, "Storage request failed.");

				json_error(StatusCode::INTERNAL_SERVER_ERROR, ERROR_STORAGE, message, None)
			},
			Error::Configuration { message } => {
				tracing::error!(error = %message, "Vault store is unavailable.");

				json_error(
					StatusCode::SERVICE_UNAVAILABLE,
					ERROR_CONFIGURATION,
					"The vault store is unavailable.",
					None,
				)
			},
		}
	}
}
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		json_error(StatusCode::BAD_REQUEST, ERROR_INVALID_REQUEST, rejection.body_text(), None)
	}
}
impl From<PathRejection> for ApiError {
	fn from(rejection: PathRejection) -> Self {
		json_error(StatusCode::BAD_REQUEST, ERROR_INVALID_REQUEST, rejection.body_text(), None)
	}
}
impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		json_error(StatusCode::BAD_REQUEST, ERROR_INVALID_REQUEST, rejection.body_text(), None)
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}

async fn api_auth_middleware(
	State(state): State<AppState>,
	req: Request<Body>,
	next: Next,
) -> Response {
	if let Some(expected) = state.service.cfg.security.api_auth_token.as_deref() {
		let presented = req
			.headers()
			.get(header::AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.strip_prefix("Bearer "))
			.map(str::trim);

		if presented != Some(expected) {
			return json_error(
				StatusCode::UNAUTHORIZED,
				ERROR_AUTH_REQUIRED,
				"A valid bearer token is required.",
				None,
			)
			.into_response();
		}
	}

	next.run(req).await
}

fn invalid_user_header() -> ApiError {
	json_error(
		StatusCode::BAD_REQUEST,
		ERROR_INVALID_REQUEST,
		format!("{HEADER_USER_ID} must be a UUID."),
		Some(vec![HEADER_USER_ID.to_string()]),
	)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_entries(
	State(state): State<AppState>,
	Caller(user): Caller,
	query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<EntryPage>, ApiError> {
	let Query(query) = query?;
	let page = state.service.list_entries(user, query.page.unwrap_or(1)).await?;

	Ok(Json(page))
}

async fn create_entry(
	State(state): State<AppState>,
	Caller(user): Caller,
	payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
	let Json(payload) = payload?;
	let entry = state.service.create_entry(user, payload).await?;

	Ok((StatusCode::CREATED, Json(entry)))
}

async fn get_entry(
	State(state): State<AppState>,
	Caller(user): Caller,
	entry_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Entry>, ApiError> {
	let Path(entry_id) = entry_id?;
	let entry = state.service.get_entry(user, entry_id).await?;

	Ok(Json(entry))
}

async fn update_entry(
	State(state): State<AppState>,
	Caller(user): Caller,
	entry_id: Result<Path<Uuid>, PathRejection>,
	payload: Result<Json<UpdateEntryRequest>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
	let Path(entry_id) = entry_id?;
	let Json(payload) = payload?;
	let entry = state.service.update_entry(user, entry_id, payload).await?;

	Ok(Json(entry))
}

async fn delete_entry(
	State(state): State<AppState>,
	Caller(user): Caller,
	entry_id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
	let Path(entry_id) = entry_id?;

	state.service.delete_entry(user, entry_id).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn search_entries(
	State(state): State<AppState>,
	Caller(user): Caller,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.search_entries(user, &payload).await?;

	Ok(Json(response))
}

async fn reading(
	State(state): State<AppState>,
	Caller(user): Caller,
	query: Result<Query<ReadingQuery>, QueryRejection>,
) -> Result<Json<ReadingResponse>, ApiError> {
	let Query(query) = query?;
	let mut entries = state.service.all_entries(user).await?;
	let cursor = ReadingCursor::new(entries.len(), query.index.unwrap_or(0));
	let entry = if cursor.is_empty() { None } else { Some(entries.swap_remove(cursor.index())) };
	let created_ago = entry
		.as_ref()
		.map(|entry| relative_time::time_ago(entry.created_at, OffsetDateTime::now_utc()));

	Ok(Json(ReadingResponse {
		entry,
		index: cursor.index(),
		total: cursor.len(),
		label: cursor.label(),
		has_prev: !cursor.is_empty() && !cursor.is_first(),
		has_next: !cursor.is_empty() && !cursor.is_last(),
		created_ago,
	}))
}

async fn list_tags(
	State(state): State<AppState>,
	Caller(user): Caller,
) -> Result<Json<TagCatalogue>, ApiError> {
	let catalogue = state.service.tag_catalogue(user).await?;

	Ok(Json(catalogue))
}

async fn set_tag_color(
	State(state): State<AppState>,
	Caller(user): Caller,
	name: Result<Path<String>, PathRejection>,
	payload: Result<Json<TagColor>, JsonRejection>,
) -> Result<Json<TagView>, ApiError> {
	let Path(name) = name?;
	let Json(payload) = payload?;
	let view = state.service.set_tag_color(user, &name, payload).await?;

	Ok(Json(view))
}

async fn latest_insight(
	State(state): State<AppState>,
	Caller(user): Caller,
) -> Result<Json<LatestInsightResponse>, ApiError> {
	let insight = state.service.latest_insight(user).await?;
	let message = match &insight {
		Some(insight) => insight.content.clone(),
		None => browse::NO_ANALYSIS.to_string(),
	};

	Ok(Json(LatestInsightResponse { insight, message }))
}

async fn record_insight(
	State(state): State<AppState>,
	Caller(user): Caller,
	payload: Result<Json<RecordInsightRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Insight>), ApiError> {
	let Json(payload) = payload?;
	let insight = state.service.record_insight(user, &payload.content).await?;

	Ok((StatusCode::CREATED, Json(insight)))
}

async fn dashboard(
	State(state): State<AppState>,
	Caller(user): Caller,
) -> Result<Json<Dashboard>, ApiError> {
	let dashboard = state.service.dashboard(user).await?;

	Ok(Json(dashboard))
}
