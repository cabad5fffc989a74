use axum::{
	Json, Router,
	extract::{DefaultBodyLimit, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use scan_service::{Error as ServiceError, MatchRequest, MatchResponse};

pub fn router(state: AppState) -> Router {
	let body_limit = DefaultBodyLimit::max(state.max_body_bytes);

	Router::new()
		.route("/health", get(health))
		.route("/v1/search/image", post(search_image))
		.layer(body_limit)
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search_image(
	State(state): State<AppState>,
	Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
	let response = state.service.match_image(payload).await?;

	Ok(Json(response))
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

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", message, None),
			ServiceError::Provider { message } => {
				tracing::error!(%message, "Classifier call failed.");

				ApiError::new(StatusCode::BAD_GATEWAY, "provider_error", message, None)
			},
			ServiceError::Timeout { message } => {
				tracing::warn!(%message, "Classifier call timed out.");

				ApiError::new(StatusCode::GATEWAY_TIMEOUT, "provider_timeout", message, None)
			},
			ServiceError::Storage { message } => {
				tracing::error!(%message, "Catalog query failed.");

				ApiError::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage_error",
					"Catalog lookup failed.",
					None,
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}
