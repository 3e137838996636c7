//! HTTP routes
//!
//! | Method | Path                    | Body                            |
//! |--------|-------------------------|---------------------------------|
//! | POST   | `/api/content/validate` | `{ hook, script?, action? }`    |
//! | POST   | `/api/content/generate` | `{ prompt }`                    |
//! | GET    | `/api/policy`           |                                 |
//! | GET    | `/health`               |                                 |
//!
//! Every failure is returned as `{ "error": "..." }`.

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;
use hookcheck_core::{ContentRequest, ValidatorError};
use hookcheck_generation::WorkflowError;
use serde_json::{json, Value};
use std::convert::Infallible;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{Filter, Rejection, Reply};

/// All routes with CORS, request tracing and error recovery applied
pub fn routes(
    state: AppState,
    max_body_bytes: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let validate = warp::path!("api" / "content" / "validate")
        .and(warp::post())
        .and(warp::body::content_length_limit(max_body_bytes))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(validate_content);

    let generate = warp::path!("api" / "content" / "generate")
        .and(warp::post())
        .and(warp::body::content_length_limit(max_body_bytes))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(generate_content);

    let policy = warp::path!("api" / "policy")
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|state: AppState| warp::reply::json(state.policy().config()));

    let health = warp::path!("health")
        .and(warp::get())
        .and(with_state(state))
        .map(|state: AppState| {
            warp::reply::json(&json!({
                "status": "ok",
                "policyVersion": state.policy().version(),
            }))
        });

    validate
        .or(generate)
        .or(policy)
        .or(health)
        .recover(handle_rejection)
        .with(cors())
        .with(warp::trace::request())
}

fn cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type", "authorization"])
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn reject(err: impl Into<ApiError>) -> Rejection {
    warp::reject::custom(err.into())
}

fn parse_body(body: &Bytes) -> Result<Value, Rejection> {
    serde_json::from_slice(body).map_err(|e| reject(ApiError::MalformedJson(e.to_string())))
}

#[tracing::instrument(skip_all)]
async fn validate_content(body: Bytes, state: AppState) -> Result<impl Reply, Rejection> {
    let request = ContentRequest::from_json(&parse_body(&body)?).map_err(reject)?;
    info!(
        action = ?request.action,
        has_script = request.script.is_some(),
        "content request"
    );

    // Regex work runs off the reactor.
    let response = tokio::task::spawn_blocking(move || state.validator().handle(&request))
        .await
        .map_err(|e| reject(ApiError::Internal(e.to_string())))?;
    Ok(warp::reply::json(&response))
}

#[tracing::instrument(skip_all)]
async fn generate_content(body: Bytes, state: AppState) -> Result<impl Reply, Rejection> {
    let workflow = state
        .workflow()
        .ok_or_else(|| reject(ApiError::GenerationUnavailable))?;

    let prompt = match parse_body(&body)?.get("prompt") {
        Some(Value::String(prompt)) => prompt.clone(),
        _ => {
            return Err(reject(ValidatorError::invalid_input(
                "prompt is required and must be a string",
            )))
        }
    };

    match workflow.run(&prompt).await {
        Ok(content) => Ok(warp::reply::json(&content)),
        Err(WorkflowError::ValidationFailed { best }) => Ok(warp::reply::json(&*best)),
        Err(err) => Err(reject(err)),
    }
}

/// Map rejections to `{ error }` bodies
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(api) = err.find::<ApiError>() {
        (api.status(), api.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "request body too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "content-length required".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else {
        error!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
    };

    if status.is_server_error() {
        error!(%status, error = %message, "request failed");
    }
    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody::new(message)),
        status,
    ))
}
