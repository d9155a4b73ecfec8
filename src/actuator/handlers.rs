use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::actuator::error::{ApiError, RouteAction};
use crate::actuator::params::{StopParams, SuspendParams};
use crate::actuator::RoutesState;
use crate::delegate::{DelegateError, RouteDetailsInfo, RouteInfo, RoutesDelegate};
use crate::observability::metrics;

/// `GET /`
pub async fn list_routes(State(state): State<RoutesState>) -> Json<Vec<RouteInfo>> {
    let routes = state.delegate.list_routes();
    metrics::record_operation("list", "ok");
    Json(routes)
}

/// `GET /{id}/detail`
pub async fn route_detail(
    State(state): State<RoutesState>,
    Path(id): Path<String>,
) -> Result<Json<RouteDetailsInfo>, ApiError> {
    let result = state
        .delegate
        .route_details(&id)
        .map(Json)
        .ok_or(ApiError::NoSuchRoute(id));
    metrics::record_operation("detail", outcome(&result));
    result
}

/// `GET /{id}/info`
pub async fn route_info(
    State(state): State<RoutesState>,
    Path(id): Path<String>,
) -> Result<Json<RouteInfo>, ApiError> {
    let result = state
        .delegate
        .route_info(&id)
        .map(Json)
        .ok_or(ApiError::NoSuchRoute(id));
    metrics::record_operation("info", outcome(&result));
    result
}

/// `POST /{id}/stop`
pub async fn stop_route(
    State(state): State<RoutesState>,
    Path(id): Path<String>,
    query: Result<Query<StopParams>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let params = query_params(RouteAction::Stop, query)?;
    let timeout = params.timeout();
    let abort_after_timeout = params.abort_after_timeout;
    run_lifecycle(&state, RouteAction::Stop, id, move |delegate, id| {
        delegate.stop_route(id, timeout, abort_after_timeout)
    })
    .await
}

/// `POST /{id}/start`
pub async fn start_route(
    State(state): State<RoutesState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    run_lifecycle(&state, RouteAction::Start, id, |delegate, id| {
        delegate.start_route(id)
    })
    .await
}

/// `POST /{id}/suspend`
pub async fn suspend_route(
    State(state): State<RoutesState>,
    Path(id): Path<String>,
    query: Result<Query<SuspendParams>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let params = query_params(RouteAction::Suspend, query)?;
    let timeout = params.timeout();
    run_lifecycle(&state, RouteAction::Suspend, id, move |delegate, id| {
        delegate.suspend_route(id, timeout)
    })
    .await
}

/// `POST /{id}/resume`
pub async fn resume_route(
    State(state): State<RoutesState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    run_lifecycle(&state, RouteAction::Resume, id, |delegate, id| {
        delegate.resume_route(id)
    })
    .await
}

/// Unwrap query parameters, turning a parse failure into a JSON 400.
fn query_params<T>(
    action: RouteAction,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiError> {
    match query {
        Ok(Query(params)) => Ok(params),
        Err(rejection) => {
            metrics::record_operation(action.name(), "bad_request");
            Err(ApiError::BadRequest(rejection.body_text()))
        }
    }
}

/// Run a mutating delegate call on the blocking pool and wrap any failure,
/// including a panic inside the delegate, as an operation error.
async fn run_lifecycle<F>(
    state: &RoutesState,
    action: RouteAction,
    id: String,
    call: F,
) -> Result<StatusCode, ApiError>
where
    F: FnOnce(&dyn RoutesDelegate, &str) -> Result<(), DelegateError> + Send + 'static,
{
    let delegate = state.delegate.clone();
    let route_id = id.clone();
    let joined =
        tokio::task::spawn_blocking(move || call(delegate.as_ref(), route_id.as_str())).await;

    let result = match joined {
        Ok(Ok(())) => {
            tracing::info!(route_id = %id, operation = action.name(), "Route operation completed");
            Ok(StatusCode::OK)
        }
        Ok(Err(source)) => Err(ApiError::operation(action, id, source)),
        Err(join_error) => Err(ApiError::operation(action, id, join_error)),
    };
    metrics::record_operation(action.name(), outcome(&result));
    result
}

fn outcome<T>(result: &Result<T, ApiError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(ApiError::NoSuchRoute(_)) => "not_found",
        Err(ApiError::BadRequest(_)) => "bad_request",
        Err(ApiError::Operation { .. }) => "error",
    }
}
