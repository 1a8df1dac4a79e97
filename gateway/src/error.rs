//! HTTP 错误响应

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hostel_errors::{AppError, ProblemDetails};

/// 把 `AppError` 渲染为 RFC 7807 响应
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        problem_response(self.0.to_problem_details())
    }
}

/// 以 `application/problem+json` 返回问题详情，状态码取自 `problem.status`
pub fn problem_response(problem: ProblemDetails) -> Response {
    let status = StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = (status, Json(problem)).into_response();
    response.headers_mut().insert(
        axum::http::header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("application/problem+json"),
    );
    response
}

pub type ApiResult<T> = Result<T, ApiError>;
