use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::warn;
use tokio::task::JoinError;

/// API错误类型
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: anyhow::Error,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn not_found(msg: String) -> Self {
        Self { status: StatusCode::NOT_FOUND, error: anyhow::anyhow!(msg) }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!("请求失败: {}", self.error);
        (self.status, format!("Something went wrong: {}", self.error)).into_response()
    }
}

impl From<crate::Error> for AppError {
    fn from(err: crate::Error) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.is_format() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self { status, error: err.into() }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        crate::Error::from(err).into()
    }
}

impl From<JoinError> for AppError {
    fn from(err: JoinError) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, error: err.into() }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, error: err }
    }
}
