use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum_typed_multipart::TypedMultipart;
use image::ImageFormat;
use log::info;
use prometheus::TextEncoder;
use tokio::task::block_in_place;
use utoipa::OpenApi;

use super::ApiDoc;
use super::error::{AppError, Result};
use super::state::AppState;
use super::types::*;
use crate::histogram::{self, Histogram};
use crate::{Error, metrics};

/// 搜索一张图片
#[utoipa::path(
    post,
    path = "/search",
    request_body(content = SearchForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = SearchResponse),
        (status = 400, description = "图片无法解码"),
    )
)]
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    data: TypedMultipart<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let count = result_count(data.count.as_deref(), state.count);
    let start = Instant::now();

    info!("正在搜索上传图片");

    let (size, query) = block_in_place(|| {
        let image = histogram::imdecode(&data.file)?;
        let query =
            Histogram::from_image(&image).ok_or_else(|| Error::EmptyImage("<memory>".into()))?;
        Ok::<_, Error>((image.dimensions(), query))
    })?;
    metrics::inc_image_count(size);

    let mut result = state.db.spawn_search(query).await?;

    let elapsed = start.elapsed();
    metrics::inc_search_duration(size, elapsed.as_secs_f64());
    if let Some(best) = result.first() {
        metrics::inc_search_max_score(size, best.score);
    }

    result.truncate(count);
    Ok(Json(SearchResponse {
        time: elapsed.as_millis() as u64,
        result: result.into_iter().map(SearchItem::from).collect(),
    }))
}

/// 获取索引中的图片文件
#[utoipa::path(
    get,
    path = "/image/{id}",
    params(("id" = u64, Path, description = "图片 ID")),
    responses(
        (status = 200, description = "图片文件内容"),
        (status = 404, description = "图片不存在"),
    )
)]
pub async fn image_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse> {
    let path = match state.db.get(id) {
        Some(record) => record.path.clone(),
        None => return Err(AppError::not_found(format!("图片 {} 不存在", id))),
    };
    if !path.is_file() {
        return Err(AppError::not_found(format!("图片文件已不存在: {}", path.display())));
    }

    let content_type = ImageFormat::from_path(&path)
        .map(|f| f.to_mime_type())
        .unwrap_or("application/octet-stream");
    let data = tokio::fs::read(&path).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], data))
}

/// Prometheus 指标
pub async fn metrics_handler() -> Result<String> {
    let text = TextEncoder::new().encode_to_string(&prometheus::gather());
    Ok(text.map_err(anyhow::Error::from)?)
}

pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
