use axum::body::Bytes;
use axum_typed_multipart::TryFromMultipart;
use serde::Serialize;
use utoipa::ToSchema;

use crate::searcher::SearchResult;

/// 搜索请求参数
#[derive(TryFromMultipart)]
pub struct SearchRequest {
    pub file: Bytes,
    /// 保持为字符串，无效值按默认值处理
    pub count: Option<String>,
}

/// 搜索表单（用于API文档）
#[derive(Debug, ToSchema)]
#[allow(unused)]
pub struct SearchForm {
    /// 上传的图片文件
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// 返回的结果数量，最小为 1
    pub count: Option<u64>,
}

/// 单条搜索结果
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchItem {
    /// 相似度，范围为 0 到 1
    pub score: f64,
    /// 图片 ID
    pub id: u64,
    /// 图片路径
    pub path: String,
}

impl From<SearchResult> for SearchItem {
    fn from(r: SearchResult) -> Self {
        Self { score: r.score, id: r.id, path: r.path.to_string_lossy().into_owned() }
    }
}

/// 搜索响应
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    /// 搜索耗时，单位为毫秒
    pub time: u64,
    /// 按相似度从高到低排列的结果
    pub result: Vec<SearchItem>,
}

/// 解析结果数量，无效时使用默认值，小于 1 时取 1
pub fn result_count(raw: Option<&str>, default: u64) -> usize {
    let count = match raw.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(n)) => n.max(1) as u64,
        _ => default.max(1),
    };
    count as usize
}
