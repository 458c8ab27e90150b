use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::db::ImageDB;
use crate::error::Result;
use crate::histogram::{self, Histogram};
use crate::score::similarity;

/// 单条搜索结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// 相似度，范围为 0 到 1
    pub score: f64,
    /// 图片 ID
    pub id: u64,
    /// 图片路径
    pub path: PathBuf,
}

/// 将查询直方图与索引中的每张图片逐一比较，按相似度从高到低返回全部结果
///
/// 相似度相同的图片保持索引中的 ID 顺序
pub fn search(db: &ImageDB, query: &Histogram) -> Vec<SearchResult> {
    let instant = Instant::now();

    let records = db.iter().collect::<Vec<_>>();
    let mut results = records
        .par_iter()
        .map(|record| SearchResult {
            score: similarity(query, &record.histogram),
            id: record.id,
            path: record.path.clone(),
        })
        .collect::<Vec<_>>();
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!("比较 {} 张图片，耗时 {:.2}ms", results.len(), instant.elapsed().as_secs_f64() * 1e3);
    results
}

/// 计算图片的颜色直方图并在索引中搜索
pub fn search_file(db: &ImageDB, image: impl AsRef<Path>) -> Result<Vec<SearchResult>> {
    let instant = Instant::now();
    let query = histogram::extract(image)?;
    debug!("计算直方图耗时 {:.2}ms", instant.elapsed().as_secs_f64() * 1e3);
    Ok(search(db, &query))
}
