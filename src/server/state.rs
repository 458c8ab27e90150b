use std::sync::Arc;

use crate::IMDB;
use crate::cli::server::ServerCommand;
use crate::metrics;

/// 应用状态
pub struct AppState {
    /// 只读索引
    pub db: IMDB,
    /// 请求未指定时返回的结果数量
    pub count: u64,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(db: IMDB, opts: ServerCommand) -> Arc<Self> {
        metrics::set_indexed_images(db.db().len());
        Arc::new(AppState { db, count: opts.count })
    }
}
