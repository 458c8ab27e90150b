use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use log::info;
use tokio::task::{JoinHandle, spawn_blocking};

use crate::config::ConfDir;
use crate::db::{ImageDB, ImageRecord};
use crate::error::Result;
use crate::histogram::Histogram;
use crate::index::{IndexOptions, build_index_with_progress};
use crate::searcher::{self, SearchResult};

/// 一次会话中使用的索引
///
/// 索引加载后只读，可以在多个搜索任务间共享
#[derive(Debug, Clone)]
pub struct IMDB {
    db: Arc<ImageDB>,
}

impl IMDB {
    pub fn new(db: ImageDB) -> Self {
        Self { db: Arc::new(db) }
    }

    /// 从配置目录中加载索引
    pub fn open(conf_dir: ConfDir) -> Result<Self> {
        let index_file = conf_dir.index();
        info!("加载索引: {}", index_file.display());
        let db = ImageDB::load(&index_file)?;
        info!("已加载 {} 张图片", db.len());
        Ok(Self::new(db))
    }

    /// 扫描图片目录构建索引，并保存到配置目录
    ///
    /// 新索引完整写入后才会替换旧的索引文件
    pub fn build(
        conf_dir: ConfDir,
        image_dir: impl AsRef<Path>,
        opts: &IndexOptions,
        pb: ProgressBar,
    ) -> Result<Self> {
        let db = build_index_with_progress(image_dir, opts, pb)?;
        std::fs::create_dir_all(conf_dir.path())?;
        let index_file = conf_dir.index();
        db.save(&index_file)?;
        info!("索引已保存到 {}", index_file.display());
        Ok(Self::new(db))
    }

    pub fn db(&self) -> &ImageDB {
        &self.db
    }

    pub fn get(&self, id: u64) -> Option<&ImageRecord> {
        self.db.get(id)
    }

    /// 在索引中搜索图片，返回全部结果
    pub fn search(&self, image: impl AsRef<Path>) -> Result<Vec<SearchResult>> {
        searcher::search_file(&self.db, image)
    }

    /// 在后台线程中执行搜索，避免阻塞调用方
    ///
    /// 搜索一旦开始就会执行到结束
    pub fn spawn_search(&self, query: Histogram) -> JoinHandle<Vec<SearchResult>> {
        let db = self.db.clone();
        spawn_blocking(move || searcher::search(&db, &query))
    }

    /// 同 [`IMDB::spawn_search`]，但直方图也在后台线程中计算
    pub fn spawn_search_file(&self, image: PathBuf) -> JoinHandle<Result<Vec<SearchResult>>> {
        let db = self.db.clone();
        spawn_blocking(move || searcher::search_file(&db, image))
    }
}
