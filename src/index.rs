use std::path::{Path, PathBuf};

use indicatif::{ParallelProgressIterator, ProgressBar};
use log::{info, warn};
use rayon::prelude::*;
use regex::Regex;
use walkdir::WalkDir;

use crate::db::{ImageDB, ImageRecord};
use crate::error::{Error, Result};
use crate::histogram::{self, Histogram};

/// 单张图片处理失败时的策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// 立即中止整个索引过程
    #[default]
    Abort,
    /// 跳过该图片并输出警告
    Skip,
}

/// 索引构建参数
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// 只处理后缀名匹配的文件，为空时处理目录下的所有文件
    pub suffix: Option<Regex>,
    pub on_failure: FailurePolicy,
}

/// 列出目录下需要索引的文件，按文件名排序以保证 ID 分配稳定
pub fn scan_directory(image_dir: &Path, suffix: Option<&Regex>) -> Result<Vec<PathBuf>> {
    if !image_dir.is_dir() {
        return Err(Error::not_found("图片目录", image_dir));
    }

    let mut entries = vec![];
    for entry in WalkDir::new(image_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(e) => Error::Io(e),
            None => Error::Format("目录中存在循环链接".to_string()),
        })?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(re) = suffix {
            let matched =
                entry.path().extension().is_some_and(|ext| re.is_match(&ext.to_string_lossy()));
            if !matched {
                continue;
            }
        }
        entries.push(entry.into_path());
    }

    Ok(entries)
}

/// 扫描目录并为每张图片计算颜色直方图
///
/// 图片 ID 按文件名顺序从 0 开始连续分配。
/// 使用 [`FailurePolicy::Skip`] 时，失败的图片不会占用 ID。
pub fn build_index(image_dir: impl AsRef<Path>, opts: &IndexOptions) -> Result<ImageDB> {
    build_index_with_progress(image_dir, opts, ProgressBar::hidden())
}

pub fn build_index_with_progress(
    image_dir: impl AsRef<Path>,
    opts: &IndexOptions,
    pb: ProgressBar,
) -> Result<ImageDB> {
    let image_dir = image_dir.as_ref();
    info!("开始扫描目录: {}", image_dir.display());
    let entries = scan_directory(image_dir, opts.suffix.as_ref())?;
    info!("扫描完成，共 {} 张图片", entries.len());

    pb.set_length(entries.len() as u64);

    // collect 会保持输入顺序，并在遇到第一个错误时停止
    let histograms = entries
        .into_par_iter()
        .progress_with(pb.clone())
        .map(|path| {
            let result = histogram::extract(&path);
            match (result, opts.on_failure) {
                (Ok(hist), _) => Ok(Some((path, hist))),
                (Err(e), FailurePolicy::Skip) => {
                    warn!("跳过图片 {}: {}", path.display(), e);
                    pb.println(format!("跳过图片: {}", path.display()));
                    Ok(None)
                }
                (Err(e), FailurePolicy::Abort) => Err(e),
            }
        })
        .collect::<Result<Vec<Option<(PathBuf, Histogram)>>>>()?;

    let db = histograms
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(id, (path, histogram))| ImageRecord { id: id as u64, path, histogram })
        .collect::<ImageDB>();

    pb.finish_with_message("索引构建完成");
    info!("共索引 {} 张图片", db.len());

    Ok(db)
}
