use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::histogram::Histogram;

/// 图片记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// 图片 ID，索引时按顺序分配
    pub id: u64,
    /// 索引时的图片路径，图片本身不会被复制
    pub path: PathBuf,
    /// 图片的颜色直方图
    pub histogram: Histogram,
}
