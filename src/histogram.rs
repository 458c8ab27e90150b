use std::path::{Path, PathBuf};

use image::{ImageReader, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 颜色通道数量，依次为 R、G、B
pub const CHANNELS: usize = 3;
/// 每个通道的桶数量，对应 8 位通道值
pub const BINS: usize = 256;
/// 直方图总长度
pub const HISTOGRAM_LEN: usize = CHANNELS * BINS;

/// 归一化的 RGB 颜色直方图
///
/// 三个通道的直方图依次拼接，每个通道内的桶之和为 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram(Vec<f64>);

impl Histogram {
    /// 从原始桶数据构造直方图，长度不是 [`HISTOGRAM_LEN`] 时返回 `None`
    pub fn from_bins(bins: Vec<f64>) -> Option<Self> {
        (bins.len() == HISTOGRAM_LEN).then_some(Self(bins))
    }

    /// 统计图片的颜色直方图，图片没有像素时返回 `None`
    pub fn from_image(image: &RgbImage) -> Option<Self> {
        let total = image.width() as u64 * image.height() as u64;
        if total == 0 {
            return None;
        }

        let mut counts = vec![0u64; HISTOGRAM_LEN];
        for pixel in image.pixels() {
            for (channel, &value) in pixel.0.iter().enumerate() {
                counts[value as usize + BINS * channel] += 1;
            }
        }

        let total = total as f64;
        Some(Self(counts.into_iter().map(|c| c as f64 / total).collect()))
    }

    pub fn bins(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 返回第 `channel` 个通道的直方图
    pub fn channel(&self, channel: usize) -> &[f64] {
        &self.0[channel * BINS..(channel + 1) * BINS]
    }

    pub fn channels(&self) -> impl Iterator<Item = &[f64]> {
        self.0.chunks_exact(BINS)
    }
}

/// 读取图片文件并计算颜色直方图
pub fn extract(path: impl AsRef<Path>) -> Result<Histogram> {
    let path = path.as_ref();
    let image = imread(path)?;
    Histogram::from_image(&image).ok_or_else(|| Error::EmptyImage(path.to_path_buf()))
}

/// 读取图片文件并转换为 8 位 RGB 格式，额外的通道（如 alpha）会被丢弃
pub fn imread(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::not_found("图片", path));
    }
    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|source| Error::Decode { path: path.to_path_buf(), source })?;
    Ok(image.into_rgb8())
}

/// 从内存中的图片数据解码，用于处理上传的图片
pub fn imdecode(bytes: &[u8]) -> Result<RgbImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|source| Error::Decode { path: PathBuf::from("<memory>"), source })?;
    Ok(image.into_rgb8())
}
