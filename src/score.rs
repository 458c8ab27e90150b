use crate::histogram::{BINS, HISTOGRAM_LEN, Histogram};

/// 计算两个颜色直方图的相似度
///
/// 先逐桶取最小值得到直方图交集，再对每个通道的交集求和，
/// 最终结果为三个通道之和的**乘积**。只要有一个通道完全不重合，相似度就为 0。
///
/// 结果范围为 `[0, 1]`，两个相同的直方图相似度为 1。
///
/// # Panics
///
/// 两个直方图长度不同时 panic，这只可能是程序错误
pub fn similarity(h1: &Histogram, h2: &Histogram) -> f64 {
    intersection(h1.bins(), h2.bins())
}

/// 在原始桶数据上计算相似度，参见 [`similarity`]
pub fn intersection(h1: &[f64], h2: &[f64]) -> f64 {
    assert_eq!(h1.len(), h2.len(), "histogram length mismatch");
    assert_eq!(h1.len(), HISTOGRAM_LEN, "histogram length mismatch");

    h1.chunks_exact(BINS)
        .zip(h2.chunks_exact(BINS))
        .map(|(c1, c2)| c1.iter().zip(c2).map(|(a, b)| a.min(*b)).sum::<f64>())
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 按通道给出若干 (桶, 值)，构造直方图
    fn hist(channels: [&[(usize, f64)]; 3]) -> Histogram {
        let mut bins = vec![0.0; HISTOGRAM_LEN];
        for (c, entries) in channels.iter().enumerate() {
            for &(i, v) in entries.iter() {
                bins[c * BINS + i] = v;
            }
        }
        Histogram::from_bins(bins).unwrap()
    }

    #[test]
    fn identical() {
        let h = hist([&[(0, 0.25), (10, 0.75)], &[(3, 1.0)], &[(100, 0.5), (200, 0.5)]]);
        assert!((similarity(&h, &h) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn symmetric() {
        let h1 = hist([&[(0, 0.25), (10, 0.75)], &[(3, 1.0)], &[(100, 0.5), (200, 0.5)]]);
        let h2 = hist([&[(0, 0.5), (11, 0.5)], &[(3, 0.6), (4, 0.4)], &[(100, 1.0)]]);
        assert_eq!(similarity(&h1, &h2), similarity(&h2, &h1));
        // 0.25 * 0.6 * 0.5
        assert!((similarity(&h1, &h2) - 0.075).abs() < 1e-9);
    }

    #[test]
    fn one_disjoint_channel_is_zero() {
        let red = hist([&[(255, 1.0)], &[(0, 1.0)], &[(0, 1.0)]]);
        let green = hist([&[(0, 1.0)], &[(255, 1.0)], &[(0, 1.0)]]);
        assert_eq!(similarity(&red, &green), 0.0);
    }

    #[test]
    fn product_not_sum() {
        // 两个通道完全相同，第三个通道只有一半重合
        let h1 = hist([&[(1, 1.0)], &[(2, 1.0)], &[(3, 0.5), (4, 0.5)]]);
        let h2 = hist([&[(1, 1.0)], &[(2, 1.0)], &[(3, 0.5), (5, 0.5)]]);
        assert!((similarity(&h1, &h2) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn monotonic_in_single_channel() {
        let query = hist([&[(1, 0.5), (2, 0.5)], &[(7, 1.0)], &[(9, 0.2), (8, 0.8)]]);
        let close = hist([&[(1, 0.5), (2, 0.5)], &[(7, 1.0)], &[(9, 0.2), (8, 0.6), (0, 0.2)]]);
        let far = hist([&[(1, 0.5), (2, 0.5)], &[(7, 1.0)], &[(9, 0.2), (8, 0.3), (0, 0.5)]]);
        assert!(similarity(&query, &close) > similarity(&query, &far));
    }

    #[test]
    #[should_panic(expected = "histogram length mismatch")]
    fn length_mismatch() {
        intersection(&[0.0; HISTOGRAM_LEN], &[0.0; BINS]);
    }
}
