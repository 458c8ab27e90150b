use std::sync::LazyLock;

use prometheus::*;

static METRIC_INDEXED_IMAGES: LazyLock<IntGauge> = LazyLock::new(|| {
    register_int_gauge!("histsearch_indexed_images", "number of images in the loaded index")
        .unwrap()
});

static METRIC_SEARCH_IMAGE_COUNT: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "histsearch_search_image_count",
        "count of the image to search",
        &["size"]
    )
    .unwrap()
});

static METRIC_SEARCH_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "histsearch_search_duration",
        "duration of the per-image search in seconds",
        &["size"]
    )
    .unwrap()
});

static METRIC_SEARCH_MAX_SCORE: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "histsearch_search_max_score",
        "max score of the per-image search",
        &["size"],
        (1..=20).map(|x| x as f64 / 20.).collect()
    )
    .unwrap()
});

pub fn set_indexed_images(count: usize) {
    METRIC_INDEXED_IMAGES.set(count as i64);
}

/// 增加图像大小指标计数
pub fn inc_image_count(size: (u32, u32)) {
    METRIC_SEARCH_IMAGE_COUNT.with_label_values(&[to_fixed_size(size)]).inc();
}

pub fn inc_search_duration(size: (u32, u32), duration: f64) {
    METRIC_SEARCH_DURATION.with_label_values(&[to_fixed_size(size)]).observe(duration);
}

pub fn inc_search_max_score(size: (u32, u32), score: f64) {
    METRIC_SEARCH_MAX_SCORE.with_label_values(&[to_fixed_size(size)]).observe(score);
}

/// 将图像面积范围调整到几个固定值
fn to_fixed_size((width, height): (u32, u32)) -> &'static str {
    let area = width as u64 * height as u64;
    match area {
        0..=16384 => "128",
        16385..=65536 => "256",
        65537..=262144 => "512",
        262145..=1048576 => "1024",
        1048577..=4194304 => "2048",
        _ => "2048+",
    }
}
