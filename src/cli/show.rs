use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::histogram::{self, Histogram};

const CHANNEL_NAMES: [&str; 3] = ["R", "G", "B"];

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// 图片路径
    pub image: PathBuf,
    /// 每个通道显示占比最高的桶数量
    #[arg(short, long, default_value_t = 3)]
    pub top: usize,
}

/// 单个通道的统计信息
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSummary {
    /// 通道平均值
    pub mean: f64,
    /// 非零桶数量
    pub used_bins: usize,
    /// 占比最高的桶及其占比
    pub top: Vec<(usize, f64)>,
}

pub fn summarize(hist: &Histogram, top: usize) -> Vec<ChannelSummary> {
    hist.channels()
        .map(|channel| {
            let mean = channel.iter().enumerate().map(|(i, v)| i as f64 * v).sum();
            let used_bins = channel.iter().filter(|&&v| v > 0.0).count();
            let mut bins =
                channel.iter().copied().enumerate().filter(|(_, v)| *v > 0.0).collect::<Vec<_>>();
            bins.sort_by(|a, b| b.1.total_cmp(&a.1));
            bins.truncate(top);
            ChannelSummary { mean, used_bins, top: bins }
        })
        .collect()
}

impl SubCommandExtend for ShowCommand {
    async fn run(&self, _opts: &Opts) -> Result<()> {
        let hist = histogram::extract(&self.image)?;
        for (name, summary) in CHANNEL_NAMES.iter().zip(summarize(&hist, self.top)) {
            let top = summary
                .top
                .iter()
                .map(|(bin, v)| format!("{}:{:.2}%", bin, v * 100.))
                .collect::<Vec<_>>()
                .join(" ");
            println!("{}\tmean={:.2}\tbins={}\t{}", name, summary.mean, summary.used_bins, top);
        }
        Ok(())
    }
}
