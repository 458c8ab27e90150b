use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use ndarray::Array2;
use ndarray_npy::write_npy;
use tokio::task::block_in_place;

use crate::cli::SubCommandExtend;
use crate::db::ImageDB;
use crate::histogram::HISTOGRAM_LEN;
use crate::{IMDB, Opts};

#[derive(Parser, Debug, Clone)]
pub struct ExportCommand {
    /// 输出的 npy 文件，每行为一张图片的直方图，行号与图片 ID 顺序一致
    #[arg(short, long, value_name = "FILE", default_value = "histograms.npy")]
    pub output: PathBuf,
}

/// 将所有直方图拼接为一个二维数组
pub fn histogram_matrix(db: &ImageDB) -> Result<Array2<f64>> {
    let data = db.iter().flat_map(|r| r.histogram.bins().iter().copied()).collect::<Vec<_>>();
    Ok(Array2::from_shape_vec((db.len(), HISTOGRAM_LEN), data)?)
}

impl SubCommandExtend for ExportCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let db = block_in_place(|| IMDB::open(opts.conf_dir()))?;
        let data = histogram_matrix(db.db())?;
        write_npy(&self.output, &data)?;
        for record in db.db().iter() {
            println!("{}\t{}", record.id, record.path.display());
        }
        info!("导出成功: {}", self.output.display());
        Ok(())
    }
}
