use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use log::info;
use regex::Regex;
use tokio::task::block_in_place;

use crate::cli::SubCommandExtend;
use crate::index::{FailurePolicy, IndexOptions};
use crate::utils::pb_style;
use crate::{IMDB, Opts};

#[derive(Parser, Debug, Clone)]
pub struct BuildCommand {
    /// 图片所在目录，只扫描第一层
    #[arg(short, long, value_name = "DIR", default_value = "../image")]
    pub image_dir: PathBuf,
    /// 只处理指定后缀名的文件，多个后缀用逗号分隔，例：jpg,png
    #[arg(short, long)]
    pub suffix: Option<String>,
    /// 跳过无法处理的图片，默认遇到错误时中止构建
    #[arg(long)]
    pub skip_errors: bool,
}

impl BuildCommand {
    fn index_options(&self) -> Result<IndexOptions> {
        let suffix = match &self.suffix {
            Some(suffix) => {
                let parts = suffix.split(',').map(|s| regex::escape(s.trim())).collect::<Vec<_>>();
                Some(Regex::new(&format!("(?i)^({})$", parts.join("|")))?)
            }
            None => None,
        };
        let on_failure =
            if self.skip_errors { FailurePolicy::Skip } else { FailurePolicy::Abort };
        Ok(IndexOptions { suffix, on_failure })
    }
}

impl SubCommandExtend for BuildCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let index_opts = self.index_options()?;
        let pb = ProgressBar::no_length().with_style(pb_style());
        let db = block_in_place(|| IMDB::build(opts.conf_dir(), &self.image_dir, &index_opts, pb))?;
        info!("构建索引成功，共 {} 张图片", db.db().len());
        Ok(())
    }
}
