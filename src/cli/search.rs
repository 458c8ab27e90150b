use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::debug;
use tokio::task::block_in_place;

use crate::IMDB;
use crate::cli::SubCommandExtend;
use crate::config::{Opts, OutputFormat, SearchOptions};
use crate::searcher::SearchResult;

#[derive(Parser, Debug, Clone)]
pub struct SearchCommand {
    #[command(flatten)]
    pub search: SearchOptions,
    /// 被搜索的图片路径
    pub image: PathBuf,
}

impl SubCommandExtend for SearchCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let db = block_in_place(|| IMDB::open(opts.conf_dir()))?;

        let mut result = db.spawn_search_file(self.image.clone()).await??;
        debug!("共 {} 条结果", result.len());

        if let Some(count) = self.search.count {
            result.truncate(count as usize);
        }

        print_result(&result, self.search.output_format)
    }
}

fn print_result(result: &[SearchResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?)
        }
        OutputFormat::Table => {
            for r in result {
                println!("{}\t{:.6}\t{}", r.id, r.score, r.path.display());
            }
        }
    }
    Ok(())
}
