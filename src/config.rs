use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::*;

/// 默认的索引文件名
pub const DEFAULT_INDEX_FILE: &str = "index.bin";

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// 显示的结果数量，不指定时显示全部结果
    #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "histsearch", version)]
pub struct Opts {
    #[command(subcommand)]
    pub subcmd: SubCommand,
    /// 索引文件所在目录
    #[arg(short, long, global = true, default_value = "index")]
    pub conf_dir: ConfDir,
    /// 索引文件名
    #[arg(long, global = true, value_name = "NAME", default_value = DEFAULT_INDEX_FILE)]
    pub index_file: String,
}

impl Opts {
    /// 返回设置了索引文件名的配置目录
    pub fn conf_dir(&self) -> ConfDir {
        let mut conf_dir = self.conf_dir.clone();
        conf_dir.set_default(self.index_file.clone());
        conf_dir
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCommand {
    /// 扫描图片目录，构建颜色直方图索引
    Build(BuildCommand),
    /// 从索引中搜索相似图片
    Search(SearchCommand),
    /// 显示一张图片的颜色直方图概况
    Show(ShowCommand),
    /// 导出索引中的所有直方图
    Export(ExportCommand),
    /// 启动 HTTP 搜索服务
    Server(ServerCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfDir {
    path: PathBuf,
    default: String,
}

impl ConfDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), default: DEFAULT_INDEX_FILE.to_string() }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn set_default(&mut self, default: String) {
        self.default = default;
    }

    /// 返回索引文件的路径
    pub fn index(&self) -> PathBuf {
        self.path.join(&self.default)
    }
}

impl FromStr for ConfDir {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}
