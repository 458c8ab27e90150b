use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use bincode::Options;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

mod model;

pub use model::*;

use crate::error::{Error, Result};
use crate::histogram::HISTOGRAM_LEN;

/// 索引文件头部的魔数
const MAGIC: &[u8; 4] = b"HIST";
/// 索引文件格式版本，记录结构发生变化时需要增加
pub const FORMAT_VERSION: u32 = 1;

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

/// 图片 ID 到图片记录的映射
///
/// 只会被索引流程一次性构建，之后整体保存；加载后只读
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageDB {
    records: BTreeMap<u64, ImageRecord>,
}

impl ImageDB {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u64) -> Option<&ImageRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按 ID 从小到大遍历所有记录
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ImageRecord> {
        self.records.values()
    }

    /// 将整个索引写入文件，覆盖已有文件
    ///
    /// 数据先写入同目录下的临时文件再重命名，读取方不会看到写了一半的索引
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let tmp_file = tmp_path(path);
        debug!("写入临时索引文件 {}", tmp_file.display());

        let write = || -> Result<()> {
            let mut writer = BufWriter::new(File::create(&tmp_file)?);
            writer.write_all(MAGIC)?;
            writer.write_u32::<LittleEndian>(FORMAT_VERSION)?;
            bincode_options().serialize_into(&mut writer, &self.records)?;
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
            fs::rename(&tmp_file, path)?;
            Ok(())
        };

        let result = write();
        if result.is_err() {
            let _ = fs::remove_file(&tmp_file);
        }
        result
    }

    /// 从文件中加载整个索引
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::not_found("索引文件", path));
        }

        let file = File::open(path)?;
        let limit = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        let mut magic = [0; 4];
        read_header(reader.read_exact(&mut magic))?;
        if &magic != MAGIC {
            return Err(Error::Format(format!("{} 不是索引文件", path.display())));
        }
        let version = read_header(reader.read_u32::<LittleEndian>())?;
        if version != FORMAT_VERSION {
            return Err(Error::Format(format!(
                "不支持的索引版本 {}，当前版本为 {}",
                version, FORMAT_VERSION
            )));
        }

        let records: BTreeMap<u64, ImageRecord> =
            bincode_options().with_limit(limit).deserialize_from(&mut reader)?;
        if reader.read(&mut [0u8; 1])? != 0 {
            return Err(Error::Format("索引文件末尾存在多余数据".to_string()));
        }

        for (&id, record) in &records {
            if record.id != id {
                return Err(Error::Format(format!("记录 ID 不一致: {} != {}", record.id, id)));
            }
            if record.histogram.len() != HISTOGRAM_LEN {
                return Err(Error::Format(format!(
                    "图片 {} 的直方图长度为 {}",
                    id,
                    record.histogram.len()
                )));
            }
        }

        Ok(Self { records })
    }
}

impl FromIterator<ImageRecord> for ImageDB {
    fn from_iter<T: IntoIterator<Item = ImageRecord>>(iter: T) -> Self {
        Self { records: iter.into_iter().map(|r| (r.id, r)).collect() }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_header<T>(result: std::io::Result<T>) -> Result<T> {
    result.map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => Error::Format("索引文件过短".to_string()),
        _ => Error::Io(e),
    })
}
