use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 图片、图片目录或索引文件不存在
    #[error("找不到{kind}: {}", path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    /// 图片无法解码
    #[error("无法解码图片 {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 图片没有任何像素，无法归一化
    #[error("图片不包含任何像素: {}", .0.display())]
    EmptyImage(PathBuf),

    /// 索引文件格式错误或版本不兼容
    #[error("索引格式错误: {0}")]
    Format(String),

    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn not_found(kind: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::NotFound { kind, path: path.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// 图片或索引内容无法识别
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::EmptyImage(_) | Self::Format(_))
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        match *err {
            bincode::ErrorKind::Io(e) if e.kind() != std::io::ErrorKind::UnexpectedEof => {
                Self::Io(e)
            }
            e => Self::Format(e.to_string()),
        }
    }
}
