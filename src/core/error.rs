//! 技能工具错误类型
//!
//! 单个文件的结构问题不走这里（见 `skills::validator::ValidationIssue`），
//! 这里只有会中止整次运行的 I/O、序列化与 glob 错误。

use std::path::PathBuf;

use thiserror::Error;

/// 扫描、索引、校验过程中会中止运行的错误
#[derive(Error, Debug)]
pub enum SkillsError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置中的 exclude glob 无法解析
    #[error("Invalid exclude pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl SkillsError {
    /// 附带路径的 I/O 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
