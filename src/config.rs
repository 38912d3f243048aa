//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `SKILLS__*` 覆盖（双下划线表示嵌套，如 `SKILLS__SKILLS__OUTPUT_FILE=out.json`）。

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::skills::ScanOptions;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub skills: SkillsSection,
}

/// [skills] 段：技能根目录、索引输出、标记文件名、描述截断长度、排除目录
#[derive(Debug, Clone, Deserialize)]
pub struct SkillsSection {
    /// 技能根目录，未设置时用 ./skills
    pub root_dir: Option<PathBuf>,
    /// 索引输出文件，未设置时用 ./skills_index.json
    pub output_file: Option<PathBuf>,
    #[serde(default = "default_marker_file")]
    pub marker_file: String,
    /// 从正文首段合成描述时保留的字符数
    #[serde(default = "default_description_max_chars")]
    pub description_max_chars: usize,
    /// 跳过的目录名 glob（如 ".*"、"node_modules"）
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_marker_file() -> String {
    "SKILL.md".to_string()
}

fn default_description_max_chars() -> usize {
    150
}

impl Default for SkillsSection {
    fn default() -> Self {
        Self {
            root_dir: None,
            output_file: None,
            marker_file: default_marker_file(),
            description_max_chars: default_description_max_chars(),
            exclude: Vec::new(),
        }
    }
}

impl SkillsSection {
    /// 技能根目录：配置值或 <base>/skills
    pub fn root_dir(&self, base: &Path) -> PathBuf {
        match &self.root_dir {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => base.join(p),
            None => base.join("skills"),
        }
    }

    /// 索引输出路径：配置值或 <base>/skills_index.json
    pub fn output_file(&self, base: &Path) -> PathBuf {
        match &self.output_file {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => base.join(p),
            None => base.join("skills_index.json"),
        }
    }

    /// 转为扫描参数
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            marker_file: self.marker_file.clone(),
            description_max_chars: self.description_max_chars,
            exclude: self.exclude.clone(),
        }
    }
}

/// 环境变量源：`SKILLS__<段>__<键>`，`exclude` 以逗号分隔
pub fn env_source() -> config::Environment {
    config::Environment::with_prefix("SKILLS")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("skills.exclude")
}

/// 从 config 目录加载配置，环境变量 SKILLS__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 SKILLS__*（如 `SKILLS__SKILLS__EXCLUDE=".*,node_modules"`）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    load_config_with_env(config_path, env_source())
}

/// 同 [`load_config`]，环境变量源由调用方提供
pub fn load_config_with_env(
    config_path: Option<PathBuf>,
    env: config::Environment,
) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(default_file) = ["config/default.toml", "../config/default.toml", "default.toml"]
        .into_iter()
        .map(Path::new)
        .find(|p| p.exists())
    {
        builder = builder.add_source(config::File::from(default_file).required(false));
    }

    if let Some(path) = config_path.filter(|p| p.exists()) {
        builder = builder.add_source(config::File::from(path).required(false));
    }

    builder.add_source(env).build()?.try_deserialize()
}
