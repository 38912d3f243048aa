//! skills-index - 技能库索引与校验
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型
//! - **observability**: 日志初始化
//! - **skills**: SKILL.md 解析、扫描、索引生成与结构校验

pub mod config;
pub mod core;
pub mod observability;
pub mod skills;

pub use skills::{generate_index, validate_skills, SkillRecord, ValidationReport};
