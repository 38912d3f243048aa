//! 技能库工具
//!
//! 技能（Skill）是技能根目录下任意层级中含有 SKILL.md 的目录。
//! 本模块扫描这些文件生成索引，并校验其基本结构。
//!
//! 目录结构：
//! ```text
//! skills/
//! ├── git-pushing/
//! │   └── SKILL.md        # frontmatter（name / description）或一级标题 + 正文
//! ├── devops/
//! │   └── docker/
//! │       └── SKILL.md
//! └── ...
//! skills_index.json       # 生成的索引
//! ```

pub mod frontmatter;
mod index;
mod scanner;
mod validator;

pub use frontmatter::{extract_first_paragraph, parse_frontmatter, Frontmatter};
pub use index::{generate_index, load_index, render_index, sort_records, write_index};
pub use scanner::{parse_skill, ScanOptions, SkillRecord, SkillScanner};
pub use validator::{validate_content, validate_skills, Severity, ValidationIssue, ValidationReport};
