//! 技能结构校验
//!
//! 每个 SKILL.md 需以 frontmatter 开头或至少含一个一级标题；
//! frontmatter 必须能闭合，缺少 `name:` / `description:` 只记警告。
//! 单个文件的问题只记录不中断，只有 I/O 错误会中止整次校验。

use std::fmt;
use std::path::Path;

use super::frontmatter::{has_heading, parse_frontmatter};
use super::scanner::{relative_slash_path, ScanOptions, SkillScanner};
use crate::core::SkillsError;

/// 问题级别：Error 会使校验失败，Warning 不会
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// 单条校验问题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// 标记文件相对技能根目录的路径
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "❌ {}: {}", self.path, self.message),
            Severity::Warning => write!(f, "⚠️  {}: {}", self.path, self.message),
        }
    }
}

/// 一次校验的汇总
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// 检查过的技能数
    pub checked: usize,
    /// 按遍历顺序记录的问题
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// 没有 Error 即通过
    pub fn passed(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }
}

/// 校验单个 SKILL.md 的内容
pub fn validate_content(rel_path: &str, content: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let has_frontmatter = content.trim().starts_with("---");
    if !has_frontmatter && !has_heading(content) {
        issues.push(ValidationIssue::error(
            rel_path,
            "Missing frontmatter or top-level heading",
        ));
    }

    if has_frontmatter {
        match parse_frontmatter(content) {
            Some(fm) => {
                if !fm.mentions("name") {
                    issues.push(ValidationIssue::warning(
                        rel_path,
                        "Frontmatter missing 'name:'",
                    ));
                }
                if !fm.mentions("description") {
                    issues.push(ValidationIssue::warning(
                        rel_path,
                        "Frontmatter missing 'description:'",
                    ));
                }
            }
            None => issues.push(ValidationIssue::error(rel_path, "Malformed frontmatter")),
        }
    }

    issues
}

/// 校验 skills_dir 下所有技能
pub fn validate_skills(
    skills_dir: &Path,
    options: &ScanOptions,
) -> Result<ValidationReport, SkillsError> {
    tracing::info!(skills_dir = %skills_dir.display(), "Validating skills");

    let scanner = SkillScanner::new(skills_dir).with_options(options.clone());
    let mut report = ValidationReport::default();

    for marker in scanner.marker_files()? {
        report.checked += 1;
        let rel_path = relative_slash_path(&marker, skills_dir);
        let content =
            std::fs::read_to_string(&marker).map_err(|e| SkillsError::io(&marker, e))?;

        let issues = validate_content(&rel_path, &content);
        for issue in &issues {
            tracing::debug!(path = %issue.path, severity = ?issue.severity, "{}", issue.message);
        }
        report.issues.extend(issues);
    }

    tracing::info!(
        checked = report.checked,
        errors = report.errors().count(),
        warnings = report.warnings().count(),
        "Validation finished"
    );
    Ok(report)
}
