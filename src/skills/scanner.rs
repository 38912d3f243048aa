//! 技能扫描器
//!
//! 递归遍历技能根目录，每个含 SKILL.md 的目录解析为一条 SkillRecord。

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use super::frontmatter::{
    extract_first_paragraph, first_heading, parse_frontmatter, title_case_id,
    truncate_description,
};
use crate::core::SkillsError;

/// 索引中的一条技能记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// 所在目录名
    pub id: String,
    /// 所在目录相对技能根目录父目录的路径（如 skills/git-pushing）
    pub path: String,
    pub name: String,
    pub description: String,
}

/// 扫描参数（来自 [skills] 配置段）
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub marker_file: String,
    pub description_max_chars: usize,
    /// 匹配则跳过的目录名 glob
    pub exclude: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            marker_file: "SKILL.md".to_string(),
            description_max_chars: 150,
            exclude: Vec::new(),
        }
    }
}

/// 技能扫描器
pub struct SkillScanner {
    root: PathBuf,
    options: ScanOptions,
}

impl SkillScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_marker(mut self, marker_file: impl Into<String>) -> Self {
        self.options.marker_file = marker_file.into();
        self
    }

    pub fn with_description_limit(mut self, max_chars: usize) -> Self {
        self.options.description_max_chars = max_chars;
        self
    }

    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.options.exclude = patterns;
        self
    }

    /// 按文件名顺序列出所有标记文件；根目录不存在时返回空列表
    pub fn marker_files(&self) -> Result<Vec<PathBuf>, SkillsError> {
        if !self.root.exists() {
            tracing::warn!(root = %self.root.display(), "skills directory not found");
            return Ok(Vec::new());
        }

        let excludes = self
            .options
            .exclude
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let mut found = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_excluded(e, &excludes));
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            if entry.file_name() == self.options.marker_file.as_str() {
                found.push(entry.into_path());
            }
        }
        Ok(found)
    }

    /// 扫描并解析所有技能（未排序，保持遍历顺序）
    pub fn scan(&self) -> Result<Vec<SkillRecord>, SkillsError> {
        let base = self.root.parent().unwrap_or_else(|| Path::new(""));
        let mut records = Vec::new();

        for marker in self.marker_files()? {
            let dir = marker.parent().unwrap_or(self.root.as_path());
            let content =
                std::fs::read_to_string(&marker).map_err(|e| SkillsError::io(&marker, e))?;

            let id = dir_name(dir);
            let path = relative_slash_path(dir, base);
            let record = parse_skill(&id, &path, &content, self.options.description_max_chars);
            tracing::debug!(id = %record.id, name = %record.name, "parsed skill");
            records.push(record);
        }

        Ok(records)
    }
}

fn is_excluded(entry: &DirEntry, excludes: &[glob::Pattern]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    excludes.iter().any(|p| p.matches(&name))
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.to_string_lossy().into_owned())
}

/// 相对 base 的路径，统一用 `/` 连接
pub(crate) fn relative_slash_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// 将一篇 SKILL.md 解析为记录
///
/// 1. frontmatter 中的 `name:` / `description:` 优先；
/// 2. 描述仍为空时：无 frontmatter 才用一级标题作名称，描述取正文首段并截断；
/// 3. 名称始终未设置时用目录名的标题形式。
pub fn parse_skill(id: &str, path: &str, content: &str, max_chars: usize) -> SkillRecord {
    let mut name: Option<String> = None;
    let mut description = String::new();

    let fm = parse_frontmatter(content);
    if let Some(fm) = &fm {
        name = fm.field("name");
        if let Some(d) = fm.field("description") {
            description = d;
        }
    }

    if description.is_empty() {
        if fm.is_none() {
            if let Some(heading) = first_heading(content) {
                name = Some(heading);
            }
        }

        let body = match &fm {
            Some(fm) => fm.body(content),
            None => content,
        };
        if let Some(paragraph) = extract_first_paragraph(body) {
            description = truncate_description(&paragraph, max_chars);
        }
    }

    SkillRecord {
        id: id.to_string(),
        path: path.to_string(),
        name: name.unwrap_or_else(|| title_case_id(id)),
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_skill_frontmatter() {
        let content = "---\nname:  Git Pushing \ndescription:  Push safely. \n---\n\n# Other\n\nBody";
        let r = parse_skill("git-pushing", "skills/git-pushing", content, 150);
        assert_eq!(r.name, "Git Pushing");
        assert_eq!(r.description, "Push safely.");
        assert_eq!(r.id, "git-pushing");
        assert_eq!(r.path, "skills/git-pushing");
    }

    #[test]
    fn test_parse_skill_heading_fallback() {
        let content = "# Docker Helper\n\nBuilds images\nand runs them.\n\n## Usage\n";
        let r = parse_skill("docker", "skills/docker", content, 150);
        assert_eq!(r.name, "Docker Helper");
        assert_eq!(r.description, "Builds images and runs them....");
    }

    #[test]
    fn test_parse_skill_frontmatter_without_description_uses_body() {
        let content = "---\nname: Fm Name\n---\n# Heading Name\n\nFirst paragraph.\n";
        let r = parse_skill("x", "skills/x", content, 150);
        // 有 frontmatter 时不取标题作名称
        assert_eq!(r.name, "Fm Name");
        assert_eq!(r.description, "First paragraph....");
    }

    #[test]
    fn test_parse_skill_frontmatter_without_name_falls_back_to_id() {
        let content = "---\ndescription: Only desc\n---\n# Heading\n";
        let r = parse_skill("my-skill", "skills/my-skill", content, 150);
        assert_eq!(r.name, "My Skill");
        assert_eq!(r.description, "Only desc");
    }

    #[test]
    fn test_parse_skill_bare_heading_marker() {
        let content = "#\nTitle\n\nBody";
        let r = parse_skill("my-dir", "skills/my-dir", content, 150);
        assert_eq!(r.name, "Title");
        assert_eq!(r.description, "Title...");
        assert!(crate::skills::validate_content("my-dir/SKILL.md", content).is_empty());
    }

    #[test]
    fn test_parse_skill_nothing_extractable() {
        let r = parse_skill("empty-one", "skills/empty-one", "", 150);
        assert_eq!(r.name, "Empty One");
        assert_eq!(r.description, "");
    }

    #[test]
    fn test_relative_slash_path() {
        assert_eq!(
            relative_slash_path(Path::new("/a/skills/x/y"), Path::new("/a")),
            "skills/x/y"
        );
        assert_eq!(relative_slash_path(Path::new("skills/x"), Path::new("")), "skills/x");
    }

    #[test]
    fn test_scan_nested_and_exclude() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("skills");
        std::fs::create_dir_all(root.join("alpha")).unwrap();
        std::fs::create_dir_all(root.join("group/beta")).unwrap();
        std::fs::create_dir_all(root.join(".hidden/gamma")).unwrap();
        std::fs::create_dir_all(root.join("no-marker")).unwrap();
        std::fs::write(root.join("alpha/SKILL.md"), "# Alpha\n\nFirst.").unwrap();
        std::fs::write(root.join("group/beta/SKILL.md"), "---\nname: Beta\n---\n").unwrap();
        std::fs::write(root.join(".hidden/gamma/SKILL.md"), "# Gamma\n").unwrap();
        std::fs::write(root.join("no-marker/README.md"), "# Nope\n").unwrap();

        let all = SkillScanner::new(&root).scan().unwrap();
        assert_eq!(all.len(), 3);

        let records = SkillScanner::new(&root)
            .with_exclude(vec![".*".to_string()])
            .scan()
            .unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
        assert_eq!(records[1].path, "skills/group/beta");
    }

    #[test]
    fn test_scan_with_marker_and_limit() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("docs");
        std::fs::create_dir_all(root.join("guide")).unwrap();
        std::fs::write(root.join("guide/INDEX.md"), "# Guide\n\nabcdefghij\n").unwrap();
        std::fs::write(root.join("guide/SKILL.md"), "# Ignored\n").unwrap();

        let records = SkillScanner::new(&root)
            .with_marker("INDEX.md")
            .with_description_limit(4)
            .scan()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Guide");
        assert_eq!(records[0].description, "abcd...");
        assert_eq!(records[0].path, "docs/guide");
    }

    #[test]
    fn test_scan_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let records = SkillScanner::new(tmp.path().join("missing")).scan().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let tmp = TempDir::new().unwrap();
        let err = SkillScanner::new(tmp.path())
            .with_exclude(vec!["[".to_string()])
            .marker_files()
            .unwrap_err();
        assert!(matches!(err, SkillsError::Pattern(_)));
    }
}
