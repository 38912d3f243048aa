//! SKILL.md 文本解析
//!
//! 纯函数，不做 I/O：frontmatter 块、`name:` / `description:` 字段、一级标题、正文首段。

use std::sync::OnceLock;

use regex::Regex;

/// 描述截断后追加的省略标记
pub const ELLIPSIS: &str = "...";

/// 一级标题行首：`#` 后跟至少一个空白（可跨行）
const HEADING_PREFIX: &str = r"(?m)^#\s+";

static FRONTMATTER_RE: OnceLock<Regex> = OnceLock::new();
static HEADING_RE: OnceLock<Regex> = OnceLock::new();
static HEADING_MARK_RE: OnceLock<Regex> = OnceLock::new();

fn frontmatter_re() -> &'static Regex {
    // 开头必须是 ---，块内容取到下一个 --- 为止（最短匹配）
    FRONTMATTER_RE.get_or_init(|| Regex::new(r"(?s)\A---\s*(.*?)\s*---").unwrap())
}

fn heading_re() -> &'static Regex {
    HEADING_RE.get_or_init(|| Regex::new(&format!("{HEADING_PREFIX}(.+)$")).unwrap())
}

fn heading_mark_re() -> &'static Regex {
    HEADING_MARK_RE.get_or_init(|| Regex::new(HEADING_PREFIX).unwrap())
}

/// 文档开头的 frontmatter 块
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    /// 两个 `---` 之间的内容（已去掉首尾空白）
    pub content: &'a str,
    /// 闭合 `---` 之后的字节偏移
    pub end: usize,
}

impl<'a> Frontmatter<'a> {
    /// 读取 `key: value` 单行字段；只看第一个以 `key:` 开头的行，值为空视为缺失。键区分大小写
    pub fn field(&self, key: &str) -> Option<String> {
        let prefix = format!("{key}:");
        self.content
            .lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// 块内是否出现 `key:`（校验器只做存在性检查）
    pub fn mentions(&self, key: &str) -> bool {
        self.content.contains(&format!("{key}:"))
    }

    /// frontmatter 之后的正文（去掉首尾空白）
    pub fn body(&self, text: &'a str) -> &'a str {
        text.get(self.end..).unwrap_or("").trim()
    }
}

/// 解析文档开头的 frontmatter；文档不以 `---` 开头或没有闭合 `---` 时返回 None
pub fn parse_frontmatter(text: &str) -> Option<Frontmatter<'_>> {
    let caps = frontmatter_re().captures(text)?;
    let whole = caps.get(0)?;
    let inner = caps.get(1)?;
    Some(Frontmatter {
        content: inner.as_str(),
        end: whole.end(),
    })
}

/// 第一个一级标题（`# 标题`）的文本
pub fn first_heading(text: &str) -> Option<String> {
    heading_re()
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// 是否存在以 `#` 加空白开头的行
pub fn has_heading(text: &str) -> bool {
    heading_mark_re().is_match(text)
}

/// 正文首段：跳过开头的标题与空行，收集连续的非空非标题行，遇到下一个标题或空行结束
pub fn extract_first_paragraph(text: &str) -> Option<String> {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if line.starts_with('#') || line.trim().is_empty() {
            if !lines.is_empty() {
                break;
            }
            continue;
        }
        lines.push(line.trim());
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

/// 按字符截断到 max_chars 并追加省略号（不考虑词边界）
pub fn truncate_description(paragraph: &str, max_chars: usize) -> String {
    let mut out: String = paragraph.chars().take(max_chars).collect();
    out.push_str(ELLIPSIS);
    out
}

/// 目录名转显示名：`-` 换成空格，每个词首字母大写、其余小写
pub fn title_case_id(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut prev_alpha = false;
    for c in id.replace('-', " ").chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
