//! 技能索引生成
//!
//! 扫描 → 按名称排序 → 写出 2 空格缩进的 JSON 数组。

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};

use super::scanner::{ScanOptions, SkillRecord, SkillScanner};
use crate::core::SkillsError;

/// 按 name 升序（区分大小写，稳定排序）
pub fn sort_records(records: &mut [SkillRecord]) {
    records.sort_by(|a, b| a.name.cmp(&b.name));
}

/// 2 空格缩进，非 ASCII 字符（含 DEL）输出为 `\uXXXX`（超出 BMP 的写成代理对）
struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> AsciiPrettyFormatter<'a> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl<'a> Formatter for AsciiPrettyFormatter<'a> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c <= '\x7e' {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// 序列化为 JSON 数组（2 空格缩进，纯 ASCII，无结尾换行）
pub fn render_index(records: &[SkillRecord]) -> Result<String, SkillsError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, AsciiPrettyFormatter::new());
    records.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 写出索引文件，已存在则覆盖
pub fn write_index(records: &[SkillRecord], output: &Path) -> Result<(), SkillsError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SkillsError::io(parent, e))?;
    }
    let json = render_index(records)?;
    std::fs::write(output, json).map_err(|e| SkillsError::io(output, e))
}

/// 读取已有索引
pub fn load_index(path: &Path) -> Result<Vec<SkillRecord>, SkillsError> {
    let content = std::fs::read_to_string(path).map_err(|e| SkillsError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

/// 生成索引：扫描 skills_dir，排序后写入 output，返回写入的记录
pub fn generate_index(
    skills_dir: &Path,
    output: &Path,
    options: &ScanOptions,
) -> Result<Vec<SkillRecord>, SkillsError> {
    tracing::info!(skills_dir = %skills_dir.display(), "Generating skills index");

    let mut records = SkillScanner::new(skills_dir)
        .with_options(options.clone())
        .scan()?;
    sort_records(&mut records);
    write_index(&records, output)?;

    tracing::info!(
        count = records.len(),
        output = %output.display(),
        "Generated skills index"
    );
    Ok(records)
}
