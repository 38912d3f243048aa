//! skills-validate - 校验技能目录下每个 SKILL.md 的基本结构
//!
//! 有 Error 时退出码为 1；只有 Warning 时仍视为通过。

use std::process::ExitCode;

use anyhow::Context;
use skills_index::{config::load_config, observability, validate_skills};

fn main() -> anyhow::Result<ExitCode> {
    observability::init();

    let cfg = load_config(None).context("Failed to load config")?;
    let base = std::env::current_dir().context("Failed to resolve working directory")?;
    let skills_dir = cfg.skills.root_dir(&base);

    println!("🔍 Validating skills in: {}", skills_dir.display());

    let report = validate_skills(&skills_dir, &cfg.skills.scan_options())
        .context("Validation failed")?;

    println!("✅ Found and checked {} skills.", report.checked);
    if !report.issues.is_empty() {
        println!("\n⚠️  Validation Results:");
        for issue in &report.issues {
            println!("{}", issue);
        }
    }

    if report.passed() {
        if report.issues.is_empty() {
            println!("✨ All skills passed basic validation!");
        }
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n❌ {} blocking error(s) found.",
            report.errors().count()
        );
        Ok(ExitCode::FAILURE)
    }
}
