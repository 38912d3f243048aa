//! skills-index
//!
//! 入口：初始化日志、加载配置，扫描技能目录并写出 skills_index.json。

use anyhow::Context;
use skills_index::{config::load_config, generate_index, observability};

fn main() -> anyhow::Result<()> {
    observability::init();

    let cfg = load_config(None).context("Failed to load config")?;
    let base = std::env::current_dir().context("Failed to resolve working directory")?;
    let skills_dir = cfg.skills.root_dir(&base);
    let output = cfg.skills.output_file(&base);

    println!("🏗️ Generating index from: {}", skills_dir.display());

    let records = generate_index(&skills_dir, &output, &cfg.skills.scan_options())
        .context("Index generation failed")?;

    println!(
        "✅ Generated index with {} skills at: {}",
        records.len(),
        output.display()
    );
    Ok(())
}
