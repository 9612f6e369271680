use crate::cli::Cli;
use crate::webview::WebviewWindow;
use anyhow::Context;
use clap::Parser;
use slidev_lib::cache::{default_asset_source, default_cache_root};
use slidev_lib::window::Geometry;
use slidev_lib::{prepare, present, Config};
use std::io::{self, Write};
use std::path::{self, Path, PathBuf};

pub fn run() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let no_window = cli.no_window;
    let config = build_config(cli)?;

    if no_window {
        let presentation = prepare(&config)?;
        writeln!(io::stdout(), "{}", presentation.index.display())?;
        return Ok(());
    }

    present(&config, &WebviewWindow)?;
    Ok(())
}

fn build_config(cli: Cli) -> anyhow::Result<Config> {
    let Cli {
        file,
        template,
        width,
        height,
        x,
        y,
        title,
        assets,
        cache_dir,
        cache_policy,
        no_window: _,
    } = cli;

    let markdown = absolute(&file)?;
    let template = template.as_deref().map(absolute).transpose()?;
    let assets = match assets {
        Some(dir) => absolute(&dir)?,
        None => default_asset_source().context("Failed to locate the bundled reveal.js assets")?,
    };
    let cache_root = match cache_dir {
        Some(dir) => absolute(&dir)?,
        None => default_cache_root(),
    };
    log::debug!(
        "markdown: {}, assets: {}, cache: {}",
        markdown.display(),
        assets.display(),
        cache_root.display()
    );

    Ok(Config {
        markdown,
        template,
        cache_root,
        assets,
        policy: cache_policy.into(),
        title,
        geometry: Geometry::new(width, height, x, y)?,
    })
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    path::absolute(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
