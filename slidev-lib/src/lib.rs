//! `slidev-lib` turns a Markdown file into a reveal.js presentation on disk
//! and hands it to a native window.
//!
//! The work happens in two steps. [`cache::AssetCache`] provisions the
//! bundled reveal.js tree into a cache directory, then
//! [`template::Template`] substitutes the Markdown into an HTML template
//! which is written as `index.html` next to the assets. [`present`] adds a
//! third step and shows the result through any [`window::Window`].
//!
//! # Example
//!
//! ```rust
//! use slidev_lib::template::{render, MARKER};
//!
//! let html = render("# Title\n---\n# Slide 2", Some("<textarea>{markdown_content}</textarea>"));
//! assert_eq!(html, "<textarea># Title\n---\n# Slide 2</textarea>");
//! assert!(!html.contains(MARKER));
//! ```

pub mod cache;
pub mod error;
pub mod template;
pub mod window;

use crate::cache::{AssetCache, CachePolicy, Provisioned};
use crate::error::{Result, SlidevError};
use crate::template::{write_document, Template};
use crate::window::{file_url, Geometry, Window, WindowRequest, DEFAULT_TITLE};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Everything needed to build and show one presentation.
#[derive(Debug, Clone)]
pub struct Config {
    /// The Markdown document.
    pub markdown: PathBuf,
    /// Optional custom template; `None` selects the built-in one.
    pub template: Option<PathBuf>,
    /// Root directory for cached application data.
    pub cache_root: PathBuf,
    /// The bundled reveal.js tree to provision from.
    pub assets: PathBuf,
    pub policy: CachePolicy,
    pub title: String,
    pub geometry: Geometry,
}

impl Config {
    /// A configuration with the built-in template, default window and the
    /// default cache policy.
    pub fn new(
        markdown: impl Into<PathBuf>,
        cache_root: impl Into<PathBuf>,
        assets: impl Into<PathBuf>,
    ) -> Self {
        Self {
            markdown: markdown.into(),
            template: None,
            cache_root: cache_root.into(),
            assets: assets.into(),
            policy: CachePolicy::default(),
            title: DEFAULT_TITLE.to_string(),
            geometry: Geometry::default(),
        }
    }
}

/// A presentation written to disk and ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Path of the generated `index.html`.
    pub index: PathBuf,
    /// `file://` URL of [`Presentation::index`].
    pub url: String,
    pub provisioned: Provisioned,
}

/// Provisions the asset cache and writes the rendered presentation into it.
pub fn prepare(config: &Config) -> Result<Presentation> {
    let provisioned = AssetCache::new(&config.cache_root, &config.assets)
        .with_policy(config.policy)
        .ensure()?;

    let markdown =
        fs::read_to_string(&config.markdown).map_err(|source| SlidevError::ReadMarkdown {
            path: config.markdown.clone(),
            source,
        })?;

    let template = Template::load(config.template.as_deref())?;
    let html = template.render(&markdown);
    let index = write_document(&provisioned.dir, &html)?;
    let url = file_url(&index);

    info!("Presentation written to {}", index.display());
    Ok(Presentation {
        index,
        url,
        provisioned,
    })
}

/// Prepares the presentation and shows it in `window`, blocking until the
/// window is closed.
pub fn present(config: &Config, window: &dyn Window) -> anyhow::Result<Presentation> {
    let presentation = prepare(config)?;

    let request = WindowRequest {
        url: presentation.url.clone(),
        title: config.title.clone(),
        geometry: config.geometry,
    };
    window.open(&request)?;

    Ok(presentation)
}
