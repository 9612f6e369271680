//! Defines the command-line interface for the application.

use clap::{Parser, ValueEnum};
use slidev_lib::cache::CachePolicy;
use slidev_lib::window::{DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "slidev",
    version,
    about = "Present a Markdown file as a reveal.js slideshow in a native window."
)]
pub struct Cli {
    /// The Markdown file to present.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// A custom HTML template; `{markdown_content}` marks where the Markdown goes.
    #[arg(short = 't', long = "tmpl", value_name = "TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Window width in pixels.
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Window height in pixels.
    #[arg(short = 'H', long, value_name = "N", default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Window x position in pixels.
    #[arg(short, value_name = "N", default_value_t = 0, allow_negative_numbers = true)]
    pub x: i32,

    /// Window y position in pixels.
    #[arg(short, value_name = "N", default_value_t = 0, allow_negative_numbers = true)]
    pub y: i32,

    /// Window title.
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_TITLE)]
    pub title: String,

    /// The reveal.js directory to provision from. [default: next to the executable]
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Root directory of the asset cache. [default: <temp>/slidev]
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// When to copy the bundled assets into an existing cache again.
    #[arg(long, value_enum, value_name = "POLICY", default_value_t = CachePolicyArg::Fingerprint)]
    pub cache_policy: CachePolicyArg,

    /// Write the presentation and print its path instead of opening a window.
    #[arg(long)]
    pub no_window: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CachePolicyArg {
    /// Reuse the cache whenever it exists.
    Presence,
    /// Copy again when the bundled assets changed.
    Fingerprint,
}

impl From<CachePolicyArg> for CachePolicy {
    fn from(arg: CachePolicyArg) -> Self {
        match arg {
            CachePolicyArg::Presence => CachePolicy::Presence,
            CachePolicyArg::Fingerprint => CachePolicy::Fingerprint,
        }
    }
}
