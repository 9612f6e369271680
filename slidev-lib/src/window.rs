//! The capability the presenter needs from a desktop window toolkit.

use crate::error::{Result, SlidevError};
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Markdown Presentation";
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Window size and position, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: 0,
            y: 0,
        }
    }
}

impl Geometry {
    pub fn new(width: u32, height: u32, x: i32, y: i32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SlidevError::InvalidGeometry(format!(
                "window size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            x,
            y,
        })
    }
}

/// Everything a window needs to show a presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRequest {
    pub url: String,
    pub title: String,
    pub geometry: Geometry,
}

/// A toolkit able to display a URL in a native window.
pub trait Window {
    /// Opens the window and blocks until the user closes it.
    fn open(&self, request: &WindowRequest) -> anyhow::Result<()>;
}

/// Formats a local path as a `file://` URL.
pub fn file_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{path}")
    } else {
        format!("file:///{path}")
    }
}
