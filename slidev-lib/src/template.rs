//! HTML templates and Markdown substitution.

use crate::error::{Result, SlidevError};
use log::{debug, warn};
use std::convert::Infallible;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::Builder as TempFileBuilder;

/// Placeholder replaced by the Markdown document.
pub const MARKER: &str = "{markdown_content}";

/// Name of the generated document inside the asset directory.
pub const INDEX_FILE_NAME: &str = "index.html";

/// Built-in template. Asset paths are relative to the provisioned reveal.js
/// directory, which is where the rendered document is written.
pub const DEFAULT_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no">
        <title>Markdown Presentation</title>
        <link rel="stylesheet" href="dist/reset.css">
        <link rel="stylesheet" href="dist/reveal.css">
        <link rel="stylesheet" href="dist/theme/black.css">
        <link rel="stylesheet" href="plugin/highlight/monokai.css">
    </head>
    <body>
        <div class="reveal">
            <div class="slides">
                <section data-markdown data-separator="^---" data-separator-vertical="^--">
                    <textarea data-template>
{markdown_content}
                    </textarea>
                </section>
            </div>
        </div>
        <script src="dist/reveal.js"></script>
        <script src="plugin/notes/notes.js"></script>
        <script src="plugin/markdown/markdown.js"></script>
        <script src="plugin/highlight/highlight.js"></script>
        <script>
            Reveal.initialize({
                hash: true,
                plugins: [ RevealMarkdown, RevealHighlight, RevealNotes ]
            });
        </script>
    </body>
</html>
"#;

/// An HTML template holding one or more [`MARKER`] placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl FromStr for Template {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Loads a custom template from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| SlidevError::ReadTemplate {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(source))
    }

    /// Loads the template at `path`, or the built-in one when no path is
    /// given. A path that does not exist, or a file with no content, falls
    /// back to the built-in template.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                debug!("using template {}", path.display());
                let template = Self::from_file(path)?;
                if template.source.is_empty() {
                    warn!(
                        "Template {} is empty, using the built-in template",
                        path.display()
                    );
                    return Ok(Self::default());
                }
                Ok(template)
            }
            Some(path) => {
                warn!(
                    "Template {} does not exist, using the built-in template",
                    path.display()
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn has_marker(&self) -> bool {
        self.source.contains(MARKER)
    }

    /// Substitutes `markdown` for every marker. Without a marker the
    /// template comes back unchanged.
    pub fn render(&self, markdown: &str) -> String {
        if !self.has_marker() {
            warn!("Template has no {MARKER} marker; no Markdown was injected");
            return self.source.clone();
        }
        self.source.replace(MARKER, markdown)
    }
}

/// Renders `markdown` into `template`, or into the built-in template when
/// `template` is `None`.
pub fn render(markdown: &str, template: Option<&str>) -> String {
    match template {
        Some(source) => Template::new(source).render(markdown),
        None => Template::default().render(markdown),
    }
}

/// Writes `html` to `dir/index.html`, replacing any previous document.
///
/// The content is staged in a temporary file in `dir` and persisted over the
/// target, so readers only ever observe a complete document. On unix the
/// document ends up with mode 0644.
pub fn write_document(dir: &Path, html: &str) -> Result<PathBuf> {
    let target = dir.join(INDEX_FILE_NAME);

    let mut temp_file = TempFileBuilder::new()
        .prefix(".slidev-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| SlidevError::io(dir, e))?;

    temp_file
        .write_all(html.as_bytes())
        .map_err(|e| SlidevError::io(temp_file.path(), e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|e| SlidevError::io(temp_file.path(), e))?;
    }

    temp_file
        .persist(&target)
        .map_err(|e| SlidevError::io(&target, e.error))?;

    debug!("wrote {} bytes to {}", html.len(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_has_exactly_one_marker() {
        assert_eq!(DEFAULT_TEMPLATE.matches(MARKER).count(), 1);
        assert!(Template::default().has_marker());
    }

    #[test]
    fn every_marker_is_replaced() {
        let template = Template::new("<a>{markdown_content}</a><b>{markdown_content}</b>");
        assert_eq!(template.render("hi"), "<a>hi</a><b>hi</b>");
    }

    #[test]
    fn markdown_is_not_escaped() {
        let html = render("<script>alert(1)</script> & more", None);
        assert!(html.contains("<script>alert(1)</script> & more"));
    }

    #[test]
    fn markdown_containing_the_marker_is_inserted_verbatim() {
        let template = Template::new("[{markdown_content}]");
        assert_eq!(
            template.render("{markdown_content}"),
            "[{markdown_content}]"
        );
    }

    #[test]
    fn from_str_keeps_the_source() {
        let template: Template = "<p>{markdown_content}</p>".parse().unwrap();
        assert_eq!(template.as_str(), "<p>{markdown_content}</p>");
    }
}
