//! The slidev command-line executable.

mod app;
mod cli;
mod webview;

fn main() -> anyhow::Result<()> {
    app::run()
}
