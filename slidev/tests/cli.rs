use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use insta::assert_snapshot;
use predicates::prelude::*;
use regex::Regex;
use rstest::rstest;

fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Replaces the version number (e.g., "0.1.0") in a string with a static placeholder.
fn redact_version(text: &str) -> String {
    let re = Regex::new(r"\d+\.\d+\.\d+").unwrap();
    re.replace_all(text, "[VERSION]").to_string()
}

/// Lays out a minimal reveal.js bundle and a deck next to it.
fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    temp.child("bundle/dist/reveal.js")
        .write_str("// reveal")
        .unwrap();
    temp.child("bundle/dist/reveal.css")
        .write_str(".reveal {}")
        .unwrap();
    temp.child("bundle/plugin/markdown/markdown.js")
        .write_str("// markdown")
        .unwrap();
    temp.child("deck.md")
        .write_str("# Title\n---\n# Slide 2")
        .unwrap();
    temp
}

fn render_cmd(temp: &TempDir) -> Command {
    let mut cmd = cmd();
    cmd.arg(temp.child("deck.md").path())
        .arg("--assets")
        .arg(temp.child("bundle").path())
        .arg("--cache-dir")
        .arg(temp.child("cache").path())
        .arg("--no-window");
    cmd
}

#[test]
fn version_flag() {
    let output = cmd().arg("--version").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_snapshot!("version", redact_version(&stdout));
}

#[test]
fn file_argument_is_required() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("<FILE>"));
}

#[test]
fn renders_deck_into_cache_and_prints_index_path() {
    let temp = workspace();

    render_cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::ends_with("index.html\n"));

    let index = temp.child("cache/reveal.js/index.html");
    index.assert(predicate::str::contains(
        "<textarea data-template>\n# Title\n---\n# Slide 2\n",
    ));
    index.assert(predicate::str::contains(r#"src="dist/reveal.js""#));
    index.assert(predicate::str::contains(r#"src="plugin/markdown/markdown.js""#));
    temp.child("cache/reveal.js/dist/reveal.css").assert(".reveal {}");
}

#[test]
fn custom_template_is_used() {
    let temp = workspace();
    temp.child("slides.html")
        .write_str("<main>{markdown_content}</main>")
        .unwrap();

    render_cmd(&temp)
        .arg("--tmpl")
        .arg(temp.child("slides.html").path())
        .assert()
        .success();

    temp.child("cache/reveal.js/index.html").assert("<main># Title\n---\n# Slide 2</main>");
}

#[test]
fn template_without_marker_is_copied_verbatim() {
    let temp = workspace();
    temp.child("static.html")
        .write_str("<p>no slides here</p>")
        .unwrap();

    render_cmd(&temp)
        .arg("-t")
        .arg(temp.child("static.html").path())
        .assert()
        .success();

    temp.child("cache/reveal.js/index.html").assert("<p>no slides here</p>");
}

#[test]
fn missing_markdown_file_fails() {
    let temp = workspace();

    cmd()
        .arg(temp.child("missing.md").path())
        .arg("--assets")
        .arg(temp.child("bundle").path())
        .arg("--cache-dir")
        .arg(temp.child("cache").path())
        .arg("--no-window")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read markdown file"));
}

#[test]
fn missing_assets_fail_on_first_run() {
    let temp = workspace();

    cmd()
        .arg(temp.child("deck.md").path())
        .arg("--assets")
        .arg(temp.child("nowhere").path())
        .arg("--cache-dir")
        .arg(temp.child("cache").path())
        .arg("--no-window")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bundled asset directory not found"));
}

#[test]
fn presence_policy_keeps_stale_cache() {
    let temp = workspace();
    render_cmd(&temp).assert().success();

    temp.child("bundle/dist/reveal.js")
        .write_str("// reveal 5")
        .unwrap();
    render_cmd(&temp)
        .args(["--cache-policy", "presence"])
        .assert()
        .success();
    temp.child("cache/reveal.js/dist/reveal.js").assert("// reveal");

    render_cmd(&temp).assert().success();
    temp.child("cache/reveal.js/dist/reveal.js").assert("// reveal 5");
}

#[rstest]
#[case::zero_width(&["-w", "0"])]
#[case::zero_height(&["--height", "0"])]
fn zero_sized_window_is_rejected(#[case] args: &[&str]) {
    let temp = workspace();

    render_cmd(&temp)
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid window geometry"));
}

#[test]
fn unknown_cache_policy_is_rejected() {
    let temp = workspace();

    render_cmd(&temp)
        .args(["--cache-policy", "never"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'never'"));
}
