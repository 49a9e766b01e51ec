//! Runs the built binary against temporary projects.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn design_lint(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_design-lint"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("DESIGN_LINT_CONFIG")
        .env_remove("DESIGN_LINT_ALLOWLIST")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write(root: &Path, file: &str, content: &str) {
    let path = root.join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn list_rules_shows_rules_and_codemods() {
    let tmp = TempDir::new().unwrap();
    let output = design_lint(tmp.path(), &["list-rules"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("DL001"));
    assert!(out.contains("no-arbitrary-values"));
    assert!(out.contains("remove-local-designTokens"));
}

#[test]
fn check_fails_on_errors() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "components/Hero.tsx", "export const accent = \"#0ea5e9\";\n");

    let output = design_lint(tmp.path(), &["check", "--format", "compact"]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 1, "{out}");
    assert!(out.contains("[DL001]"));
}

#[test]
fn project_allowlist_is_picked_up() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "components/Hero.tsx", "export const accent = \"#0ea5e9\";\n");
    write(
        tmp.path(),
        ".design-lint-allowlist.json",
        r#"{ "paths": ["components/Hero.tsx"] }"#,
    );

    let output = design_lint(tmp.path(), &["check", "--format", "json"]);
    assert!(output.status.success(), "{}", stdout(&output));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["violations"].as_array().unwrap().len(), 0);
}

#[test]
fn malformed_config_aborts_check() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "components/Hero.tsx", "export {};\n");
    write(tmp.path(), "design-lint.config.json", "{ not json");

    let output = design_lint(tmp.path(), &["check"]);
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("design-lint.config.json"), "{err}");
}

#[test]
fn codemod_dry_run_leaves_files() {
    let tmp = TempDir::new().unwrap();
    let code = "export const ok = \"#22c55e\";\n";
    write(tmp.path(), "components/Status.tsx", code);

    let output = design_lint(tmp.path(), &["codemod", "--dry"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "[hex-to-semantic] would update components/Status.tsx\n\n1 files would be updated.\n"
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("components/Status.tsx")).unwrap(),
        code
    );
}

#[test]
fn unknown_codemod_exits_with_error() {
    let tmp = TempDir::new().unwrap();
    let output = design_lint(tmp.path(), &["codemod", "--only", "nope"]);
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("codemod failed: unknown codemod 'nope'"), "{err}");
}

#[test]
fn invalid_include_glob_exits_with_prefixed_error() {
    let tmp = TempDir::new().unwrap();
    let output = design_lint(tmp.path(), &["codemod", "--include", "app/[.tsx"]);
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("codemod failed: invalid glob pattern 'app/[.tsx'"), "{err}");
}

#[test]
fn brace_include_glob_collects_ts_files() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "app/theme.ts", "export const ok = \"#22c55e\";\n");

    let output = design_lint(tmp.path(), &["codemod", "--dry", "--include", "app/**/*.{ts,tsx}"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "[hex-to-semantic] would update app/theme.ts\n\n1 files would be updated.\n"
    );
}

#[test]
fn guard_fails_on_raw_values_in_guarded_dirs() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "components/sections/Hero.tsx", "<div className=\"w-[742px] text-[#fff]\" />\n");
    write(tmp.path(), "components/ui/Card.tsx", "const c = \"#123456\";\n");

    let output = design_lint(tmp.path(), &["guard"]);
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("- [arbitrary] [742px -> components/sections/Hero.tsx"), "{err}");
    assert!(err.contains("- [arbitrary] [#fff -> components/sections/Hero.tsx"), "{err}");
    assert!(!err.contains("[hex]"), "{err}");
    assert!(!err.contains("Card.tsx"), "{err}");
}

#[test]
fn guard_passes_clean_tree() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "components/pricing/Plan.tsx", "<p className=\"text-fg bg-black\" />\n");

    let output = design_lint(tmp.path(), &["guard"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Design lint guard passed"));

    let custom = design_lint(tmp.path(), &["guard", "--dir", "components/ui"]);
    assert!(custom.status.success());
}

#[test]
fn init_writes_starter_files() {
    let tmp = TempDir::new().unwrap();
    let output = design_lint(tmp.path(), &["init"]);
    assert!(output.status.success());
    assert!(tmp.path().join("design-lint.config.json").exists());
    assert!(tmp.path().join(".design-lint-allowlist.json").exists());

    let again = design_lint(tmp.path(), &["init"]);
    assert!(!again.status.success());
}
