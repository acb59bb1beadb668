use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "src/main.go", "package main\n");
    write(tmp.path(), "src/util/strings.go", "package util\n");
    write(tmp.path(), "src/util/README.md", "utility notes\n");
    write(tmp.path(), "scripts/build.sh", "echo build\n");
    tmp
}

fn xprompt(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("xprompt").unwrap();
    cmd.env_remove("PROJECT_ROOT").current_dir(root);
    cmd
}

#[test]
fn generate_prints_files_under_comment_headers() {
    let tmp = project();
    xprompt(tmp.path())
        .args(["generate", "src/.../*.go", "scripts/*.sh", "--disable-config-file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("// file: src/main.go\npackage main\n\n"))
        .stdout(predicate::str::contains("// file: src/util/strings.go\npackage util\n\n"))
        .stdout(predicate::str::contains("# file: scripts/build.sh\necho build\n\n"))
        .stdout(predicate::str::contains("utility notes").not());
}

#[test]
fn generate_accepts_explicit_project_root() {
    let tmp = project();
    let elsewhere = tempdir().unwrap();
    xprompt(elsewhere.path())
        .arg("g")
        .arg("--project-root")
        .arg(tmp.path())
        .args(["--disable-config-file", "src/*.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("// file: src/main.go"));
}

#[test]
fn exclude_flag_removes_files() {
    let tmp = project();
    xprompt(tmp.path())
        .args(["g", "src/...", "-e", "**/*.md", "--disable-config-file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("package util"))
        .stdout(predicate::str::contains("utility notes").not());
}

#[test]
fn no_matches_exits_with_code_4() {
    let tmp = project();
    xprompt(tmp.path())
        .args(["g", "*.nothing", "missing/...", "--disable-config-file"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains(
            "no files matched the provided patterns",
        ));
}

#[test]
fn malformed_include_exits_with_code_3() {
    let tmp = project();
    xprompt(tmp.path())
        .args(["g", "src/[oops", "--disable-config-file"])
        .assert()
        .code(3);
}

#[test]
fn missing_patterns_is_an_argument_error() {
    let tmp = project();
    xprompt(tmp.path())
        .args(["g", "--disable-config-file"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("No include patterns given"));
}

#[test]
fn base_prompt_precedes_the_document() {
    let tmp = project();
    xprompt(tmp.path())
        .args([
            "g",
            "src/main.go",
            "--prompt",
            "Check this code.",
            "--disable-config-file",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Check this code.\n\n// file: src/main.go\n",
        ));
}

#[test]
fn unknown_prompt_name_is_a_config_error() {
    let tmp = project();
    xprompt(tmp.path())
        .args(["g", "src/main.go", "--prompt-name", "does-not-exist", "--disable-config-file"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn output_flag_writes_file() {
    let tmp = project();
    let out = tmp.path().join("out/prompt.txt");
    xprompt(tmp.path())
        .args(["g", "src/main.go", "--disable-config-file", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let written = fs::read_to_string(out).unwrap();
    assert_eq!(written, "// file: src/main.go\npackage main\n\n\n");
}

#[test]
fn non_utf8_file_is_written_to_stdout_unchanged() {
    let tmp = project();
    fs::write(tmp.path().join("legacy.txt"), b"na\xefve\n").unwrap();
    let output = xprompt(tmp.path())
        .args(["g", "legacy.txt", "--disable-config-file"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(output, b"// file: legacy.txt\nna\xefve\n\n\n");
}

#[test]
fn config_file_supplies_default_patterns() {
    let tmp = project();
    write(
        tmp.path(),
        ".xtools/xprompt/xprompt.toml",
        "[filters]\ninclude = [\"src/...\"]\nexclude = [\"**/*.md\"]\n\n[prompt]\ntext = \"From config.\"\n",
    );
    xprompt(tmp.path())
        .arg("g")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("From config.\n\n"))
        .stdout(predicate::str::contains("package util"))
        .stdout(predicate::str::contains("utility notes").not());
}

#[test]
fn invalid_config_file_exits_with_code_1() {
    let tmp = project();
    write(tmp.path(), ".xtools/xprompt/xprompt.toml", "[filters]\nincludes = 3\n");
    xprompt(tmp.path())
        .args(["g", "src/main.go"])
        .assert()
        .code(1);
}

#[test]
fn stats_go_to_stderr() {
    let tmp = project();
    xprompt(tmp.path())
        .args(["g", "src/...", "--stats", "--disable-config-file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Est. Tokens").not())
        .stderr(predicate::str::contains("Est. Tokens"))
        .stderr(predicate::str::contains("Files:"));
}

#[test]
fn debug_reports_pattern_styles_as_json() {
    let tmp = project();
    xprompt(tmp.path())
        .args([
            "debug",
            "src/**/*.go",
            "scripts/...",
            "-e",
            "*.sh",
            "-f",
            "json",
            "--disable-config-file",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"recursive-wildcard\""))
        .stdout(predicate::str::contains("\"prefix-filter\""))
        .stdout(predicate::str::contains("\"selected_files\""))
        .stdout(predicate::str::contains("src/util/strings.go"));
}

#[test]
fn show_prompts_lists_predefined_prompts() {
    let tmp = project();
    xprompt(tmp.path())
        .args(["show", "prompts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("review"));
}

#[test]
fn config_prints_default_toml() {
    let tmp = project();
    xprompt(tmp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[diff]"))
        .stdout(predicate::str::contains("base_branch = \"main\""));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let tmp = project();
    xprompt(tmp.path())
        .args(["config", "--init"])
        .assert()
        .success();
    assert!(tmp.path().join(".xtools/xprompt/xprompt.toml").exists());
    xprompt(tmp.path())
        .args(["config", "--init"])
        .assert()
        .code(6);
}

#[test]
fn completion_writes_script_to_stdout() {
    let tmp = project();
    xprompt(tmp.path())
        .args(["completion", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xprompt"));
}
