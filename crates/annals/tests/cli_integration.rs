//! End-to-end CLI integration tests.
//!
//! These tests build small git repositories in temporary directories, run
//! the `annals` binary against them and check what it prints or writes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn annals(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_annals"));
    cmd.current_dir(dir).env_remove("ANNALS_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Runs git in `dir`, optionally pinning the commit dates.
fn git(dir: &Path, args: &[&str], date: Option<&str>) {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir).args([
        "-c",
        "user.name=Test User",
        "-c",
        "user.email=test@example.com",
        "-c",
        "commit.gpgsign=false",
        "-c",
        "tag.gpgsign=false",
    ]);
    cmd.args(args);
    if let Some(date) = date {
        cmd.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
    }

    let output = cmd.output().expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Creates `root/name` as a repository with a two-release changelog and a
/// tag on the first release.
fn create_repo(root: &Path, name: &str) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("failed to create repo dir");
    git(&dir, &["init", "--quiet"], None);

    fs::write(dir.join("changelog.md"), "# 1.0.0\n\nFirst release\n").unwrap();
    git(&dir, &["add", "."], None);
    git(
        &dir,
        &["commit", "--quiet", "-m", "Release 1.0.0"],
        Some("2023-01-01T10:00:00+0000"),
    );
    git(&dir, &["tag", "v1.0.0"], None);

    fs::write(
        dir.join("changelog.md"),
        "# 2.0.0\n\n## Added\n\n- Feeds\n\n# 1.0.0\n\nFirst release\n",
    )
    .unwrap();
    fs::write(dir.join("README.md"), "# Fancy App\n\nDocs.\n").unwrap();
    git(&dir, &["add", "."], None);
    git(
        &dir,
        &["commit", "--quiet", "-m", "Release 2.0.0"],
        Some("2024-01-01T10:00:00+0000"),
    );

    dir
}

fn write_config(root: &Path, body: &str) -> PathBuf {
    let path = root.join("annals.toml");
    let cache = root.join("cache");
    let content = format!("[sync]\ncache_dir = '{}'\n\n{body}", cache.display());
    fs::write(&path, content).expect("failed to write config");
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("failed to run annals");
    assert!(
        output.status.success(),
        "annals failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    annals(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created annals.toml"));

    let content = fs::read_to_string(temp.path().join("annals.toml")).unwrap();
    assert!(content.contains("[history]"));
    assert!(content.contains("[rss]"));
}

#[test]
fn test_init_requires_force() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("annals.toml"), "# old config\n").unwrap();

    annals(temp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    annals(temp.path()).args(["init", "--force"]).assert().success();

    let content = fs::read_to_string(temp.path().join("annals.toml")).unwrap();
    assert!(!content.contains("# old config"));
}

#[test]
fn test_render_changelog_history() {
    let temp = TempDir::new().unwrap();
    let repo = create_repo(temp.path(), "app");
    let config = write_config(
        temp.path(),
        &format!("[history]\nrepos = ['{}']\n", repo.display()),
    );

    let out = stdout_of(annals(temp.path()).arg("-c").arg(&config).arg("render"));

    let newer = format!("# [2024-01-01] [app]({}) 2.0.0", repo.display());
    let older = format!("# [2023-01-01] [app]({}) 1.0.0", repo.display());
    let newer_at = out.find(&newer).expect("2.0.0 heading missing");
    let older_at = out.find(&older).expect("1.0.0 heading missing");
    assert!(newer_at < older_at, "releases are not newest first:\n{out}");
    assert!(out.contains("\n## Added\n"));
    assert!(out.contains("\nFirst release\n"));
}

#[test]
fn test_render_flags_override_config() {
    let temp = TempDir::new().unwrap();
    let repo = create_repo(temp.path(), "app");
    let config = write_config(temp.path(), "[history]\nrepos = []\n");

    let out = stdout_of(
        annals(temp.path())
            .arg("-c")
            .arg(&config)
            .args(["render", "--from", "tags", "--repo"])
            .arg(&repo),
    );

    assert!(out.starts_with("# [2023-01-01] [app]"), "unexpected output:\n{out}");
    assert!(out.contains(" v1.0.0\n"));
    assert!(!out.contains("2.0.0"));
}

#[test]
fn test_render_readme_naming_and_limit() {
    let temp = TempDir::new().unwrap();
    let repo = create_repo(temp.path(), "app");
    let config = write_config(
        temp.path(),
        &format!(
            "[history]\nrepos = ['{}']\nname_from_readme = true\ntarget_heading_template = '%repo% %version%'\n",
            repo.display()
        ),
    );

    let out = stdout_of(
        annals(temp.path())
            .arg("-c")
            .arg(&config)
            .args(["render", "--limit", "1"]),
    );

    assert!(out.starts_with("# Fancy App 2.0.0\n"), "unexpected output:\n{out}");
    assert!(!out.contains("1.0.0"));
}

#[test]
fn test_render_writes_output_and_feed() {
    let temp = TempDir::new().unwrap();
    let repo = create_repo(temp.path(), "app");
    let config = write_config(
        temp.path(),
        &format!(
            "[history]\nrepos = ['{}']\n\n[rss]\nenabled = true\nlink = 'https://docs.example.com'\n",
            repo.display()
        ),
    );
    fs::create_dir_all(temp.path().join("site")).unwrap();

    annals(temp.path())
        .arg("-c")
        .arg(&config)
        .args(["render", "-o", "site/history.md"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let history = fs::read_to_string(temp.path().join("site/history.md")).unwrap();
    assert!(history.contains("2.0.0"));

    let feed = fs::read_to_string(temp.path().join("site/rss.xml")).unwrap();
    assert!(feed.contains("<rss version=\"2.0\""));
    assert_eq!(feed.matches("<item>").count(), 2);
    assert!(feed.contains("<title>app 2.0.0</title>"));
    assert!(feed.contains("https://docs.example.com/rss.xml"));
}

#[test]
fn test_failing_repo_is_skipped() {
    let temp = TempDir::new().unwrap();
    let repo = create_repo(temp.path(), "app");
    let missing = temp.path().join("missing");
    let config = write_config(
        temp.path(),
        &format!(
            "[history]\nrepos = ['{}', '{}']\n",
            missing.display(),
            repo.display()
        ),
    );

    annals(temp.path())
        .arg("-c")
        .arg(&config)
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("2.0.0"))
        .stderr(predicate::str::contains("1 of 2 repositories failed"));
}

#[test]
fn test_strict_run_fails() {
    let temp = TempDir::new().unwrap();
    let repo = create_repo(temp.path(), "app");
    let missing = temp.path().join("missing");
    let config = write_config(
        temp.path(),
        &format!(
            "[history]\nstrict = true\nrepos = ['{}', '{}']\n",
            repo.display(),
            missing.display()
        ),
    );

    annals(temp.path())
        .arg("-c")
        .arg(&config)
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_apply_replaces_directives() {
    let temp = TempDir::new().unwrap();
    let repo = create_repo(temp.path(), "app");
    let config = write_config(temp.path(), "");

    let docs = temp.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    let page = docs.join("releases.md");
    fs::write(
        &page,
        format!(
            "# Releases\n\n<history repos=\"{}\" limit=\"1\" rss=\"true\" />\n\nEnd.\n",
            repo.display()
        ),
    )
    .unwrap();
    fs::write(docs.join("other.md"), "No directives here.\n").unwrap();

    annals(temp.path())
        .arg("-c")
        .arg(&config)
        .arg("apply")
        .arg(&docs)
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 1 file(s)"));

    let content = fs::read_to_string(&page).unwrap();
    assert!(content.starts_with("# Releases\n\n# [2024-01-01] [app]"));
    assert!(content.ends_with("\nEnd.\n"));
    assert!(!content.contains("<history"));
    assert!(!content.contains("1.0.0"));
    assert_eq!(
        fs::read_to_string(docs.join("other.md")).unwrap(),
        "No directives here.\n"
    );

    // The feed is not bound by the history limit.
    let feed = fs::read_to_string(docs.join("rss.xml")).unwrap();
    assert_eq!(feed.matches("<item>").count(), 2);
}

#[test]
fn test_records_json() {
    let temp = TempDir::new().unwrap();
    let repo = create_repo(temp.path(), "app");
    let config = write_config(
        temp.path(),
        &format!("[history]\nrepos = ['{}']\n", repo.display()),
    );

    let out = stdout_of(
        annals(temp.path())
            .arg("-c")
            .arg(&config)
            .args(["records", "--pretty"]),
    );

    let records: serde_json::Value = serde_json::from_str(&out).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["version"], "2.0.0");
    assert_eq!(records[0]["repo_name"], "app");
    assert_eq!(records[0]["date"], "2024-01-01 10:00:00 +0000");
    assert_eq!(records[1]["description"], "First release");
}

/// Reads the records JSON for a config selecting `from` on `repo`.
fn records_of(root: &Path, repo: &Path, extra: &str) -> Vec<serde_json::Value> {
    let config = write_config(
        root,
        &format!("[history]\nrepos = ['{}']\n{extra}", repo.display()),
    );
    let out = stdout_of(annals(root).arg("-c").arg(&config).arg("records"));
    let records: serde_json::Value = serde_json::from_str(&out).unwrap();
    records.as_array().unwrap().clone()
}

#[test]
fn test_annotated_tag_record() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("tagged");
    fs::create_dir_all(&dir).unwrap();
    git(&dir, &["init", "--quiet"], None);
    fs::write(dir.join("main.rs"), "fn main() {}\n").unwrap();
    git(&dir, &["add", "."], None);
    git(
        &dir,
        &["commit", "--quiet", "-m", "Initial"],
        Some("2022-12-01T08:00:00+0000"),
    );
    git(
        &dir,
        &["tag", "-a", "v1.0.0", "-m", "Fixes bug"],
        Some("2023-01-01T09:30:00+0000"),
    );

    let records = records_of(temp.path(), &dir, "from = 'tags'\n");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["version"], "v1.0.0");
    assert_eq!(records[0]["date"], "2023-01-01 09:30:00 +0000");
    assert_eq!(records[0]["description"], "Fixes bug");
}

/// Creates a repository whose history is two commits joined by a merge.
fn create_merge_repo(root: &Path) -> PathBuf {
    let dir = root.join("merged");
    fs::create_dir_all(&dir).unwrap();
    git(&dir, &["init", "--quiet"], None);

    fs::write(dir.join("a.txt"), "a\n").unwrap();
    git(&dir, &["add", "."], None);
    git(
        &dir,
        &["commit", "--quiet", "-m", "Add a"],
        Some("2023-01-01T10:00:00+0000"),
    );

    git(&dir, &["checkout", "--quiet", "-b", "feature"], None);
    fs::write(dir.join("b.txt"), "b\n").unwrap();
    git(&dir, &["add", "."], None);
    git(
        &dir,
        &["commit", "--quiet", "-m", "Add b"],
        Some("2023-02-01T10:00:00+0000"),
    );

    git(&dir, &["checkout", "--quiet", "-"], None);
    git(
        &dir,
        &["merge", "--no-ff", "--quiet", "-m", "Merge feature", "feature"],
        Some("2023-03-01T10:00:00+0000"),
    );

    dir
}

#[test]
fn test_merge_commits_switch() {
    let temp = TempDir::new().unwrap();
    let repo = create_merge_repo(temp.path());

    let without = records_of(temp.path(), &repo, "from = 'commits'\nmerge_commits = false\n");
    assert_eq!(without.len(), 2);
    assert!(without.iter().all(|r| r["description"] != "Merge feature"));

    let with = records_of(temp.path(), &repo, "from = 'commits'\nmerge_commits = true\n");
    assert_eq!(with.len(), 3);
    assert_eq!(with[0]["description"], "Merge feature");
    assert_eq!(with[0]["date"], "2023-03-01 10:00:00 +0000");
}

#[test]
fn test_user_git_config_does_not_change_log_shape() {
    let temp = TempDir::new().unwrap();
    let repo = create_repo(temp.path(), "app");
    let home = temp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    fs::write(
        home.join(".gitconfig"),
        "[log]\n\tabbrevCommit = true\n\tdecorate = full\n[format]\n\tpretty = oneline\n",
    )
    .unwrap();
    let config = write_config(
        temp.path(),
        &format!("[history]\nfrom = 'commits'\nrepos = ['{}']\n", repo.display()),
    );

    let out = stdout_of(
        annals(temp.path())
            .env("HOME", &home)
            .arg("-c")
            .arg(&config)
            .arg("records"),
    );

    let records: serde_json::Value = serde_json::from_str(&out).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["description"], "Release 2.0.0");
    assert_eq!(records[1]["date"], "2023-01-01 10:00:00 +0000");
}
