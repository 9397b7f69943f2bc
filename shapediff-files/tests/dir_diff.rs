//! Directory reconciliation and routing through `diff_dirs`.

use std::fs;
use std::path::{Path, PathBuf};

use rstest::rstest;
use serde_yaml::Value;
use shapediff_core::IgnorePaths;
use shapediff_files::{
    diff_dirs, DecryptError, DiffConfig, DiffDirsOptions, DiffError, FileIgnore, SopsLoader,
};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Trees {
    _root: TempDir,
    left: PathBuf,
    right: PathBuf,
}

fn trees(left: &[(&str, &str)], right: &[(&str, &str)]) -> Trees {
    let root = TempDir::new().expect("tempdir");
    let left_dir = root.path().join("left");
    let right_dir = root.path().join("right");
    fs::create_dir_all(&left_dir).expect("mkdir left");
    fs::create_dir_all(&right_dir).expect("mkdir right");
    for (name, content) in left {
        write(&left_dir, name, content);
    }
    for (name, content) in right {
        write(&right_dir, name, content);
    }
    Trees {
        _root: root,
        left: left_dir,
        right: right_dir,
    }
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write fixture");
}

/// Decrypts by parsing the file as plain YAML, so fixtures stay readable.
fn fake_sops(path: &Path) -> Result<Value, DecryptError> {
    let content = fs::read_to_string(path).map_err(|e| DecryptError::Other(e.to_string()))?;
    Ok(serde_yaml::from_str(&content)?)
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

#[test]
fn same_structure_has_no_differences() {
    let t = trees(
        &[("file1.yml", "hello: world"), ("file2.yml", "hello: world")],
        &[("file1.yml", "hello: there"), ("file2.yml", "hello: world")],
    );
    let d = diff_dirs(&t.left, &t.right, &DiffDirsOptions::new()).expect("diff");
    assert!(d.is_empty(), "{d:?}");
}

#[test]
fn extra_left_file_is_missing_on_right() {
    let t = trees(
        &[("file1.yml", "hello: world"), ("file2.yml", "hello: world")],
        &[("file1.yml", "hello: world")],
    );
    let d = diff_dirs(&t.left, &t.right, &DiffDirsOptions::new()).expect("diff");
    assert_eq!(d.len(), 1);
    assert_eq!(
        d[0].message,
        format!("File '{}' does not exist", t.right.join("file2.yml").display())
    );
}

#[test]
fn extra_right_file_is_missing_on_left() {
    let t = trees(
        &[("file1.yml", "hello: world")],
        &[("file1.yml", "hello: world"), ("file2.yml", "hello: world")],
    );
    let d = diff_dirs(&t.left, &t.right, &DiffDirsOptions::new()).expect("diff");
    assert_eq!(d.len(), 1);
    assert_eq!(
        d[0].message,
        format!("File '{}' does not exist", t.left.join("file2.yml").display())
    );
}

#[test]
fn structural_difference_names_file() {
    let t = trees(
        &[("file1.yml", "hello: world")],
        &[("file1.yml", "hello: world\nextra: prop")],
    );
    let d = diff_dirs(&t.left, &t.right, &DiffDirsOptions::new()).expect("diff");
    assert_eq!(
        d[0].message,
        format!(
            "Property 'extra' is missing in '{}'",
            t.left.join("file1.yml").display()
        )
    );
}

#[test]
fn nested_files_are_paired_by_relative_name() {
    let t = trees(
        &[("env/app.yml", "a: 1"), ("env/db.yml", "b: 1")],
        &[("env/app.yml", "a: 2"), ("env/db.yml", "c: 1")],
    );
    let d = diff_dirs(&t.left, &t.right, &DiffDirsOptions::new()).expect("diff");
    let paths: Vec<_> = d.iter().filter_map(|d| d.property_path.as_deref()).collect();
    assert_eq!(paths, ["b", "b", "c"]);
}

#[test]
fn missing_left_root_reports_every_right_file() {
    let t = trees(&[], &[("a.yml", "a: 1"), ("b.yml", "b: 1")]);
    fs::remove_dir_all(&t.left).expect("rm left");
    let d = diff_dirs(&t.left, &t.right, &DiffDirsOptions::new()).expect("diff");
    assert_eq!(d.len(), 2);
    assert!(d.iter().all(|d| d.message.ends_with("does not exist")));
}

#[test]
fn one_bad_file_does_not_stop_the_scan() {
    let t = trees(
        &[("a.yml", "a: [broken"), ("b.yml", "b: 1")],
        &[("a.yml", "a: 1"), ("b.yml", "c: 1")],
    );
    let d = diff_dirs(&t.left, &t.right, &DiffDirsOptions::new()).expect("diff");
    assert!(d[0].message.starts_with("Loading yaml from"));
    assert!(d.iter().any(|d| d.property_path.as_deref() == Some("c")));
}

// ---------------------------------------------------------------------------
// Globs
// ---------------------------------------------------------------------------

#[rstest]
#[case("*.yml", 0)]
#[case("**/*", 1)]
fn file_name_glob_narrows_both_sides(#[case] pattern: &str, #[case] expected: usize) {
    let t = trees(
        &[("app.yml", "a: 1"), ("notes.txt", "x: 1")],
        &[("app.yml", "a: 1")],
    );
    let options = DiffDirsOptions::new().file_name_glob(pattern);
    let d = diff_dirs(&t.left, &t.right, &options).expect("diff");
    assert_eq!(d.len(), expected);
}

#[test]
fn invalid_glob_is_a_hard_failure() {
    let t = trees(&[], &[]);
    let options = DiffDirsOptions::new().file_name_glob("[");
    let err = diff_dirs(&t.left, &t.right, &options).expect_err("bad glob");
    assert!(matches!(err, DiffError::Pattern { .. }));
}

// ---------------------------------------------------------------------------
// Ignore policy
// ---------------------------------------------------------------------------

#[test]
fn wholly_ignored_file_is_skipped() {
    let t = trees(
        &[("file1.yml", "hello: world")],
        &[("file1.yml", "hello: world\nextra: prop")],
    );
    let options = DiffDirsOptions::new().ignore_with(|_| FileIgnore::All);
    assert!(diff_dirs(&t.left, &t.right, &options).expect("diff").is_empty());
}

#[test]
fn ignored_left_only_file_is_skipped() {
    let t = trees(&[("file1.yml", "hello: world")], &[]);
    let options = DiffDirsOptions::new().ignore_with(|_| FileIgnore::All);
    assert!(diff_dirs(&t.left, &t.right, &options).expect("diff").is_empty());
}

#[test]
fn ignored_right_only_file_is_skipped() {
    let t = trees(&[], &[("file1.yml", "hello: world")]);
    let options = DiffDirsOptions::new().ignore_with(|_| FileIgnore::All);
    assert!(diff_dirs(&t.left, &t.right, &options).expect("diff").is_empty());
}

#[test]
fn ignore_paths_apply_to_their_file_only() {
    let t = trees(
        &[("a.yml", "x: 1"), ("b.yml", "x: 1")],
        &[("a.yml", "x: s"), ("b.yml", "x: s")],
    );
    let options = DiffDirsOptions::new().ignore_with(|name| {
        if name == "a.yml" {
            FileIgnore::Paths(["x"].into_iter().collect::<IgnorePaths>())
        } else {
            FileIgnore::default()
        }
    });
    let d = diff_dirs(&t.left, &t.right, &options).expect("diff");
    assert_eq!(d.len(), 1);
    assert!(d[0].message.contains("b.yml"));
}

#[test]
fn config_file_drives_policy() {
    let t = trees(
        &[("app.yml", "db:\n  password: x"), ("generated/out.yml", "a: 1")],
        &[("app.yml", "db:\n  password: 1"), ("generated/out.yml", "b: 1")],
    );
    let config: DiffConfig = serde_yaml::from_str(
        "ignore:\n  - file: \"generated/**\"\n    all: true\n  - file: app.yml\n    paths: [db.password]\n",
    )
    .expect("config");
    let options = config.to_options().expect("options");
    assert!(diff_dirs(&t.left, &t.right, &options).expect("diff").is_empty());
}

// ---------------------------------------------------------------------------
// Secret routing
// ---------------------------------------------------------------------------

#[test]
fn secret_files_use_secret_loader() {
    let t = trees(
        &[("file1.sops.yml", "hello: world")],
        &[("file1.sops.yml", "hello: 5")],
    );
    let options = DiffDirsOptions::new()
        .secret_files_glob("**/*.sops.yml")
        .secret_loader(SopsLoader::new(fake_sops));
    let d = diff_dirs(&t.left, &t.right, &options).expect("diff");
    assert_eq!(
        d[0].message,
        format!(
            "Values are of different types (string in '{}', number in '{}')",
            t.left.join("file1.sops.yml").display(),
            t.right.join("file1.sops.yml").display()
        )
    );
}

#[test]
fn non_secret_files_never_reach_secret_loader() {
    let t = trees(&[("plain.yml", "a: 1")], &[("plain.yml", "a: 2")]);
    let refuse = |_: &Path| -> Result<Value, DecryptError> {
        Err(DecryptError::Other("should not decrypt".to_string()))
    };
    let options = DiffDirsOptions::new()
        .secret_files_glob("**/*.sops.yml")
        .secret_loader(SopsLoader::new(refuse));
    assert!(diff_dirs(&t.left, &t.right, &options).expect("diff").is_empty());
}

#[test]
fn secret_decrypt_failure_is_reported_per_file() {
    let t = trees(
        &[("s.sops.yml", "a: 1"), ("plain.yml", "a: 1")],
        &[("s.sops.yml", "a: 1"), ("plain.yml", "a: 1")],
    );
    let refuse = |_: &Path| -> Result<Value, DecryptError> {
        Err(DecryptError::Other("no key".to_string()))
    };
    let options = DiffDirsOptions::new()
        .secret_files_glob("*.sops.yml")
        .secret_loader(SopsLoader::new(refuse));
    let d = diff_dirs(&t.left, &t.right, &options).expect("diff");
    assert_eq!(d.len(), 2);
    assert!(d
        .iter()
        .all(|d| d.message.starts_with("Loading sops file from") && d.message.ends_with("no key")));
}
