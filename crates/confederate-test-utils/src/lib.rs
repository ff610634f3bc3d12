//! Test utilities for Confederate crates.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// File name used by [`write_spec`].
pub const SPEC_FILE: &str = "confederacy.xml";

/// Template referenced by [`sample_spec`].
pub const SAMPLE_TEMPLATE: &str = "README.template";

/// Contents written for [`SAMPLE_TEMPLATE`] by [`write_sample_templates`].
pub const SAMPLE_TEMPLATE_CONTENT: &str = "# {{project.id}}\n\nLanguage: {{language}}\n";

/// A prototype `base` and two projects inheriting from it.
///
/// `demo` overrides `language`; `tools` keeps the inherited value.
pub fn sample_spec() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<confederacy>
  <prototypes>
    <project name="base" language="java">
      <constituents>
        <template source="README.template" destination="README.md"/>
      </constituents>
    </project>
  </prototypes>
  <projects>
    <project name="demo" prototype="base" language="python"/>
    <project name="tools" prototype="base"/>
  </projects>
</confederacy>
"#
}

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary file with given content.
pub fn temp_file(content: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = write_file(dir.path(), "test_file", content);
    (dir, path)
}

/// Writes `content` to `dir/relative`, creating parent directories.
pub fn write_file(dir: &Path, relative: impl AsRef<Path>, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

/// Writes a specification document as `dir/confederacy.xml`.
pub fn write_spec(dir: &Path, xml: &str) -> PathBuf {
    write_file(dir, SPEC_FILE, xml)
}

/// Writes the templates [`sample_spec`] refers to into `dir`.
pub fn write_sample_templates(dir: &Path) -> PathBuf {
    write_file(dir, SAMPLE_TEMPLATE, SAMPLE_TEMPLATE_CONTENT)
}

/// Relative paths and contents of every entry under `root`, sorted by path.
///
/// Directories appear with empty contents.
pub fn snapshot_tree(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry.expect("Failed to walk tree");
            let relative = entry
                .path()
                .strip_prefix(root)
                .expect("Entry outside root")
                .to_path_buf();
            let content = if entry.file_type().is_dir() {
                Vec::new()
            } else {
                std::fs::read(entry.path()).expect("Failed to read file")
            };
            (relative, content)
        })
        .collect()
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
