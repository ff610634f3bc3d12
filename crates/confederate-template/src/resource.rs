//! Static resources copied into generated projects.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ResourceError;

/// Something that can be placed at a destination path.
pub trait ResourceSource {
    /// Copy the resource to `destination`, creating parent directories.
    fn copy_to(&self, destination: &Path) -> Result<(), ResourceError>;

    /// Human-readable location of the resource.
    fn location(&self) -> String;
}

/// A file or directory tree on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileResource {
    path: PathBuf,
}

impl FileResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResourceSource for FileResource {
    fn copy_to(&self, destination: &Path) -> Result<(), ResourceError> {
        if !self.path.exists() {
            return Err(ResourceError::NotFound {
                path: self.path.clone(),
            });
        }

        if self.path.is_file() {
            return copy_file(&self.path, destination);
        }

        for entry in WalkDir::new(&self.path).sort_by_file_name() {
            let entry = entry.map_err(|source| ResourceError::Walk {
                path: self.path.clone(),
                source,
            })?;

            let relative = entry
                .path()
                .strip_prefix(&self.path)
                .unwrap_or_else(|_| entry.path());
            let target = destination.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target).map_err(|source| ResourceError::Copy {
                    from: entry.path().to_path_buf(),
                    to: target.clone(),
                    source,
                })?;
            } else {
                copy_file(entry.path(), &target)?;
            }
        }

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<(), ResourceError> {
    let copy_error = |source| ResourceError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).map_err(copy_error)?;
    }
    std::fs::copy(from, to).map_err(copy_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_copy_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("logo.png");
        fs::write(&source, [0u8, 1, 2, 3]).unwrap();

        let resource = FileResource::new(&source);
        let destination = dir.path().join("out/assets/logo.png");
        resource.copy_to(&destination).unwrap();

        assert_eq!(fs::read(&destination).unwrap(), vec![0u8, 1, 2, 3]);
        assert_eq!(resource.location(), source.display().to_string());
    }

    #[test]
    fn test_copy_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("assets");
        fs::create_dir_all(source.join("img/empty")).unwrap();
        fs::write(source.join("style.css"), "body {}").unwrap();
        fs::write(source.join("img/icon.svg"), "<svg/>").unwrap();

        let destination = dir.path().join("project/assets");
        FileResource::new(&source).copy_to(&destination).unwrap();

        assert_eq!(
            fs::read_to_string(destination.join("style.css")).unwrap(),
            "body {}"
        );
        assert_eq!(
            fs::read_to_string(destination.join("img/icon.svg")).unwrap(),
            "<svg/>"
        );
        assert!(destination.join("img/empty").is_dir());
    }

    #[test]
    fn test_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileResource::new(dir.path().join("nope"))
            .copy_to(&dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }
}
