//! Output tree writer - lays generated files out under the output directory
//!
//! Layout:
//! - `mod.rs` declaring one module per provider
//! - `<local>/mod.rs` declaring every entity and namespace module of that provider
//! - `<local>/provider.rs`, `<local>/resource_<type>.rs`, `<local>/data_<type>.rs`, and namespace files
//!
//! Every file is written atomically: a temporary file in the destination directory, persisted by rename.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Failures of the output tree.
#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    #[error("output directory `{}` is not empty", .0.display())]
    #[diagnostic(
        code(terragen::directory_not_empty),
        help("pass `--force` to replace its contents, or choose an empty directory")
    )]
    DirectoryNotEmpty(PathBuf),

    #[error("`{path}` would be generated by both {first} and {second}")]
    #[diagnostic(
        code(terragen::duplicate_output_path),
        help("two type names map to the same file; the second entity was skipped")
    )]
    DuplicateOutputPath { path: String, first: String, second: String },

    #[error("I/O error writing {owner} to `{}`", .path.display())]
    #[diagnostic(code(terragen::io))]
    Io {
        owner: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One rendered file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// `/`-separated relative path (`aws/resource_aws_instance.rs`).
    pub path: String,
    pub contents: String,
}

/// Owner name of `mod.rs` files.
pub const MODULE_INDEX: &str = "the module index";

/// The files of one provider, keyed by path so every path has exactly one owner.
#[derive(Debug)]
pub struct ProviderTree {
    /// Path of the provider's `mod.rs`, reserved before any entity is inserted.
    index_path: String,
    files: BTreeMap<String, (String, GeneratedFile)>,
    modules: Vec<String>,
}

impl ProviderTree {
    pub fn new(index_path: impl Into<String>) -> Self {
        Self {
            index_path: index_path.into(),
            files: BTreeMap::new(),
            modules: Vec::new(),
        }
    }

    pub fn index_path(&self) -> &str {
        &self.index_path
    }

    /// Claim the paths of one entity's files and declare their modules.
    ///
    /// ## Errors
    /// - [`ProjectError::DuplicateOutputPath`] if any path is already owned; nothing of this entity is added.
    pub fn insert(
        &mut self,
        owner: &str,
        files: Vec<GeneratedFile>,
        modules: Vec<String>,
    ) -> Result<(), ProjectError> {
        for file in &files {
            if file.path == self.index_path {
                return Err(ProjectError::DuplicateOutputPath {
                    path: file.path.clone(),
                    first: MODULE_INDEX.to_string(),
                    second: owner.to_string(),
                });
            }
            if let Some((first, _)) = self.files.get(&file.path) {
                return Err(ProjectError::DuplicateOutputPath {
                    path: file.path.clone(),
                    first: first.clone(),
                    second: owner.to_string(),
                });
            }
        }
        for file in files {
            self.files.insert(file.path.clone(), (owner.to_string(), file));
        }
        self.modules.extend(modules);
        Ok(())
    }

    /// Add the rendered `mod.rs`.
    pub fn set_index(&mut self, contents: String) {
        let file = GeneratedFile {
            path: self.index_path.clone(),
            contents,
        };
        self.files.insert(self.index_path.clone(), (MODULE_INDEX.to_string(), file));
    }

    /// Module names to declare in the provider's `mod.rs`, sorted.
    pub fn modules(&self) -> Vec<String> {
        let mut modules = self.modules.clone();
        modules.sort_by(|a, b| module_sort_key(a).cmp(module_sort_key(b)));
        modules
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &GeneratedFile)> {
        self.files.values().map(|(owner, file)| (owner.as_str(), file))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn module_sort_key(module: &str) -> &str {
    module.strip_prefix("r#").unwrap_or(module)
}

/// Writes files under one output directory.
#[derive(Debug, Clone)]
pub struct ProjectWriter {
    output_dir: PathBuf,
}

impl ProjectWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Make sure the output directory exists and is empty.
    ///
    /// With `force`, an existing non-empty directory is deleted recursively and recreated.
    ///
    /// ## Errors
    /// - [`ProjectError::DirectoryNotEmpty`] when the directory has entries and `force` is off.
    /// - [`ProjectError::Io`] for any filesystem failure.
    pub fn prepare(&self, force: bool) -> Result<(), ProjectError> {
        let io_error = |source| ProjectError::Io {
            owner: "the output directory".to_string(),
            path: self.output_dir.clone(),
            source,
        };
        match fs::read_dir(&self.output_dir) {
            Ok(mut entries) => {
                if entries.next().is_none() {
                    return Ok(());
                }
                if !force {
                    return Err(ProjectError::DirectoryNotEmpty(self.output_dir.clone()));
                }
                tracing::warn!(dir = %self.output_dir.display(), "removing existing output directory");
                fs::remove_dir_all(&self.output_dir).map_err(io_error)?;
                fs::create_dir_all(&self.output_dir).map_err(io_error)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => fs::create_dir_all(&self.output_dir).map_err(io_error),
            Err(err) => Err(io_error(err)),
        }
    }

    /// Write one file atomically, creating its parent directory.
    pub fn write(&self, owner: &str, file: &GeneratedFile) -> Result<PathBuf, ProjectError> {
        let path = file
            .path
            .split('/')
            .fold(self.output_dir.clone(), |path, segment| path.join(segment));
        let io_error = |source| ProjectError::Io {
            owner: owner.to_string(),
            path: path.clone(),
            source,
        };
        let dir = path.parent().unwrap_or(&self.output_dir);
        fs::create_dir_all(dir).map_err(io_error)?;
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
        temp.write_all(file.contents.as_bytes()).map_err(io_error)?;
        temp.as_file().sync_all().map_err(io_error)?;
        temp.persist(&path).map_err(|err| io_error(err.error))?;
        tracing::trace!(path = %path.display(), "wrote file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> GeneratedFile {
        GeneratedFile {
            path: path.to_string(),
            contents: format!("// {path}\n"),
        }
    }

    #[test]
    fn test_duplicate_path_rejected_atomically() {
        let mut tree = ProviderTree::new("aws/mod.rs");
        tree.insert("resource `aws_a`", vec![file("aws/a.rs")], vec!["a".to_string()])
            .unwrap();
        let err = tree
            .insert(
                "resource `aws_b`",
                vec![file("aws/b.rs"), file("aws/a.rs")],
                vec!["b".to_string()],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ProjectError::DuplicateOutputPath { ref path, ref first, .. } if path == "aws/a.rs" && first == "resource `aws_a`"
        ));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.modules(), vec!["a".to_string()]);
    }

    #[test]
    fn test_index_path_is_reserved() {
        let mut tree = ProviderTree::new("aws/mod.rs");
        let err = tree.insert("resource `aws_mod`", vec![file("aws/mod.rs")], Vec::new()).unwrap_err();
        assert!(matches!(err, ProjectError::DuplicateOutputPath { ref first, .. } if first == MODULE_INDEX));
        tree.set_index("pub mod provider;\n".to_string());
        assert_eq!(tree.files().next().map(|(owner, _)| owner), Some(MODULE_INDEX));
    }

    #[test]
    fn test_modules_sort_ignoring_raw_prefix() {
        let mut tree = ProviderTree::new("aws/mod.rs");
        tree.insert("x", Vec::new(), vec!["u".to_string(), "r#type".to_string(), "provider".to_string()])
            .unwrap();
        assert_eq!(tree.modules(), vec!["provider", "r#type", "u"]);
    }

    #[test]
    fn test_prepare_creates_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("gen");
        ProjectWriter::new(&out).prepare(false).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn test_prepare_refuses_non_empty_without_force() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("keep.txt"), "x").unwrap();
        let writer = ProjectWriter::new(root.path());
        assert!(matches!(writer.prepare(false), Err(ProjectError::DirectoryNotEmpty(_))));
        assert!(root.path().join("keep.txt").exists());

        writer.prepare(true).unwrap();
        assert!(root.path().is_dir());
        assert!(!root.path().join("keep.txt").exists());
    }

    #[test]
    fn test_write_creates_parents_and_replaces() {
        let root = tempfile::tempdir().unwrap();
        let writer = ProjectWriter::new(root.path());
        let path = writer.write("test", &file("aws/mod.rs")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "// aws/mod.rs\n");

        let replaced = GeneratedFile {
            path: "aws/mod.rs".to_string(),
            contents: "// v2\n".to_string(),
        };
        writer.write("test", &replaced).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "// v2\n");
        assert_eq!(fs::read_dir(root.path().join("aws")).unwrap().count(), 1);
    }
}
