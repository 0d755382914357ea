//! Expansion of file and directory arguments into page files
//!
//! Files named explicitly are always kept. Directories are walked and only
//! files with a page extension are collected, skipping hidden entries unless
//! asked otherwise.

use crate::error::{PageError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Configuration for file resolution
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Follow symbolic links
    pub follow_links: bool,
    /// Maximum recursion depth for directory traversal
    pub max_depth: Option<usize>,
    /// Include hidden files and directories (starting with .)
    pub include_hidden: bool,
    /// Extensions collected from directories; empty means every file
    pub include_extensions: Vec<String>,
    /// Glob-style patterns (`*`, `?`) of paths to leave out
    pub exclude_patterns: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            max_depth: None,
            include_hidden: false,
            include_extensions: ["md", "markdown", "html", "htm"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            exclude_patterns: Vec::new(),
        }
    }
}

/// A file produced by resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    path: PathBuf,
    explicit: bool,
}

impl ResolvedFile {
    /// The file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file was named directly rather than found in a directory
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Take the file path
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// File resolver for handling multiple files and directories
#[derive(Debug, Clone, Default)]
pub struct FileResolver {
    config: ResolverConfig,
    excludes: Vec<Regex>,
}

impl FileResolver {
    /// Create a new resolver with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new resolver with custom configuration
    ///
    /// Fails if an exclude pattern cannot be compiled.
    pub fn with_config(config: ResolverConfig) -> Result<Self> {
        let excludes = config
            .exclude_patterns
            .iter()
            .map(|pattern| glob_to_regex(pattern))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { config, excludes })
    }

    /// Resolve paths to a sorted, de-duplicated list of files
    pub fn resolve_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<ResolvedFile>> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();

        for path in paths {
            for file in self.resolve_single_path(path.as_ref())? {
                if !self.is_excluded(&file.path) && seen.insert(file.path.clone()) {
                    resolved.push(file);
                }
            }
        }

        resolved.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(resolved)
    }

    fn resolve_single_path(&self, path: &Path) -> Result<Vec<ResolvedFile>> {
        if path.is_file() {
            Ok(vec![ResolvedFile {
                path: path.to_path_buf(),
                explicit: true,
            }])
        } else if path.is_dir() {
            self.traverse_directory(path)
        } else {
            Err(PageError::file_not_found(path))
        }
    }

    fn traverse_directory(&self, dir_path: &Path) -> Result<Vec<ResolvedFile>> {
        let include_hidden = self.config.include_hidden;
        let walker = WalkDir::new(dir_path)
            .follow_links(self.config.follow_links)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|entry| include_hidden || entry.depth() == 0 || !is_hidden(entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                PageError::path_resolution(format!("Error traversing directory: {}", e))
            })?;

            if entry.file_type().is_file() && self.has_page_extension(entry.path()) {
                files.push(ResolvedFile {
                    path: entry.into_path(),
                    explicit: false,
                });
            }
        }
        Ok(files)
    }

    fn has_page_extension(&self, path: &Path) -> bool {
        if self.config.include_extensions.is_empty() {
            return true;
        }
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        self.config.include_extensions.iter().any(|e| *e == ext)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes.iter().any(|re| re.is_match(&path_str))
    }

    /// Get the resolver configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Translate a `*`/`?` glob into an anchored regex
fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut source = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');
    Regex::new(&source)
        .map_err(|e| PageError::path_resolution(format!("invalid exclude pattern {pattern:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_files(dir: &Path) {
        fs::write(dir.join("test1.md"), "---\na: 1\n---\n").unwrap();
        fs::write(dir.join("test2.markdown"), "# Test 2").unwrap();
        fs::write(dir.join("page.html"), "<p>raw</p>").unwrap();
        fs::write(dir.join("readme.txt"), "Not a page").unwrap();
        fs::write(dir.join(".hidden.md"), "# Hidden").unwrap();

        let subdir = dir.join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("nested.md"), "# Nested").unwrap();

        let hidden_dir = dir.join(".drafts");
        fs::create_dir(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("draft.md"), "# Draft").unwrap();
    }

    fn names(files: &[ResolvedFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_resolve_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("notes.txt");
        fs::write(&file_path, "# Test").unwrap();

        let resolved = FileResolver::new().resolve_paths(&[&file_path]).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].path(), file_path);
        assert!(resolved[0].is_explicit());
    }

    #[test]
    fn test_resolve_directory() {
        let temp_dir = TempDir::new().unwrap();
        create_test_files(temp_dir.path());

        let resolved = FileResolver::new().resolve_paths(&[temp_dir.path()]).unwrap();
        let names = names(&resolved);

        assert_eq!(resolved.len(), 4);
        assert!(names.contains(&"test1.md".to_string()));
        assert!(names.contains(&"test2.markdown".to_string()));
        assert!(names.contains(&"page.html".to_string()));
        assert!(names.contains(&"nested.md".to_string()));
        assert!(resolved.iter().all(|f| !f.is_explicit()));
    }

    #[test]
    fn test_include_hidden() {
        let temp_dir = TempDir::new().unwrap();
        create_test_files(temp_dir.path());

        let resolver = FileResolver::with_config(ResolverConfig {
            include_hidden: true,
            ..Default::default()
        })
        .unwrap();
        let names = names(&resolver.resolve_paths(&[temp_dir.path()]).unwrap());

        assert!(names.contains(&".hidden.md".to_string()));
        assert!(names.contains(&"draft.md".to_string()));
    }

    #[test]
    fn test_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        create_test_files(temp_dir.path());

        let resolver = FileResolver::with_config(ResolverConfig {
            max_depth: Some(1),
            ..Default::default()
        })
        .unwrap();
        let names = names(&resolver.resolve_paths(&[temp_dir.path()]).unwrap());

        assert_eq!(names.len(), 3);
        assert!(!names.contains(&"nested.md".to_string()));
    }

    #[test]
    fn test_include_extensions() {
        let temp_dir = TempDir::new().unwrap();
        create_test_files(temp_dir.path());

        let resolver = FileResolver::with_config(ResolverConfig {
            include_extensions: vec!["md".to_string()],
            ..Default::default()
        })
        .unwrap();
        let names = names(&resolver.resolve_paths(&[temp_dir.path()]).unwrap());

        assert!(names.contains(&"test1.md".to_string()));
        assert!(names.contains(&"nested.md".to_string()));
        assert!(!names.contains(&"test2.markdown".to_string()));
        assert!(!names.contains(&"page.html".to_string()));
    }

    #[test]
    fn test_exclude_patterns() {
        let temp_dir = TempDir::new().unwrap();
        create_test_files(temp_dir.path());

        let resolver = FileResolver::with_config(ResolverConfig {
            exclude_patterns: vec!["*test?.md".to_string()],
            ..Default::default()
        })
        .unwrap();
        let names = names(&resolver.resolve_paths(&[temp_dir.path()]).unwrap());

        assert!(!names.contains(&"test1.md".to_string()));
        assert!(names.contains(&"test2.markdown".to_string()));
    }

    #[test]
    fn test_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does_not_exist.md");

        let err = FileResolver::new().resolve_paths(&[&missing]).unwrap_err();
        assert!(matches!(err, PageError::FileNotFound { .. }));
    }

    #[test]
    fn test_duplicate_removal() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.md");
        fs::write(&file_path, "# Test").unwrap();

        let resolved = FileResolver::new()
            .resolve_paths(&[&file_path, &file_path])
            .unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_glob_to_regex() {
        let re = glob_to_regex("*.draft.md").unwrap();
        assert!(re.is_match("posts/a.draft.md"));
        assert!(!re.is_match("posts/a_draft.md"));
    }
}
