use anyhow::Result;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source tree scanner.
///
/// The `SourceScanner` recursively walks a directory and collects files with one of the
/// configured extensions. Hidden entries (starting with `.`), the `target` directory and
/// any explicitly ignored names are skipped.
///
/// # Example
///
/// ```no_run
/// use openapi_from_router::scanner::SourceScanner;
/// use std::path::PathBuf;
///
/// let scanner = SourceScanner::new(PathBuf::from("./src")).ignore("generated");
/// let result = scanner.scan().unwrap();
/// println!("Found {} source files", result.files.len());
/// ```
pub struct SourceScanner {
    root_path: PathBuf,
    extensions: Vec<String>,
    ignored: Vec<String>,
}

/// Result of directory scanning operation.
pub struct ScanResult {
    /// Matching files, in walk order
    pub files: Vec<PathBuf>,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl SourceScanner {
    /// Creates a scanner for `.rs` files under `root_path`.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            extensions: vec!["rs".to_string()],
            ignored: Vec::new(),
        }
    }

    /// Replace the accepted file extensions (without the leading dot)
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Skip files and directories with this exact name
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignored.push(name.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Scans the directory tree and collects matching files.
    ///
    /// Inaccessible entries are logged and recorded as warnings; scanning continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a directory.
    pub fn scan(&self) -> Result<ScanResult> {
        if !self.root_path.is_dir() {
            anyhow::bail!("Not a directory: {}", self.root_path.display());
        }

        let mut files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.path() == self.root_path || !self.is_skipped(e.file_name()))
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_file() && self.has_extension(path) {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        debug!(
            "Found {} source files under {}",
            files.len(),
            self.root_path.display()
        );
        Ok(ScanResult { files, warnings })
    }

    fn is_skipped(&self, name: &std::ffi::OsStr) -> bool {
        let name = name.to_string_lossy();
        name.starts_with('.') || name == "target" || self.ignored.iter().any(|i| *i == name)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn file_names(result: &ScanResult) -> Vec<String> {
        result
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_scan_nested_directories_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("src/routes")).unwrap();
        fs::write(root.join("src/routes/users.rs"), "fn list() {}").unwrap();
        fs::write(root.join("src/lib.rs"), "pub mod routes;").unwrap();
        fs::write(root.join("readme.md"), "# README").unwrap();

        let result = SourceScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(file_names(&result), vec!["lib.rs", "users.rs"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_skips_hidden_target_and_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        for dir in [".git", "target", "generated"] {
            fs::create_dir(root.join(dir)).unwrap();
            fs::write(root.join(dir).join("skipped.rs"), "fn main() {}").unwrap();
        }
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("vendor.rs"), "fn main() {}").unwrap();

        let result = SourceScanner::new(root.to_path_buf())
            .ignore("generated")
            .ignore("vendor.rs")
            .scan()
            .unwrap();

        assert_eq!(file_names(&result), vec!["main.rs"]);
    }

    #[test]
    fn test_custom_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("routes.js"), "").unwrap();
        fs::write(root.join("routes.ts"), "").unwrap();
        fs::write(root.join("main.rs"), "").unwrap();

        let result = SourceScanner::new(root.to_path_buf())
            .with_extensions(["js", "ts"])
            .scan()
            .unwrap();

        assert_eq!(file_names(&result), vec!["routes.js", "routes.ts"]);
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = SourceScanner::new(temp_dir.path().join("missing"));
        assert!(scanner.scan().is_err());
    }
}
