use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::common::InputSource;
use crate::constants::input::{SKIPPED_DIRS, SNAPSHOT_EXTENSIONS};
use crate::error::DeadlockLensError;

/// Expands CLI inputs into the list of snapshots to analyze
pub struct InputDiscovery {
    warnings: Vec<String>,
}

impl Default for InputDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDiscovery {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Resolve every input to snapshot sources
    ///
    /// Files are kept as given, directories are scanned recursively and their
    /// snapshots sorted by path. Duplicates are dropped, keeping the first
    /// occurrence. Missing paths produce a warning.
    pub fn discover_all(
        &mut self,
        inputs: &[InputSource],
    ) -> Result<Vec<InputSource>, DeadlockLensError> {
        let mut seen = HashSet::new();
        let mut sources = Vec::new();

        for input in inputs {
            let path = match input {
                InputSource::Stdin => {
                    if seen.insert(InputSource::Stdin) {
                        sources.push(InputSource::Stdin);
                    }
                    continue;
                }
                InputSource::File(path) => path,
            };

            if !path.exists() {
                self.warnings
                    .push(format!("Path '{}' does not exist", path.display()));
                continue;
            }

            let found = if path.is_dir() {
                self.discover_in_dir(path)?
            } else {
                vec![path.clone()]
            };

            for file in found {
                let source = InputSource::File(file);
                if seen.insert(source.clone()) {
                    sources.push(source);
                }
            }
        }

        Ok(sources)
    }

    fn discover_in_dir(&mut self, dir: &Path) -> Result<Vec<PathBuf>, DeadlockLensError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

        for entry in walker {
            let entry = entry.map_err(|source| DeadlockLensError::DiscoveryError {
                path: dir.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_file() && is_snapshot_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        if files.is_empty() {
            self.warnings.push(format!(
                "No snapshot files found in '{}'",
                dir.display()
            ));
        }

        files.sort();
        Ok(files)
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn is_snapshot_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SNAPSHOT_EXTENSIONS.contains(&ext))
}
