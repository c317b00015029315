use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};

/// How to handle an output file that already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the file if missing, otherwise append to it
    #[default]
    Append,
    /// Create the file if missing, otherwise replace its content
    Truncate,
}

impl WriteMode {
    fn open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.create(true);
        match self {
            WriteMode::Append => options.append(true),
            WriteMode::Truncate => options.write(true).truncate(true),
        };
        options
    }
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File did not exist and was created
    Created,
    /// Content was appended to an existing file
    Appended,
    /// Existing content was replaced
    Replaced,
}

/// A generated file to be persisted
pub struct File {
    path: PathBuf,
    content: String,
    mode: WriteMode,
}

impl File {
    /// Create a new file with the given path and content (default mode: append)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            mode: WriteMode::default(),
        }
    }

    /// Set the write mode
    pub fn mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its mode.
    ///
    /// The handle is closed before returning, on success and on failure. A
    /// failure after the open may leave a partially written file behind.
    pub fn write(&self) -> Result<WriteResult> {
        let existed = self.exists();

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("error creating directory ({})", parent.display())
            })?;
        }

        let mut file = self
            .mode
            .open_options()
            .open(&self.path)
            .wrap_err_with(|| format!("error opening file ({})", self.path.display()))?;

        file.write_all(self.content.as_bytes())
            .wrap_err_with(|| format!("error writing to file ({})", self.path.display()))?;

        file.sync_all()
            .wrap_err_with(|| format!("error closing file ({})", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = self.content.len(),
            mode = ?self.mode,
            "wrote generated file"
        );

        Ok(match (existed, self.mode) {
            (false, _) => WriteResult::Created,
            (true, WriteMode::Append) => WriteResult::Appended,
            (true, WriteMode::Truncate) => WriteResult::Replaced,
        })
    }
}
