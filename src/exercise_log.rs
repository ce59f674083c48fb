// Append-only exercise log, one `<username>: <exercise>` line per entry.

use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

#[derive(Debug, Clone)]
pub struct ExerciseLog {
    path: PathBuf,
}

impl ExerciseLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file if needed. The file is opened
    /// and closed for every entry.
    pub fn append(&self, username: &str, exercise: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{username}: {exercise}")?;
        debug!(username, path = %self.path.display(), "exercise logged");
        Ok(())
    }

    /// Entries previously logged by `username`, oldest first.
    pub fn entries_for(&self, username: &str) -> io::Result<Vec<String>> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let prefix = format!("{username}: ");
        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            if let Some(entry) = line?.strip_prefix(&prefix) {
                entries.push(entry.to_string());
            }
        }
        Ok(entries)
    }
}
