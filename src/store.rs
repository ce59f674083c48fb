// The user file acting as a record store.
//
// There is no index: every lookup reads the whole file and scans the
// blocks in order. Rewrites go to a temporary file in the same directory
// which is then renamed over the original, so an interrupted write leaves
// the previous contents untouched. No lock is held between operations;
// two processes writing at once means the last rename wins.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::codec::{self, RecordBlock};
use crate::config::Config;
use crate::error::StoreError;
use crate::export::{self, ReadableRow};
use crate::model::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.users_file.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole file contents. A missing file reads as an empty store.
    fn read(&self) -> Result<String, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "user store missing, treating as empty");
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn blocks(&self) -> Result<Vec<RecordBlock>, StoreError> {
        let blocks = codec::scan_blocks(&self.read()?);
        for block in &blocks {
            if let Err(e) = &block.decoded {
                warn!(path = %self.path.display(), error = %e, "skipping unreadable user record");
            }
        }
        Ok(blocks)
    }

    /// First readable record with this username.
    pub fn find(&self, username: &str) -> Result<Option<User>, StoreError> {
        let found = self
            .blocks()?
            .into_iter()
            .filter_map(|block| block.decoded.ok())
            .find(|user| user.username == username);
        debug!(username, found = found.is_some(), "user lookup");
        Ok(found)
    }

    /// Whether any block claims this username, readable or not. Used to keep
    /// usernames unique, so an account with a damaged record still counts.
    pub fn contains(&self, username: &str) -> Result<bool, StoreError> {
        Ok(codec::scan_blocks(&self.read()?)
            .iter()
            .any(|block| block.username() == Some(username)))
    }

    /// Every readable record in file order.
    pub fn all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .blocks()?
            .into_iter()
            .filter_map(|block| block.decoded.ok())
            .collect())
    }

    /// Replace the record with the same username, or append one.
    pub fn upsert(&self, user: &User) -> Result<UpsertOutcome, StoreError> {
        self.stage_upsert(user)?.commit()
    }

    /// Write the rewritten store to a temporary file without touching the
    /// original. Nothing changes on disk until [`PendingRewrite::commit`];
    /// dropping the pending rewrite discards it.
    ///
    /// Blocks with another username are copied exactly as read, including
    /// ones that fail to decode. A block whose username line matches is
    /// replaced even if its other fields are unreadable.
    pub fn stage_upsert(&self, user: &User) -> Result<PendingRewrite, StoreError> {
        let mut content = String::new();
        let mut outcome = UpsertOutcome::Inserted;

        for block in codec::scan_blocks(&self.read()?) {
            if block.username() == Some(user.username.as_str()) {
                content.push_str(&codec::encode_record(user));
                outcome = UpsertOutcome::Updated;
            } else {
                block.write_raw(&mut content);
            }
        }
        if outcome == UpsertOutcome::Inserted {
            content.push_str(&codec::encode_record(user));
        }

        let file = write_temp(&self.path, &content)?;
        Ok(PendingRewrite {
            file,
            target: self.path.clone(),
            username: user.username.clone(),
            outcome,
        })
    }

    /// Write the fixed-width table of all records to `path`. Returns the
    /// number of rows written.
    pub fn export_readable(&self, path: &Path) -> Result<usize, StoreError> {
        let blocks = codec::scan_blocks(&self.read()?);
        let rows: Vec<ReadableRow> = blocks.iter().filter_map(ReadableRow::from_block).collect();
        let count = rows.len();

        write_temp(path, &export::render_table(rows))?.persist(path)?;
        debug!(path = %path.display(), rows = count, "readable export written");
        Ok(count)
    }
}

/// A fully written replacement for the user file, waiting to be renamed
/// into place.
#[derive(Debug)]
pub struct PendingRewrite {
    file: NamedTempFile,
    target: PathBuf,
    username: String,
    outcome: UpsertOutcome,
}

impl PendingRewrite {
    pub fn outcome(&self) -> UpsertOutcome {
        self.outcome
    }

    pub fn commit(self) -> Result<UpsertOutcome, StoreError> {
        self.file.persist(&self.target)?;
        info!(username = %self.username, outcome = ?self.outcome, "user record saved");
        Ok(self.outcome)
    }
}

/// Temp file next to `target` (same filesystem, so the rename is atomic)
/// holding `content`, synced to disk.
fn write_temp(target: &Path, content: &str) -> Result<NamedTempFile, StoreError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.as_file().sync_all()?;
    Ok(file)
}
