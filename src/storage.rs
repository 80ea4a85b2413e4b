//! Dictionary file binding.
//!
//! Connects the flat file codec to a path on disk. The file is read once when
//! a session starts and rewritten in full when it ends.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::codec::{self, CodecError};
use crate::config::StorageConfig;
use crate::data_structures::TrieStore;
use crate::error::{DictionaryError, DictionaryResult};

/// The on-disk home of a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryFile {
    path: PathBuf,
}

impl DictionaryFile {
    /// Creates a binding for `path`. Nothing is touched until load or save.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Creates a binding from the storage section of the configuration.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.path.clone())
    }

    /// Path of the dictionary file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the dictionary file.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(TrieStore))` - The decoded dictionary.
    /// * `Ok(None)` - The file does not exist yet.
    /// * `Err(DictionaryError::Storage)` - The file exists but could not be read.
    pub fn load(&self) -> DictionaryResult<Option<TrieStore>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.error(e.into())),
        };

        let store = codec::decode(BufReader::new(file)).map_err(|e| self.error(e))?;
        info!(path = %self.path.display(), words = store.len(), "Dictionary loaded");
        Ok(Some(store))
    }

    /// Reads the dictionary file, starting empty if it does not exist.
    pub fn load_or_default(&self) -> DictionaryResult<TrieStore> {
        match self.load()? {
            Some(store) => Ok(store),
            None => {
                warn!(path = %self.path.display(), "Dictionary file not found, starting empty");
                Ok(TrieStore::new())
            }
        }
    }

    /// Overwrites the dictionary file with every word in `store`.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of records written.
    /// * `Err(DictionaryError::Storage)` - The file could not be created or
    ///   written, or a record would not read back. In the latter case the
    ///   existing file is left untouched.
    pub fn save(&self, store: &TrieStore) -> DictionaryResult<usize> {
        codec::check_store(store).map_err(|e| self.error(e))?;
        let file = File::create(&self.path).map_err(|e| self.error(e.into()))?;
        let written = codec::encode(store, BufWriter::new(file)).map_err(|e| self.error(e))?;

        info!(path = %self.path.display(), records = written, "Dictionary saved");
        Ok(written)
    }

    fn error(&self, source: CodecError) -> DictionaryError {
        DictionaryError::storage(&self.path, source)
    }
}
