//! File Storage
//!
//! Persists each key as `<key>.json` under a data directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use boxoffice::storage::{Storage, StorageError};

/// Storage backed by one file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();

        fs::create_dir_all(&dir)?;

        debug!(dir = %dir.display(), "opened file storage");

        Ok(Self { dir })
    }

    /// Directory the records live in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(key: &str, source: io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(io_error(key, source)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path(key), value).map_err(|source| io_error(key, source))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(io_error(key, source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::dec;
    use testresult::TestResult;

    use boxoffice::{
        cart::Cart,
        stores::{CART_KEY, CartStore},
    };

    use crate::test::helpers::line;

    use super::*;

    #[test]
    fn open_creates_missing_directory() -> TestResult {
        let root = tempfile::tempdir()?;
        let storage = FileStorage::open(root.path().join("nested").join("state"))?;

        assert!(storage.dir().is_dir());

        Ok(())
    }

    #[test]
    fn missing_key_is_absent() -> TestResult {
        let root = tempfile::tempdir()?;
        let storage = FileStorage::open(root.path())?;

        assert_eq!(storage.get("cart")?, None);

        storage.remove("cart")?;

        Ok(())
    }

    #[test]
    fn values_are_written_to_one_file_per_key() -> TestResult {
        let root = tempfile::tempdir()?;
        let storage = FileStorage::open(root.path())?;

        storage.set("user", r#"{"id":1}"#)?;

        assert_eq!(
            fs::read_to_string(root.path().join("user.json"))?,
            r#"{"id":1}"#
        );
        assert_eq!(storage.get("user")?.as_deref(), Some(r#"{"id":1}"#));

        storage.remove("user")?;

        assert!(!root.path().join("user.json").exists());

        Ok(())
    }

    #[test]
    fn cart_survives_reopening() -> TestResult {
        let root = tempfile::tempdir()?;
        let store = CartStore::new(Arc::new(FileStorage::open(root.path())?));
        let mut cart = Cart::new();

        store.add_items(&mut cart, [line(1, 2, dec!(30), 2)])?;

        let reopened = CartStore::new(Arc::new(FileStorage::open(root.path())?));

        assert_eq!(reopened.load(), cart);
        assert!(root.path().join(format!("{CART_KEY}.json")).is_file());

        Ok(())
    }
}
