use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::OffsetDateTime;
use tokio::io;
use uuid::Uuid;

use crate::rng::make_uuid;
use crate::storage::internal::io_trait::IdeaStorageIo;

pub const START_TIMESTAMP: i64 = 1_700_000_000;

/// Flat in-memory file tree with a clock that ticks a second per reading.
pub struct TestStorageIo {
    pub files: Mutex<HashMap<PathBuf, String>>,
    pub failing_reads: Mutex<HashMap<PathBuf, io::ErrorKind>>,
    pub fail_renames: AtomicBool,
    clock: AtomicI64,
    rng: Mutex<StdRng>,
}

impl TestStorageIo {
    pub fn new() -> Self {
        TestStorageIo {
            files: Mutex::new(HashMap::new()),
            failing_reads: Mutex::new(HashMap::new()),
            fail_renames: AtomicBool::new(false),
            clock: AtomicI64::new(START_TIMESTAMP),
            rng: Mutex::new(StdRng::seed_from_u64(0)),
        }
    }

    pub fn put_file(&self, path: impl AsRef<Path>, contents: impl Into<String>) {
        self.files.lock().unwrap()
            .insert(path.as_ref().to_owned(), contents.into());
    }

    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.files.lock().unwrap()
            .keys()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[async_trait]
impl IdeaStorageIo for TestStorageIo {
    async fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    async fn read_file(&self, path: &Path) -> io::Result<String> {
        if let Some(kind) = self.failing_reads.lock().unwrap().get(path) {
            return Err(io::Error::new(*kind, "mock read failure"));
        }
        self.files.lock().unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::ErrorKind::NotFound.into())
    }

    async fn write_file(&self, path: &Path, data: String) -> io::Result<()> {
        self.put_file(path, data);
        Ok(())
    }

    async fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.fail_renames.load(Ordering::Relaxed) {
            return Err(io::Error::other("mock rename failure"));
        }
        let mut files = self.files.lock().unwrap();
        let contents = files.remove(from)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        files.insert(to.to_owned(), contents);
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.files.lock().unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::ErrorKind::NotFound.into())
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        Ok(
            self.files.lock().unwrap()
                .keys()
                .filter(|p| p.parent() == Some(path))
                .filter_map(|p| p.file_name())
                .map(ToOwned::to_owned)
                .collect()
        )
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.clock.fetch_add(1, Ordering::Relaxed))
            .unwrap()
    }

    fn generate_uuid(&self) -> Uuid {
        make_uuid(&mut *self.rng.lock().unwrap())
    }
}
