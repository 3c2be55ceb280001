use std::ffi::OsString;
use std::path::Path;
use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::{fs, io};
use uuid::Uuid;
use crate::rng::make_uuid;

#[async_trait]
pub trait IdeaStorageIo: Send + Sync {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    async fn read_file(&self, path: &Path) -> io::Result<String>;

    async fn write_file(&self, path: &Path, data: String) -> io::Result<()>;

    async fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    fn now(&self) -> OffsetDateTime;

    fn generate_uuid(&self) -> Uuid;
}

#[derive(Debug)]
pub struct ProductionIdeaStorageIo;

impl ProductionIdeaStorageIo {
    pub fn new() -> Self {
        ProductionIdeaStorageIo
    }
}

#[async_trait]
impl IdeaStorageIo for ProductionIdeaStorageIo {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path).await
    }

    async fn write_file(&self, path: &Path, data: String) -> io::Result<()> {
        fs::write(path, data).await
    }

    async fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut read = fs::read_dir(path).await?;
        let mut ret = Vec::new();
        while let Some(entry) = read.next_entry().await? {
            ret.push(entry.file_name());
        }
        Ok(ret)
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn generate_uuid(&self) -> Uuid {
        make_uuid(&mut rand::rng())
    }
}
