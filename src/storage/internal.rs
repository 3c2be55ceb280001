use futures::future::join_all;
use log::{debug, error, trace};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::fmt::Hyphenated;

use crate::config::app_config::AppConfig;
use crate::data::{Idea, IdeaContents, IdeaId, UserId};
use crate::lib_constants::{IDEAS_DIRECTORY_PATH, IDEA_FILE_EXTENSION, TMP_FILENAME_INFIX};
use crate::storage::errors::StorageError;
use data::IdeaData;
use io_trait::{IdeaStorageIo, ProductionIdeaStorageIo};

mod data;
mod io_trait;

pub type IdeaStorage = IdeaStorageImpl<ProductionIdeaStorageIo>;

#[allow(private_bounds)]
#[derive(Debug)]
pub struct IdeaStorageImpl<Io: IdeaStorageIo> {
    io: Io,
    basedir: PathBuf,
}

impl IdeaStorage {
    pub async fn new(
        app_config: &AppConfig,
    ) -> Result<IdeaStorage, StorageError> {
        Self::new_internal(
            Self::get_ideas_dir(app_config),
            ProductionIdeaStorageIo::new(),
        ).await
    }

    pub fn get_ideas_dir(app_config: &AppConfig) -> PathBuf {
        app_config.data_directory.join(IDEAS_DIRECTORY_PATH)
    }
}

#[allow(private_bounds)]
impl<Io: IdeaStorageIo> IdeaStorageImpl<Io> {
    async fn new_internal(
        ideas_dir: PathBuf,
        io: Io,
    ) -> Result<IdeaStorageImpl<Io>, StorageError> {
        debug!("creating idea storage at \"{}\"", ideas_dir.display());
        io.create_dir_all(&ideas_dir).await?;
        Ok(
            IdeaStorageImpl {
                io,
                basedir: ideas_dir,
            }
        )
    }

    pub async fn create_idea(
        &self,
        owner: UserId,
        contents: IdeaContents,
    ) -> Result<Idea, StorageError> {
        let idea = Idea {
            id: IdeaId(self.io.generate_uuid()),
            title: contents.title,
            details: contents.details,
            owner,
            created_at: self.io.now(),
        };
        debug!("creating idea {} for user {owner}", idea.id);
        self.write_idea(&idea).await?;
        Ok(idea)
    }

    /// `None` if there's no such idea.
    pub async fn read_idea(
        &self,
        id: IdeaId,
    ) -> Result<Option<Idea>, StorageError> {
        let path = self.get_idea_path(id);
        debug!("reading idea {id} at \"{}\"", path.display());
        let contents = match self.io.read_file(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("idea {id} does not exist");
                return Ok(None)
            },
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(StorageError::Encoding { name: id.to_string() })
            },
            Err(e) => return Err(e.into()),
        };
        Ok(Some(parse_idea(id, &contents)?))
    }

    /// All ideas of the user, newest first.
    pub async fn list_ideas(
        &self,
        owner: UserId,
    ) -> Result<Vec<Idea>, StorageError> {
        debug!("listing ideas for user {owner}");
        let ids: Vec<_> = self.io
            .list_dir(&self.basedir)
            .await?
            .into_iter()
            .filter_map(try_extract_id)
            .collect();
        trace!("found {} idea documents", ids.len());

        let mut ret = Vec::new();
        for read in join_all(ids.into_iter().map(|id| self.read_listed_idea(id))).await {
            if let Some(idea) = read? && idea.is_owned_by(owner) {
                ret.push(idea);
            }
        }
        ret.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ret)
    }

    pub async fn update_idea(
        &self,
        idea: &Idea,
    ) -> Result<(), StorageError> {
        debug!("updating idea {}", idea.id);
        self.write_idea(idea).await
    }

    /// Deleting a missing idea is not an error; returns whether anything
    /// was deleted.
    pub async fn delete_idea(
        &self,
        id: IdeaId,
    ) -> Result<bool, StorageError> {
        debug!("deleting idea {id}");
        match self.io.remove_file(&self.get_idea_path(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("idea {id} was already absent");
                Ok(false)
            },
            Err(e) => Err(e.into()),
        }
    }

    // skips ideas that vanished or got corrupted after the listing
    async fn read_listed_idea(
        &self,
        id: IdeaId,
    ) -> Result<Option<Idea>, StorageError> {
        match self.read_idea(id).await {
            Err(e @ (StorageError::Parsing { .. } | StorageError::Encoding { .. })) => {
                error!("skipping unreadable idea {id}: {e}");
                Ok(None)
            },
            other => other,
        }
    }

    async fn write_idea(&self, idea: &Idea) -> Result<(), StorageError> {
        let filename = self.get_idea_path(idea.id);
        let tmp_filename = self.get_idea_tmp_path(idea.id);
        trace!(
            "writing idea {} to \"{}\" via \"{}\"",
            idea.id,
            filename.display(),
            tmp_filename.display(),
        );
        let serialized = toml::to_string(&IdeaData::from(idea))?;
        self.io.write_file(&tmp_filename, serialized).await?;
        if let Err(e) = self.io.rename_file(&tmp_filename, &filename).await {
            error!(
                "failed to rename tmp file \"{}\" for idea {}: {e}",
                tmp_filename.display(),
                idea.id,
            );
            if let Err(e) = self.io.remove_file(&tmp_filename).await {
                error!(
                    "failed to remove tmp file \"{}\" for idea {}: {e}",
                    tmp_filename.display(),
                    idea.id,
                );
            }
            return Err(e.into())
        }
        Ok(())
    }

    fn get_idea_path(&self, id: IdeaId) -> PathBuf {
        self.basedir.join(format!("{id}.{IDEA_FILE_EXTENSION}"))
    }

    fn get_idea_tmp_path(&self, id: IdeaId) -> PathBuf {
        self.basedir.join(
            id.to_string() +
                TMP_FILENAME_INFIX +
                &self.io.generate_uuid().hyphenated().to_string()
        )
    }
}

fn parse_idea(id: IdeaId, contents: &str) -> Result<Idea, StorageError> {
    toml::from_str::<IdeaData>(contents)
        .map(|data| data.into_idea(id))
        .map_err(|source| StorageError::Parsing {
            name: id.to_string(),
            source,
        })
}

fn try_extract_id(filename: OsString) -> Option<IdeaId> {
    let filename = filename.into_string().ok()?;
    filename
        .strip_suffix(&format!(".{IDEA_FILE_EXTENSION}"))
        .filter(|v| !v.chars().any(|c| c.is_uppercase()))
        .and_then(|v| Hyphenated::from_str(v).ok())
        .map(|v| IdeaId(v.into_uuid()))
}
