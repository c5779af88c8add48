//! Typed access to the persisted collections.
//!
//! # Responsibility
//! - Decode and encode whole collections under their storage keys.
//! - Seed a collection exactly once, on first access to an absent key.
//!
//! # Invariants
//! - `get` never fails: corrupt content or a storage read error yields the
//!   seed value without writing it back.
//! - `put` serializes the full sequence and overwrites the stored value.
//! - There is no partial write path; callers load, modify and put back.

use crate::clock::SharedClock;
use crate::model::collection::{Collection, CollectionKey};
use crate::repo::kv_repo::{KvRepository, RepoError};
use chrono::Utc;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Write-path failure. Reads never surface errors.
#[derive(Debug)]
pub enum StoreError {
    Encode {
        key: CollectionKey,
        source: serde_json::Error,
    },
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Collection store over any [`KvRepository`].
pub struct Store {
    repo: Box<dyn KvRepository + Send>,
    clock: SharedClock,
}

impl Store {
    pub fn new(repo: Box<dyn KvRepository + Send>, clock: SharedClock) -> Self {
        Self { repo, clock }
    }

    /// Loads the full collection for `C`.
    ///
    /// Absent key: the seed is persisted and returned. Unparsable content or a
    /// failed read: the seed is returned and nothing is written.
    pub fn get<C: Collection>(&self) -> Vec<C> {
        let key = C::KEY;
        let raw = match self.repo.get_raw(key.storage_key()) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=store_read module=store status=fallback key={key} reason=read_failed error={err}"
                );
                return self.seed_for::<C>();
            }
        };

        let Some(raw) = raw else {
            let seed = self.seed_for::<C>();
            match self.put(&seed) {
                Ok(()) => info!(
                    "event=store_seed module=store status=ok key={key} records={}",
                    seed.len()
                ),
                Err(err) => warn!(
                    "event=store_seed module=store status=error key={key} error={err}"
                ),
            }
            return seed;
        };

        match serde_json::from_str::<Vec<C>>(&raw) {
            Ok(records) => {
                debug!(
                    "event=store_read module=store status=ok key={key} records={}",
                    records.len()
                );
                records
            }
            Err(err) => {
                warn!(
                    "event=store_read module=store status=fallback key={key} reason=corrupt error={err}"
                );
                self.seed_for::<C>()
            }
        }
    }

    /// Overwrites the stored collection for `C` with `records`.
    pub fn put<C: Collection>(&self, records: &[C]) -> StoreResult<()> {
        let key = C::KEY;
        let encoded =
            serde_json::to_string(records).map_err(|source| StoreError::Encode { key, source })?;
        self.repo.set_raw(key.storage_key(), &encoded)?;
        debug!(
            "event=store_write module=store status=ok key={key} records={}",
            records.len()
        );
        Ok(())
    }

    /// Loads `C`, applies `mutate` in memory and writes the result back.
    ///
    /// Returns whatever `mutate` returns once the write has succeeded.
    pub fn update<C: Collection, T>(
        &self,
        mutate: impl FnOnce(&mut Vec<C>) -> T,
    ) -> StoreResult<T> {
        let mut records = self.get::<C>();
        let result = mutate(&mut records);
        self.put(&records)?;
        Ok(result)
    }

    fn seed_for<C: Collection>(&self) -> Vec<C> {
        C::seed(self.clock.now().with_timezone(&Utc))
    }
}
