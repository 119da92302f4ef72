//! The saved-excuse collection: an in-memory mirror over one storage key.
//!
//! The whole collection is rewritten after every mutation. A failed write
//! is logged and otherwise ignored, so memory can run ahead of disk until
//! the next successful write.

use alibi_core::models::excuse::SavedExcuse;
use alibi_core::storage_keys;
use tracing::{debug, error, info, warn};

use crate::kv::KeyValueStore;
use crate::state::{load_state, save_state};

pub struct ExcuseStore<S: KeyValueStore> {
    backend: S,
    excuses: Vec<SavedExcuse>,
}

impl<S: KeyValueStore> ExcuseStore<S> {
    /// Load the collection from `backend`.
    ///
    /// Never fails: an absent key yields an empty collection, and so does a
    /// value that no longer parses. The unreadable value is left in place.
    pub fn load(backend: S) -> Self {
        let excuses =
            match load_state::<Vec<SavedExcuse>>(&backend, storage_keys::SAVED_EXCUSES) {
                Ok(Some(excuses)) => {
                    info!(count = excuses.len(), "loaded saved excuses");
                    excuses
                }
                Ok(None) => {
                    debug!("no saved excuses yet, starting empty");
                    Vec::new()
                }
                Err(e) => {
                    warn!(error = %e, "saved excuses unreadable, starting empty for this session");
                    Vec::new()
                }
            };

        Self { backend, excuses }
    }

    /// Records in store order (newest saved first).
    pub fn excuses(&self) -> &[SavedExcuse] {
        &self.excuses
    }

    pub fn len(&self) -> usize {
        self.excuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.excuses.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SavedExcuse> {
        self.excuses.iter().find(|e| e.id == id)
    }

    /// Prepend a record and rewrite the collection.
    ///
    /// Returns `false` without touching anything if a record with the same
    /// id is already present.
    pub fn add(&mut self, excuse: SavedExcuse) -> bool {
        if self.get(&excuse.id).is_some() {
            warn!(id = %excuse.id, "refusing to add excuse with duplicate id");
            return false;
        }

        debug!(id = %excuse.id, context = %excuse.context, "saving excuse");
        self.excuses.insert(0, excuse);
        self.persist();
        true
    }

    /// Remove the record with `id` and rewrite the collection.
    ///
    /// Unknown ids are a no-op; returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.excuses.len();
        self.excuses.retain(|e| e.id != id);

        if self.excuses.len() == before {
            debug!(%id, "no saved excuse with that id");
            return false;
        }

        debug!(%id, "deleted excuse");
        self.persist();
        true
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    fn persist(&mut self) {
        if let Err(e) = save_state(
            &mut self.backend,
            storage_keys::SAVED_EXCUSES,
            &self.excuses,
        ) {
            error!(
                error = %e,
                count = self.excuses.len(),
                "failed to write saved excuses (in-memory copy kept)"
            );
        }
    }
}
