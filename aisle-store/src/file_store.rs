use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use aisle_catalog::SeatLayout;
use aisle_core::{InventoryState, InventoryStore, PersistenceError};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::document;

/// Keeps the whole inventory in one pretty-printed JSON file.
///
/// Saves write a sibling temporary file and rename it over the target, so
/// a concurrent load sees either the old or the new document.
pub struct JsonFileStore {
    path: PathBuf,
    layout: SeatLayout,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>, layout: SeatLayout) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            layout,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl InventoryStore for JsonFileStore {
    async fn load(&self) -> Result<InventoryState, PersistenceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                debug!(path = %self.path.display(), bytes = bytes.len(), "Loaded inventory state");
                document::decode(&bytes, &self.layout)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No inventory state yet, starting empty");
                Ok(InventoryState::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, state: &InventoryState) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if tokio::fs::metadata(dir).await.is_err() {
                tokio::fs::create_dir_all(dir).await?;
                info!(dir = %dir.display(), "Created state directory");
            }
        }

        let bytes = document::encode(state)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Saved inventory state");
        Ok(())
    }
}
