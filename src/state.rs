use std::sync::Arc;

use tokio::sync::Mutex;

use crate::app::WorkoutApp;
use crate::config::{Config, StorageBackend};
use crate::error::PersistenceError;
use crate::persistence::{FilePersistence, MemoryPersistence, Persistence};
use crate::snapshot::SnapshotView;

pub struct Session {
    pub app: WorkoutApp,
    pub view: SnapshotView,
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, PersistenceError> {
        let persistence: Arc<dyn Persistence> = match config.storage {
            StorageBackend::File => {
                tracing::info!("Storing workouts in {}", config.data_file.display());
                Arc::new(FilePersistence::new(config.data_file.clone()))
            }
            StorageBackend::Memory => {
                tracing::info!("Storing workouts in memory");
                Arc::new(MemoryPersistence::new())
            }
        };
        Self::with_persistence(config, persistence)
    }

    pub fn with_persistence(
        config: Config,
        persistence: Arc<dyn Persistence>,
    ) -> Result<Self, PersistenceError> {
        let mut view = SnapshotView::default();
        let app = WorkoutApp::start(persistence, config.locale, &mut view)?;
        Ok(Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(Session { app, view })),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Holding the guard serializes events the way a browser event loop would.
    pub fn session(&self) -> &Mutex<Session> {
        &self.session
    }
}
