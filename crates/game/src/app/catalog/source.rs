use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use super::{parse_catalog, CatalogError, RoomCatalog};

const EMBEDDED_CATALOG: &str = include_str!("../../../assets/rooms.json");
const LOADER_THREAD_NAME: &str = "catalog-loader";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CatalogSource {
    /// The seven-room sample compiled into the binary.
    Embedded,
    File(PathBuf),
    Http { url: String, timeout: Duration },
}

impl CatalogSource {
    pub(crate) fn origin(&self) -> String {
        match self {
            CatalogSource::Embedded => "embedded".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Http { url, .. } => url.clone(),
        }
    }

    /// Blocking read + decode + validate.
    pub(crate) fn load(&self) -> Result<RoomCatalog, CatalogError> {
        let origin = self.origin();
        let raw = self.read_raw(&origin)?;
        parse_catalog(&raw, &origin)
    }

    fn read_raw(&self, origin: &str) -> Result<String, CatalogError> {
        let fetch_error = |reason: String| CatalogError::Fetch {
            origin: origin.to_string(),
            reason,
        };
        match self {
            CatalogSource::Embedded => Ok(EMBEDDED_CATALOG.to_string()),
            CatalogSource::File(path) => {
                fs::read_to_string(path).map_err(|error| fetch_error(format!("read file: {error}")))
            }
            CatalogSource::Http { url, timeout } => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(*timeout)
                    .build()
                    .map_err(|error| fetch_error(format!("build http client: {error}")))?;
                let response = client
                    .get(url.as_str())
                    .send()
                    .map_err(|error| fetch_error(format!("request failed: {error}")))?;
                let response = response
                    .error_for_status()
                    .map_err(|error| fetch_error(format!("unexpected status: {error}")))?;
                response
                    .text()
                    .map_err(|error| fetch_error(format!("read body: {error}")))
            }
        }
    }
}

/// A catalog load running on a background thread. Polled once per tick; never blocks.
#[derive(Debug)]
pub(crate) struct PendingCatalog {
    origin: String,
    receiver: Receiver<Result<RoomCatalog, CatalogError>>,
}

impl PendingCatalog {
    pub(crate) fn spawn(source: CatalogSource) -> Self {
        let origin = source.origin();
        let (sender, receiver) = mpsc::channel();
        let worker_sender = sender.clone();
        let spawned = thread::Builder::new()
            .name(LOADER_THREAD_NAME.to_string())
            .spawn(move || {
                let result = source.load();
                let _ = worker_sender.send(result);
            });
        match spawned {
            Ok(_) => info!(origin = origin.as_str(), "catalog_load_started"),
            Err(error) => {
                warn!(origin = origin.as_str(), error = %error, "catalog_loader_spawn_failed");
                let _ = sender.send(Err(CatalogError::Fetch {
                    origin: origin.clone(),
                    reason: format!("failed to start loader thread: {error}"),
                }));
            }
        }
        Self { origin, receiver }
    }

    pub(crate) fn origin(&self) -> &str {
        &self.origin
    }

    /// `None` while the load is still running.
    pub(crate) fn poll(&self) -> Option<Result<RoomCatalog, CatalogError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(CatalogError::Fetch {
                origin: self.origin.clone(),
                reason: "catalog loader exited without a result".to_string(),
            })),
        }
    }
}
