//! Wiring of the portal services from a [`ClientConfig`]

use std::sync::Arc;

use crate::api::{ApiClient, Endpoints, HttpTransport, Transport};
use crate::auth::{Session, TokenStore};
use crate::directory::MemberDirectoryService;
use crate::events::EventService;
use crate::notify::{LogNotifier, Notifier};
use crate::profile::ProfileService;
use crate::storage::{Clock, FileStore, KeyValueStore, MemoryStore, ResponseCache, SystemClock};
use crate::types::{ApiError, ClientConfig};

/// Every service of the portal, sharing one store, transport and notifier
#[derive(Clone)]
pub struct PortalClient {
    pub session: Session,
    pub events: EventService,
    pub directory: MemberDirectoryService,
    pub profile: ProfileService,
}

impl PortalClient {
    /// Build against the real backend.
    ///
    /// Storage is a file when `storage_path` is set, otherwise in memory.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let store: Arc<dyn KeyValueStore> = match &config.storage_path {
            Some(path) => {
                log::info!("Using file storage at {}", path.display());
                Arc::new(FileStore::open(path)?)
            },
            None => {
                log::debug!("Using in-memory storage");
                Arc::new(MemoryStore::new())
            },
        };

        Ok(Self::with_parts(
            config,
            store,
            Arc::new(HttpTransport::new()?),
            Arc::new(LogNotifier),
            Arc::new(SystemClock),
        ))
    }

    /// Build from explicit collaborators
    pub fn with_parts(
        config: &ClientConfig,
        store: Arc<dyn KeyValueStore>,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let endpoints = Endpoints::new(&config.base_url, &config.route);
        let tokens = TokenStore::with_key(store.clone(), config.token_key.clone());
        let client = ApiClient::new(transport, tokens.clone(), notifier);
        let cache = ResponseCache::with_ttl(store.clone(), clock, config.cache_ttl_ms);

        Self {
            session: Session::new(tokens, store.clone()),
            events: EventService::new(client.clone(), endpoints.events),
            directory: MemberDirectoryService::new(client.clone(), endpoints.directory, cache),
            profile: ProfileService::new(client, endpoints.profile, store),
        }
    }
}
