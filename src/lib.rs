//! Salon Admin data layer
//!
//! Paginated, searchable resource stores for the marketplace admin dashboard,
//! backed by the REST API with a mock catalog fallback for reads.

pub mod auth;
pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod mock;
pub mod models;
pub mod store;

use std::sync::Arc;

use auth::{FileTokenStore, TokenStore};
use client::ApiClient;
use config::Config;
use controller::ListController;
use errors::AppError;
use models::{Salon, School, Service, User};
use store::{Resource, ResourceStore};

/// Everything the admin pages share: the configured client and one store per
/// resource. Created once per dashboard session and disposed with it.
pub struct AdminContext {
    pub config: Arc<Config>,
    pub client: ApiClient,
    pub salons: Arc<ResourceStore<Salon>>,
    pub services: Arc<ResourceStore<Service>>,
    pub users: Arc<ResourceStore<User>>,
    pub schools: Arc<ResourceStore<School>>,
}

impl AdminContext {
    /// Build the context, reading the bearer token from the configured file.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let tokens = Arc::new(FileTokenStore::new(config.token_path.clone()));
        tracing::debug!("Reading bearer token from {:?}", tokens.path());
        Self::new(config, tokens)
    }

    pub fn new(config: Config, tokens: Arc<dyn TokenStore>) -> Result<Self, AppError> {
        let client = ApiClient::new(&config.api_base_url, tokens, config.request_timeout)?;
        let policy = config.fallback_policy;

        Ok(Self {
            salons: Arc::new(ResourceStore::new(client.clone(), policy)),
            services: Arc::new(ResourceStore::new(client.clone(), policy)),
            users: Arc::new(ResourceStore::new(client.clone(), policy)),
            schools: Arc::new(ResourceStore::new(client.clone(), policy)),
            client,
            config: Arc::new(config),
        })
    }

    /// Page controller over one of this context's stores.
    pub fn controller<R: Resource>(&self, store: &Arc<ResourceStore<R>>) -> ListController<R> {
        ListController::new(Arc::clone(store), self.config.search_debounce)
    }

    /// Cancel in-flight fetches on every store.
    pub fn dispose(&self) {
        self.salons.dispose();
        self.services.dispose();
        self.users.dispose();
        self.schools.dispose();
    }
}
