use std::sync::Arc;

use anyhow::{anyhow, Context};
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::config::UserPlacesConfig;
use crate::contract::client::PlacesApi;
use crate::domain::identity::IdentitySync;
use crate::domain::repo::AggregateStore;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::PlacesLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmAggregateStore;
use crate::infra::webhook::HmacWebhookVerifier;

/// Wired module: one store handle shared by the service, the identity
/// synchronizer and the in-process client.
#[derive(Clone)]
pub struct UserPlaces {
    service: Arc<Service>,
    identity: Arc<IdentitySync>,
    client: Arc<dyn PlacesApi>,
}

impl UserPlaces {
    /// Connect to the configured database, run migrations and wire everything.
    pub async fn init(cfg: &UserPlacesConfig) -> anyhow::Result<Self> {
        info!("Initializing user_places module");
        debug!(
            "Loaded user_places config: max_conns={}, store_timeout_ms={}",
            cfg.max_conns, cfg.store_timeout_ms
        );

        let mut opts = ConnectOptions::new(cfg.database_url.clone());
        opts.max_connections(cfg.max_conns).sqlx_logging(false);
        let conn = Database::connect(opts)
            .await
            .context("connect to document database")?;

        info!("Running user_places database migrations");
        Migrator::up(&conn, None)
            .await
            .context("user_places migrations failed")?;

        Self::with_store(Arc::new(SeaOrmAggregateStore::new(conn)), cfg)
    }

    /// Wire the module around an already constructed store.
    pub fn with_store(
        store: Arc<dyn AggregateStore>,
        cfg: &UserPlacesConfig,
    ) -> anyhow::Result<Self> {
        let secret = cfg
            .webhook_secret
            .as_deref()
            .ok_or_else(|| anyhow!("webhook_secret required"))?;

        let service = Service::new(
            store,
            ServiceConfig {
                store_timeout: cfg.store_timeout(),
            },
        );
        let verifier = Arc::new(HmacWebhookVerifier::new(secret, cfg.webhook_tolerance())?);
        let identity = Arc::new(IdentitySync::new(service.clone(), verifier));
        let service = Arc::new(service);

        let client: Arc<dyn PlacesApi> =
            Arc::new(PlacesLocalClient::new(service.clone(), identity.clone()));
        info!("user_places module ready");

        Ok(Self {
            service,
            identity,
            client,
        })
    }

    /// In-process API for other modules and the transport layer.
    pub fn client(&self) -> Arc<dyn PlacesApi> {
        self.client.clone()
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn identity(&self) -> Arc<IdentitySync> {
        self.identity.clone()
    }
}
