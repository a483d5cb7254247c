use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::{openapi, routes};
use crate::config::PassportsConfig;
use crate::contract::client::PassportsApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::PassportsLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmPassportsRepository;

/// Passports module: wires the SeaORM repository into the domain service and
/// exposes it over REST and as an in-process client.
#[derive(Clone)]
pub struct Passports {
    service: Arc<Service>,
}

impl Passports {
    /// Key of this module's section under `modules` in the app config.
    pub const NAME: &'static str = "passports";

    /// Apply pending schema migrations.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running passports database migrations");
        Migrator::up(db, None).await?;
        info!("Passports database migrations completed successfully");
        Ok(())
    }

    pub fn init(db: DatabaseConnection, cfg: PassportsConfig) -> anyhow::Result<Self> {
        info!("Initializing passports module");
        debug!(
            "Loaded passports config: default_page_size={}, max_page_size={}",
            cfg.default_page_size, cfg.max_page_size
        );
        if cfg.default_page_size == 0 || cfg.max_page_size < cfg.default_page_size {
            anyhow::bail!(
                "Invalid passports paging config: default_page_size={}, max_page_size={}",
                cfg.default_page_size,
                cfg.max_page_size
            );
        }

        let repo = SeaOrmPassportsRepository::new(db);
        let service_config = ServiceConfig {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
        };
        let service = Service::new(Arc::new(repo), service_config);
        Ok(Self {
            service: Arc::new(service),
        })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// Local in-process client over the same service.
    pub fn client(&self) -> Arc<dyn PassportsApi> {
        Arc::new(PassportsLocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: Router) -> anyhow::Result<Router> {
        info!("Registering passports REST routes");
        let router = routes::register_routes(router, self.service.clone())?;
        info!("Passports REST routes registered successfully");
        Ok(router)
    }

    pub fn openapi(&self) -> utoipa::openapi::OpenApi {
        openapi::openapi()
    }
}
