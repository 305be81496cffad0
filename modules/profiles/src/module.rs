use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use axum::Router;
use modkit::{DbModule, Module, ModuleCtx, ModuleEntry, OpenApiRegistry, RestfulModule};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::ProfilesConfig;
use crate::contract::client::ProfilesApi;
use crate::domain::repo::ProfilesRepository;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::ProfilesLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{InMemoryProfilesRepository, SeaOrmProfilesRepository};

pub const MODULE_NAME: &str = "profiles";

/// Profiles module: owns user profiles and publishes `dyn ProfilesApi`.
#[derive(Default)]
pub struct Profiles {
    service: ArcSwapOption<Service>,
}

impl Profiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// The service built during `init`, if it has run.
    pub fn service(&self) -> Option<Arc<Service>> {
        self.service.load_full()
    }
}

/// Registry entry: profiles has no module dependencies.
pub fn module_entry() -> ModuleEntry {
    let module = Arc::new(Profiles::new());
    ModuleEntry::new(MODULE_NAME, module.clone())
        .with_db(module.clone())
        .with_rest(module)
}

#[async_trait]
impl Module for Profiles {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let cfg: ProfilesConfig = ctx.module_config()?;
        debug!(directory_limit = cfg.directory_limit, "profiles configured");

        let repo: Arc<dyn ProfilesRepository> = match ctx.db() {
            Some(db) => Arc::new(SeaOrmProfilesRepository::new(db.clone())),
            None => {
                info!("no database configured, profiles are kept in memory");
                Arc::new(InMemoryProfilesRepository::new())
            }
        };

        let service = Arc::new(Service::new(
            repo,
            ServiceConfig {
                directory_limit: cfg.directory_limit,
            },
        ));
        self.service.store(Some(service.clone()));

        let api: Arc<dyn ProfilesApi> = Arc::new(ProfilesLocalClient::new(service));
        ctx.client_hub().register::<dyn ProfilesApi>(api);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[async_trait]
impl DbModule for Profiles {
    async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("running profiles migrations");
        Migrator::up(db, None).await?;
        Ok(())
    }
}

impl RestfulModule for Profiles {
    fn register_rest(
        &self,
        _ctx: &ModuleCtx,
        router: Router,
        openapi: &dyn OpenApiRegistry,
    ) -> anyhow::Result<Router> {
        let service = self
            .service()
            .ok_or_else(|| anyhow::anyhow!("profiles service not initialized"))?;
        routes::register_routes(router, openapi, service)
    }
}
