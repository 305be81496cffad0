use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use axum::Router;
use modkit::{DbModule, Module, ModuleCtx, ModuleEntry, OpenApiRegistry, RestfulModule};
use profiles::client::ProfilesApi;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::HangoutsConfig;
use crate::contract::client::HangoutsApi;
use crate::domain::planner::Planner;
use crate::domain::repo::SuggestionsRepository;
use crate::domain::service::Service;
use crate::gateways::local::HangoutsLocalClient;
use crate::infra::generator::GeminiGenerator;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{InMemorySuggestionsRepository, SeaOrmSuggestionsRepository};

pub const MODULE_NAME: &str = "hangouts";

/// Hangouts module: suggestion lifecycle, generation and the dashboard.
#[derive(Default)]
pub struct Hangouts {
    service: ArcSwapOption<Service>,
}

impl Hangouts {
    pub fn new() -> Self {
        Self::default()
    }

    /// The service built during `init`, if it has run.
    pub fn service(&self) -> Option<Arc<Service>> {
        self.service.load_full()
    }
}

/// Registry entry: initialised after `profiles`, whose client it consumes.
pub fn module_entry() -> ModuleEntry {
    let module = Arc::new(Hangouts::new());
    ModuleEntry::new(MODULE_NAME, module.clone())
        .with_deps(&[profiles::MODULE_NAME])
        .with_db(module.clone())
        .with_rest(module)
}

#[async_trait]
impl Module for Hangouts {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let cfg: HangoutsConfig = ctx.module_config()?;
        debug!(
            horizon_days = cfg.horizon_days,
            slot_attempts = cfg.slot_attempts,
            utc_offset_minutes = cfg.utc_offset_minutes,
            "hangouts configured"
        );

        let profiles = ctx.client_hub().get::<dyn ProfilesApi>()?;

        let repo: Arc<dyn SuggestionsRepository> = match ctx.db() {
            Some(db) => Arc::new(SeaOrmSuggestionsRepository::new(db.clone())),
            None => {
                info!("no database configured, suggestions are kept in memory");
                Arc::new(InMemorySuggestionsRepository::new())
            }
        };

        let planner = Arc::new(Planner::new(cfg.planner()));
        let mut service = Service::new(repo, profiles, planner.clone());
        match cfg.generator.active_key() {
            Some(key) => {
                let generator = GeminiGenerator::new(&cfg.generator, key, planner)?;
                info!(model = %cfg.generator.model, "external suggestion generator enabled");
                service = service.with_generator(Arc::new(generator));
            }
            None => info!("no generator API key, using the local planner only"),
        }

        let service = Arc::new(service);
        self.service.store(Some(service.clone()));

        let api: Arc<dyn HangoutsApi> = Arc::new(HangoutsLocalClient::new(service));
        ctx.client_hub().register::<dyn HangoutsApi>(api);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[async_trait]
impl DbModule for Hangouts {
    async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("running hangouts migrations");
        Migrator::up(db, None).await?;
        Ok(())
    }
}

impl RestfulModule for Hangouts {
    fn register_rest(
        &self,
        _ctx: &ModuleCtx,
        router: Router,
        openapi: &dyn OpenApiRegistry,
    ) -> anyhow::Result<Router> {
        let service = self
            .service()
            .ok_or_else(|| anyhow::anyhow!("hangouts service not initialized"))?;
        routes::register_routes(router, openapi, service)
    }
}
