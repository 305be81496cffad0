use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{middleware::from_fn, routing::get, Router};
use modkit::{ModuleCtx, ModuleEntry, OpenApiRegistry};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::openapi::{InfoBuilder, OpenApi, OpenApiBuilder};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub const MODULE_NAME: &str = "api_ingress";

/// HTTP host: owns the router, collects every module's OpenAPI document,
/// and serves until the runtime cancels.
pub struct ApiIngress {
    config: ArcSwap<ApiIngressConfig>,
    openapi: Mutex<OpenApi>,
    final_router: Mutex<Option<Router>>,
    local_addr: Mutex<Option<SocketAddr>>,
    server: Mutex<Option<JoinHandle<()>>>,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        let info = InfoBuilder::new()
            .title("SyncUp API")
            .version(env!("CARGO_PKG_VERSION"))
            .description(Some("Student profiles and hangout suggestions"))
            .build();
        Self {
            config: ArcSwap::from_pointee(config),
            openapi: Mutex::new(OpenApiBuilder::new().info(info).build()),
            final_router: Mutex::new(None),
            local_addr: Mutex::new(None),
            server: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> ApiIngressConfig {
        (**self.config.load()).clone()
    }

    /// Snapshot of the merged OpenAPI document.
    pub fn openapi(&self) -> OpenApi {
        self.openapi.lock().clone()
    }

    /// The router produced by the REST phase, if it ran.
    pub fn router(&self) -> Option<Router> {
        self.final_router.lock().clone()
    }

    /// Address the server is bound to once `start` has returned.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.lock()
    }

    /// Global middleware, outermost to innermost:
    /// PropagateRequestId → SetRequestId → push_req_id_to_extensions → Trace → Timeout → CORS → BodyLimit
    fn apply_middleware(&self, mut router: Router) -> Router {
        let config = self.get_config();
        let x_request_id = request_id::header();

        router = router.layer(RequestBodyLimitLayer::new(config.body_limit_bytes));
        if config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )));
        router = router.layer(request_id::create_trace_layer());
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(SetRequestIdLayer::new(
            x_request_id.clone(),
            request_id::MakeReqId,
        ));
        router.layer(PropagateRequestIdLayer::new(x_request_id))
    }
}

/// Registry entry with the host, REST-host and stateful roles.
pub fn module_entry() -> ModuleEntry {
    module_entry_with(Arc::new(ApiIngress::default()))
}

pub fn module_entry_with(ingress: Arc<ApiIngress>) -> ModuleEntry {
    ModuleEntry::new(MODULE_NAME, ingress.clone())
        .with_rest_host(ingress.clone())
        .with_stateful(ingress)
}

#[async_trait]
impl modkit::Module for ApiIngress {
    async fn init(&self, ctx: &ModuleCtx) -> Result<()> {
        let cfg = ctx.module_config::<ApiIngressConfig>()?;
        tracing::debug!(bind_addr = %cfg.bind_addr, docs = cfg.enable_docs, "api_ingress configured");
        self.config.store(Arc::new(cfg));
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl modkit::RestHostModule for ApiIngress {
    fn rest_prepare(&self, _ctx: &ModuleCtx, router: Router) -> Result<Router> {
        Ok(router.route("/health", get(web::health_check)))
    }

    fn rest_finalize(&self, _ctx: &ModuleCtx, mut router: Router) -> Result<Router> {
        if self.get_config().enable_docs {
            let doc = Arc::new(serde_json::to_value(self.openapi())?);
            let paths = doc["paths"].as_object().map(|p| p.len()).unwrap_or(0);
            tracing::info!(paths, "serving OpenAPI document at /openapi.json");
            router = router.route(
                "/openapi.json",
                get(move || {
                    let doc = doc.clone();
                    async move { axum::Json((*doc).clone()) }
                }),
            );
        }

        let router = self.apply_middleware(router.fallback(web::not_found_fallback));
        *self.final_router.lock() = Some(router.clone());
        Ok(router)
    }

    fn as_registry(&self) -> &dyn OpenApiRegistry {
        self
    }
}

impl OpenApiRegistry for ApiIngress {
    fn register_doc(&self, doc: OpenApi) {
        let mut merged = self.openapi.lock();
        let before = merged.paths.paths.len();
        merged.merge(doc);
        tracing::debug!(
            added = merged.paths.paths.len() - before,
            "merged module OpenAPI document"
        );
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[async_trait]
impl modkit::StatefulModule for ApiIngress {
    /// Binds the listener before returning so the server is reachable once
    /// the start phase completes.
    async fn start(&self, cancel: CancellationToken) -> Result<()> {
        let cfg = self.get_config();
        let addr: SocketAddr = cfg
            .bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", cfg.bind_addr, e))?;

        let router = match self.router() {
            Some(r) => r,
            None => {
                tracing::debug!("no router from REST phase, serving health only");
                self.apply_middleware(Router::new().route("/health", get(web::health_check)))
            }
        };

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?;
        *self.local_addr.lock() = Some(bound);
        tracing::info!(addr = %bound, "HTTP server bound");

        let handle = tokio::spawn(async move {
            let shutdown = async move {
                cancel.cancelled().await;
                tracing::info!("HTTP server shutting down gracefully");
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
            {
                tracing::error!(error = %e, "HTTP server terminated with error");
            }
        });
        *self.server.lock() = Some(handle);
        Ok(())
    }

    async fn stop(&self, _cancel: CancellationToken) -> Result<()> {
        let handle = self.server.lock().take();
        if let Some(handle) = handle {
            match tokio::time::timeout(Duration::from_secs(30), handle).await {
                Ok(joined) => joined?,
                Err(_) => tracing::warn!("HTTP server did not stop within 30s"),
            }
        }
        Ok(())
    }
}
