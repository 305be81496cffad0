//! REST-facing helpers shared by modules: Problem Details and the OpenAPI sink.

pub mod problem;

use utoipa::openapi::OpenApi;

/// Collects per-module OpenAPI documents into the host's single document.
pub trait OpenApiRegistry {
    /// Merge a module's `#[derive(utoipa::OpenApi)]` document (paths and components).
    fn register_doc(&self, doc: OpenApi);

    /// Downcast support for accessing the concrete implementation if needed.
    fn as_any(&self) -> &dyn std::any::Any;
}
