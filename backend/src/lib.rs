//! Advice API library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] owns the mutation
//! pipeline and its ports, [`inbound`] adapts HTTP requests onto the driving
//! ports, and [`outbound`] provides the driven adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
