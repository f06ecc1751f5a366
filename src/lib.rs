//! getjson: a JSON-over-GET application layer.
//!
//! Handler groups register their endpoints in a route table; the dispatcher
//! matches a request path, binds and coerces its parameters, invokes the
//! handler and converts the native reply into a [`Document`], whose text
//! form the HTTP adapter writes back.

// Core
pub mod convert;
pub mod dispatch;
pub mod document;
pub mod routing;

// Adapter and sample groups
pub mod demo;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use convert::{ConvertError, ToDocument};
pub use dispatch::{DispatchError, Dispatcher};
pub use document::Document;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{HandlerGroup, RouteTable};

/// Route table of the sample groups, built with the configured policies.
pub fn demo_dispatcher(config: &AppConfig) -> Result<Dispatcher, routing::RouteError> {
    let table = routing::RouteTableBuilder::new(config.routing.duplicate_routes)
        .group(demo::ApiController)
        .group(demo::PeopleController::default())
        .build()?;
    Ok(Dispatcher::new(table).with_route_miss(config.routing.route_miss))
}
