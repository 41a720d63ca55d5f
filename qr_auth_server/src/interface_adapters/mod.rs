// Interface adapters: HTTP protocol, handlers, routes, and store adapters.

pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
