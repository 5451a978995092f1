//! ReviewLens server library: shared state, HTTP routes and the batch
//! commands behind the `reviewlens` binary.

pub mod commands;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
