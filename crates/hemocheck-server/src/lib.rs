//! HemoCheck Server
//!
//! HTTP front end for the anemia classification engine. The engine is
//! constructed once at startup; handlers only read from it.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;
