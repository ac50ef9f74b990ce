//! CLI command handlers. Each command is in its own file.

mod config;
mod generate;
mod research;
mod session;

pub use config::run_config;
pub use generate::run_generate;
pub use research::run_research;
pub use session::run_session;
