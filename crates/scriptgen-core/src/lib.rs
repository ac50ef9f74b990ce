pub mod config;
pub mod logging;

pub mod chain;
pub mod http;
pub mod llm;
pub mod memory;
pub mod pipeline;
pub mod prompt;
pub mod research;
pub mod retry;
