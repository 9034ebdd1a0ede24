pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod fs;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod validation;

pub use error::FunnelError;
pub use models::stage::FunnelStage;
