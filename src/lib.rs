pub mod config;
pub mod detector;
pub mod fetch;
pub mod history;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod price;
pub mod sites;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use pipeline::{Pipeline, RunSummary};
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
