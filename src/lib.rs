pub mod commands;
pub mod config;
pub mod di;
pub mod entity;
pub mod expression;
pub mod interactor;
pub mod presenter;
pub mod router;
pub mod utils;
pub mod view;

// Re-export commonly used items
pub use commands::Command;
pub use config::AppConfig;
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use presenter::*;
pub use router::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
