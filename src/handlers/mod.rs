pub mod content;
pub mod health;
pub mod upload;

pub use content::{bulk_save_handler, get_all_handler, save_handler};
pub use health::health_handler;
pub use upload::upload_handler;
