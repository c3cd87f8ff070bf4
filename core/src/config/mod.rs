mod load;
mod types;

pub use load::{config_file_candidates, load_default, load_from};
pub use types::{AppConfig, HttpConfig, LoggingConfig, ServerConfig};
