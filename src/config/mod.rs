pub mod settings;

pub use settings::{AppConfig, DisplaySettings, EloSettings, FetchSettings};
