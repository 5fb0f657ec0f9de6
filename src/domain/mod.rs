mod feed;
pub mod models;

pub use feed::EventFeed;
pub use models::*;
