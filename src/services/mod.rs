pub mod analysis;
pub mod ingestion;

pub use analysis::{AnalysisService, EventSource};
pub use ingestion::IngestionService;
