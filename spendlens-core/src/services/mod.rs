//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod analytics;
mod ingest;
pub mod logging;
mod upload;

pub use analytics::{
    AnalyticsEngine, AnalyticsService, CategoryShare, CategoryTotal, Dashboard, MonthTotal,
    Recommendation, Summary, WeekdaySpending, WEEKDAY_LABELS,
};
pub use ingest::IngestService;
pub use logging::init_tracing;
pub use upload::{UploadReceipt, UploadService};
