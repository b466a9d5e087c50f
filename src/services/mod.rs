//! Services Layer
//!
//! Business logic shared by whatever surface embeds the engine (dashboard,
//! chat panel, background refresh). Services orchestrate the client
//! adapters and own all derived computation.
//!
//! # Architecture
//!
//! ```text
//! Dashboard UI ──┐
//!                ├──> Services ──> Record store / Generative service
//! Chat panel  ───┘
//! ```
//!
//! # Services
//!
//! - `MetricsService` - Joint record fetch, analytics snapshot computation
//! - `SummaryService` - Snapshot -> prompt-grounding text block
//! - `InsightService` - Automatic insight generation and reply parsing
//! - `ChatService` - Conversational session over the same snapshot

pub mod chat_service;
pub mod insight_service;
pub mod metrics_service;
pub mod summary_service;

// Re-export commonly used types and services
pub use chat_service::ChatService;
pub use insight_service::{parse_insights, InsightService, MAX_INSIGHTS, UNAVAILABLE_INSIGHT};
pub use metrics_service::{
    BrandShare, MetricsService, MetricsSnapshot, ProductMargin, ProductSales, StockBuckets,
    TrendPoint,
};
pub use summary_service::SummaryService;
