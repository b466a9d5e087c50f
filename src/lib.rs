//! Double Profit Insight - Business Metrics & AI Insight Engine
//!
//! Derives analytics snapshots from the remote product/bill store and turns
//! them into AI-generated insights and a grounded conversational session.
//! The surrounding dashboard is a thin presentation layer over this crate.

pub mod config;
pub mod error;
pub mod genai;
pub mod services;
pub mod state;
pub mod store;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for an embedding application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doubleprofit_insight=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
