//! Insight Service
//!
//! Turns the current records into a bounded list of short AI insights. The
//! list is replaced wholesale on every call; parsing of the free-text model
//! reply is isolated in [`parse_insights`] so it can be tested against
//! literal reply fixtures without any networking.

use crate::services::metrics_service::MetricsService;
use crate::services::summary_service::SummaryService;
use crate::state::SessionState;
use tracing::{info, warn};

/// Upper bound on insights kept from one reply
pub const MAX_INSIGHTS: usize = 5;
/// Fragment length bounds in characters, both exclusive
const MIN_FRAGMENT_CHARS: usize = 10;
const MAX_FRAGMENT_CHARS: usize = 200;
/// Fallback truncation when no fragment survives filtering
const RAW_FALLBACK_CHARS: usize = 500;

/// Single insight shown when the generative service is unavailable
pub const UNAVAILABLE_INSIGHT: &str = "AI is currently unavailable. Please try again later.";
/// Raw-reply stand-in when a success payload carries no text
const EMPTY_REPLY_PLACEHOLDER: &str = "Unable to generate insights.";

/// Insight service for automatic business analysis
pub struct InsightService;

impl InsightService {
    /// Re-fetch records and generate a fresh insight list.
    ///
    /// Returns `None` without calling the model when both collections are
    /// empty; callers keep whatever list they had.
    pub async fn refresh(state: &SessionState) -> Option<Vec<String>> {
        MetricsService::fetch_records(state).await;

        if state.get_products().is_empty() && state.get_bills().is_empty() {
            info!("No records available, skipping insight generation");
            return None;
        }

        Some(Self::generate(state).await)
    }

    /// Produce at most [`MAX_INSIGHTS`] insight strings from the session's
    /// current records. Never fails: a service error degrades to the single
    /// unavailable-insight fallback.
    pub async fn generate(state: &SessionState) -> Vec<String> {
        info!("InsightService::generate");

        let products = state.get_products();
        let bills = state.get_bills();
        let snapshot = MetricsService::compute(&products, &bills);
        let summary = SummaryService::render(&snapshot, &products);
        let prompt = Self::build_prompt(&summary);

        match state.genai.generate(&state.api_key, &prompt).await {
            Ok(completion) => {
                let raw = completion
                    .text
                    .unwrap_or_else(|| EMPTY_REPLY_PLACEHOLDER.to_string());
                parse_insights(&raw)
            }
            Err(e) => {
                warn!("Insight generation failed: {}", e);
                vec![UNAVAILABLE_INSIGHT.to_string()]
            }
        }
    }

    fn build_prompt(summary: &str) -> String {
        format!(
            "As a business analyst AI, analyze this inventory and sales data and provide 5 key actionable insights in bullet points. Be specific and data-driven:\n\n\
             {}\n\n\
             Provide insights about:\n\
             1. Inventory optimization\n\
             2. Revenue opportunities\n\
             3. Stock alerts\n\
             4. Pricing suggestions\n\
             5. Sales trends\n\n\
             Format: Return ONLY 5 bullet points, each starting with an emoji and being concise (max 15 words each).",
            summary
        )
    }
}

/// Split a free-text model reply into bounded insight strings.
///
/// Fragments come from splitting on bold markers and line breaks; each is
/// stripped of leading bullet/numbering characters and kept when its
/// trimmed length is strictly between 10 and 200 characters, capped at
/// [`MAX_INSIGHTS`]. When nothing survives, the first 500 characters of the
/// raw reply become a single insight: the result is never empty and this
/// function never fails.
pub fn parse_insights(raw: &str) -> Vec<String> {
    let insights: Vec<String> = raw
        .replace("**", "\n")
        .split('\n')
        .map(|fragment| {
            fragment
                .trim_start_matches(|c: char| {
                    matches!(c, '•' | '-' | '.' | '*') || c.is_ascii_digit() || c.is_whitespace()
                })
                .trim()
                .to_string()
        })
        .filter(|line| {
            let chars = line.chars().count();
            chars > MIN_FRAGMENT_CHARS && chars < MAX_FRAGMENT_CHARS
        })
        .take(MAX_INSIGHTS)
        .collect();

    if insights.is_empty() {
        vec![raw.chars().take(RAW_FALLBACK_CHARS).collect()]
    } else {
        insights
    }
}
