//! Chat Service
//!
//! Multi-turn conversational session grounded in the metrics snapshot. The
//! turn history is append-only and lives for one session; exactly one
//! question may be outstanding at a time.

use crate::error::{AppError, Result};
use crate::services::metrics_service::MetricsService;
use crate::services::summary_service::SummaryService;
use crate::state::{Role, SessionState};
use tracing::{info, warn};

/// Reply used when a success payload carries no usable text
const EMPTY_REPLY_PLACEHOLDER: &str = "Sorry, I couldn't process that request.";

/// Canned starter questions surfaced next to the chat box
const QUICK_PROMPTS: [&str; 4] = [
    "What products should I restock?",
    "Show me my top selling products",
    "How can I increase my profit?",
    "What's my inventory worth?",
];

/// Chat service for the conversational session
pub struct ChatService;

impl ChatService {
    /// Submit a user question and append the assistant reply.
    ///
    /// The user turn is appended before the network call. A failed call
    /// appends an assistant turn describing the failure instead of
    /// surfacing an error; the returned string is always the content of the
    /// appended assistant turn. Submissions while a question is outstanding
    /// are rejected without queuing.
    pub async fn ask(state: &SessionState, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::Validation("Question must not be empty".to_string()));
        }
        if !state.try_begin_chat() {
            return Err(AppError::Validation(
                "A question is already in flight".to_string(),
            ));
        }

        info!("ChatService::ask");

        // Transcript covers the turns before this question; the question
        // itself travels in its own prompt section.
        let transcript = Self::render_transcript(state);
        state.append_turn(Role::User, question.to_string());

        let products = state.get_products();
        let bills = state.get_bills();
        let snapshot = MetricsService::compute(&products, &bills);
        let summary = SummaryService::render(&snapshot, &products);
        let prompt = Self::build_prompt(&summary, &transcript, question);

        let reply = match state.genai.generate(&state.api_key, &prompt).await {
            Ok(completion) => completion
                .text
                .unwrap_or_else(|| EMPTY_REPLY_PLACEHOLDER.to_string()),
            Err(e) => {
                warn!("Chat completion failed: {}", e);
                format!("Error: {}", e)
            }
        };

        state.append_turn(Role::Assistant, reply.clone());
        state.end_chat();

        Ok(reply)
    }

    /// Starter questions for an empty session
    pub fn quick_prompts() -> &'static [&'static str] {
        &QUICK_PROMPTS
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn render_transcript(state: &SessionState) -> String {
        state
            .get_conversation()
            .iter()
            .map(|turn| {
                let label = match turn.role {
                    Role::User => "User",
                    Role::Assistant => "Assistant",
                };
                format!("{}: {}", label, turn.content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn build_prompt(summary: &str, transcript: &str, question: &str) -> String {
        format!(
            "You are an AI business consultant for an inventory management system called \"Double Profit\".\n\n\
             BUSINESS DATA:\n{}\n\n\
             CONVERSATION HISTORY:\n{}\n\n\
             USER QUESTION: {}\n\n\
             Provide a helpful, concise answer (max 100 words). Use the business data to give specific insights. If asked about products, bills, or inventory, reference the actual data provided.",
            summary, transcript, question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::genai::{Completion, GenerativeClient};
    use crate::store::types::{Bill, Product};
    use crate::store::RecordStore;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Records the prompts it was asked to complete
    struct RecordingModel {
        reply: &'static str,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingModel {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeClient for RecordingModel {
        async fn generate(&self, _api_key: &str, prompt: &str) -> crate::error::Result<Completion> {
            self.prompts.lock().push(prompt.to_string());
            Ok(Completion {
                text: Some(self.reply.to_string()),
            })
        }
    }

    struct Unavailable;

    #[async_trait]
    impl GenerativeClient for Unavailable {
        async fn generate(&self, _api_key: &str, _prompt: &str) -> crate::error::Result<Completion> {
            Err(AppError::Upstream("API Error: 503".to_string()))
        }
    }

    struct EmptyStore;

    #[async_trait]
    impl RecordStore for EmptyStore {
        async fn list_products(&self, _auth_token: &str) -> crate::error::Result<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn list_bills(&self, _auth_token: &str) -> crate::error::Result<Vec<Bill>> {
            Ok(Vec::new())
        }
    }

    fn session(genai: Arc<dyn GenerativeClient>) -> crate::state::SessionState {
        crate::state::SessionState::new(
            "token".to_string(),
            "key".to_string(),
            Arc::new(EmptyStore),
            genai,
        )
    }

    #[tokio::test]
    async fn test_question_appends_user_then_assistant_turn() {
        let state = session(Arc::new(RecordingModel::new(
            "Restock the three critical items first.",
        )));

        let reply = ChatService::ask(&state, "What products should I restock?")
            .await
            .unwrap();

        let turns = state.get_conversation();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "What products should I restock?");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, reply);
        assert!(!state.is_chat_in_flight());
    }

    #[tokio::test]
    async fn test_failure_becomes_visible_assistant_turn() {
        let state = session(Arc::new(Unavailable));

        let reply = ChatService::ask(&state, "How can I increase my profit?")
            .await
            .unwrap();

        assert!(reply.starts_with("Error:"));
        assert!(reply.contains("503"));

        let turns = state.get_conversation();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, reply);
        assert!(!state.is_chat_in_flight());
    }

    #[tokio::test]
    async fn test_prompt_carries_history_and_question() {
        let model = Arc::new(RecordingModel::new("Noted."));
        let state = session(model.clone());

        ChatService::ask(&state, "What products should I restock?")
            .await
            .unwrap();
        ChatService::ask(&state, "And what is my inventory worth?")
            .await
            .unwrap();

        let prompts = model.prompts.lock();
        assert_eq!(prompts.len(), 2);

        // First prompt: empty history, question in its own section.
        assert!(prompts[0].contains("CONVERSATION HISTORY:\n\n"));
        assert!(prompts[0].contains("USER QUESTION: What products should I restock?"));

        // Second prompt: both prior turns rendered with role labels.
        assert!(prompts[1].contains("User: What products should I restock?"));
        assert!(prompts[1].contains("Assistant: Noted."));
        assert!(prompts[1].contains("USER QUESTION: And what is my inventory worth?"));
        assert!(prompts[1].contains("BUSINESS DATA:"));
    }

    #[tokio::test]
    async fn test_second_submission_rejected_while_in_flight() {
        let state = session(Arc::new(RecordingModel::new("Noted.")));

        assert!(state.try_begin_chat());

        let err = ChatService::ask(&state, "Am I allowed in?").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(state.turn_count(), 0);

        state.end_chat();

        ChatService::ask(&state, "How about now?").await.unwrap();
        assert_eq!(state.turn_count(), 2);
    }

    #[tokio::test]
    async fn test_blank_question_rejected() {
        let state = session(Arc::new(RecordingModel::new("Noted.")));

        let err = ChatService::ask(&state, "   ").await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(state.turn_count(), 0);
        assert!(!state.is_chat_in_flight());
    }

    #[test]
    fn test_quick_prompts_exposed() {
        assert_eq!(ChatService::quick_prompts().len(), 4);
        assert!(ChatService::quick_prompts()
            .contains(&"What products should I restock?"));
    }
}
