//! Session state management

use crate::genai::GenerativeClient;
use crate::store::types::{Bill, Product};
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversational session
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-session state bundle.
///
/// Each interactive session owns its auth token, record collections and
/// turn history; nothing is shared across sessions and nothing lives at
/// module scope. Collections are replaced wholesale after a fetch and read
/// by value, so every aggregation works on a self-consistent pair.
pub struct SessionState {
    /// Bearer token for the record store, supplied per session
    pub auth_token: String,

    /// API key for the generative service
    pub api_key: String,

    /// Record store adapter
    pub store: Arc<dyn RecordStore>,

    /// Generative service adapter
    pub genai: Arc<dyn GenerativeClient>,

    /// Current product list
    products: RwLock<Vec<Product>>,

    /// Current bill list
    bills: RwLock<Vec<Bill>>,

    /// Ordered, append-only conversation history
    conversation: RwLock<Vec<ConversationTurn>>,

    /// Set while a chat question is outstanding
    chat_in_flight: AtomicBool,
}

impl SessionState {
    /// Create a session with empty collections and no history
    pub fn new(
        auth_token: String,
        api_key: String,
        store: Arc<dyn RecordStore>,
        genai: Arc<dyn GenerativeClient>,
    ) -> Self {
        Self {
            auth_token,
            api_key,
            store,
            genai,
            products: RwLock::new(Vec::new()),
            bills: RwLock::new(Vec::new()),
            conversation: RwLock::new(Vec::new()),
            chat_in_flight: AtomicBool::new(false),
        }
    }

    /// Get the current product list
    pub fn get_products(&self) -> Vec<Product> {
        self.products.read().clone()
    }

    /// Get the current bill list
    pub fn get_bills(&self) -> Vec<Bill> {
        self.bills.read().clone()
    }

    /// Replace both collections with a freshly fetched pair
    pub fn set_records(&self, products: Vec<Product>, bills: Vec<Bill>) {
        *self.products.write() = products;
        *self.bills.write() = bills;
    }

    /// Get the conversation history in append order
    pub fn get_conversation(&self) -> Vec<ConversationTurn> {
        self.conversation.read().clone()
    }

    /// Append a turn; turns are never edited or removed afterwards
    pub fn append_turn(&self, role: Role, content: String) {
        self.conversation.write().push(ConversationTurn {
            role,
            content,
            timestamp: Utc::now(),
        });
    }

    /// Number of turns in the session so far
    pub fn turn_count(&self) -> usize {
        self.conversation.read().len()
    }

    /// Claim the single chat slot; `false` when a question is outstanding
    pub fn try_begin_chat(&self) -> bool {
        self.chat_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Release the chat slot once the in-flight call resolved
    pub fn end_chat(&self) {
        self.chat_in_flight.store(false, Ordering::SeqCst);
    }

    /// Whether a chat question is currently outstanding
    pub fn is_chat_in_flight(&self) -> bool {
        self.chat_in_flight.load(Ordering::SeqCst)
    }
}
