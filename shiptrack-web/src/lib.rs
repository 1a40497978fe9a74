//! shiptrack-web library - order-tracking demo service
//!
//! Exposes the REST/SSE API, the embedded browser UI, and the provider
//! adapters. The binary in `main.rs` wires configuration and providers
//! into [`AppState`] and serves [`build_router`].

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod chat;
pub mod detect;
pub mod notify;
pub mod providers;
pub mod store;

use chat::IntentRules;
use detect::DetectTable;
use providers::gmail::GmailScanner;
use providers::{CompletionProvider, MailSender, TrackingProvider};
use store::{OrderStore, SubscriptionStore};

/// Application state shared across HTTP handlers
///
/// Provider fields are `None` when the matching credentials were absent at
/// startup; handlers degrade to a "not configured" note instead of failing.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderStore>,
    pub subscriptions: Arc<SubscriptionStore>,
    pub tracking: Option<Arc<dyn TrackingProvider>>,
    pub completion: Option<Arc<dyn CompletionProvider>>,
    pub mail: Option<Arc<dyn MailSender>>,
    pub gmail: Option<Arc<GmailScanner>>,
    pub detect: Arc<DetectTable>,
    pub intents: Arc<IntentRules>,
}

impl AppState {
    /// Create state with no optional providers configured
    pub fn new(orders: Arc<dyn OrderStore>, subscriptions: Arc<SubscriptionStore>) -> Self {
        Self {
            orders,
            subscriptions,
            tracking: None,
            completion: None,
            mail: None,
            gmail: None,
            detect: Arc::new(DetectTable::new()),
            intents: Arc::new(IntentRules::new()),
        }
    }

    pub fn with_tracking(mut self, tracking: Arc<dyn TrackingProvider>) -> Self {
        self.tracking = Some(tracking);
        self
    }

    pub fn with_completion(mut self, completion: Arc<dyn CompletionProvider>) -> Self {
        self.completion = Some(completion);
        self
    }

    pub fn with_mail(mut self, mail: Arc<dyn MailSender>) -> Self {
        self.mail = Some(mail);
        self
    }

    pub fn with_gmail(mut self, gmail: Arc<GmailScanner>) -> Self {
        self.gmail = Some(gmail);
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        // Tracking
        .route("/api/track", get(api::track::track_query).post(api::track::track_post))
        .route("/api/track/:order_id", get(api::track::track_by_path))
        .route("/api/track-any", post(api::track_any::track_any))
        .route("/api/stream/:order_id", get(api::stream::stream_order))
        // Demo admin + subscriptions
        .route("/api/admin/advance/:order_id", post(api::admin::advance_order))
        .route("/api/subscribe", post(api::subscribe::subscribe))
        // Chat + ingest
        .route("/api/chat", post(api::chat::chat))
        .route("/api/ingest-email", post(api::ingest::ingest_email))
        .route("/api/gmail/scan", get(api::ingest::gmail_scan))
        // Informational
        .route("/api/config", get(api::info::get_config))
        .route("/api/analytics", get(api::info::get_analytics))
        .route("/api/search", get(api::info::search_orders))
        .route("/api/orders", get(api::info::list_orders))
        .route("/api/orders/:order_id", get(api::info::get_order))
        .route("/api/eta/:order_id", get(api::info::get_eta))
        .route("/api/returns", get(api::info::get_returns_policy))
        // UI + health
        .route("/", get(api::ui::serve_index))
        .route("/static/app.js", get(api::ui::serve_app_js))
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
