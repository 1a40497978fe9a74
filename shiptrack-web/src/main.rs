//! shiptrack-web - order-tracking demo service
//!
//! Serves the REST/SSE API and the embedded browser UI. Provider
//! credentials all come from flags or environment variables; any provider
//! left unconfigured degrades to a "not configured" note in the API.

use anyhow::Result;
use clap::Parser;
use shiptrack_common::config;
use shiptrack_web::providers::ai::CompletionClient;
use shiptrack_web::providers::carrier::CarrierClient;
use shiptrack_web::providers::geocode::GeocodeClient;
use shiptrack_web::providers::gmail::{GmailCredentials, GmailScanner};
use shiptrack_web::providers::mail::MailClient;
use shiptrack_web::providers::Geocoder;
use shiptrack_web::store::{MemoryOrderStore, SubscriptionStore};
use shiptrack_web::{build_router, AppState};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "shiptrack-web", about = "Order-tracking demo web service")]
struct Args {
    /// Listen address
    #[arg(long, env = "SHIPTRACK_BIND", default_value = "127.0.0.1:5780")]
    bind: String,

    /// Data folder for the subscription file and geocode cache
    #[arg(long)]
    data_folder: Option<String>,

    /// Carrier tracking API key
    #[arg(long, env = "SHIPTRACK_CARRIER_KEY", hide_env_values = true)]
    carrier_key: Option<String>,

    /// AI completion API key
    #[arg(long, env = "SHIPTRACK_AI_KEY", hide_env_values = true)]
    ai_key: Option<String>,

    /// Mail relay API key
    #[arg(long, env = "SHIPTRACK_MAIL_KEY", hide_env_values = true)]
    mail_key: Option<String>,

    /// From address for outbound mail
    #[arg(long, env = "SHIPTRACK_MAIL_FROM", default_value = "shiptrack@example.com")]
    mail_from: String,

    /// Gmail OAuth client id
    #[arg(long, env = "SHIPTRACK_GMAIL_CLIENT_ID")]
    gmail_client_id: Option<String>,

    /// Gmail OAuth client secret
    #[arg(long, env = "SHIPTRACK_GMAIL_CLIENT_SECRET", hide_env_values = true)]
    gmail_client_secret: Option<String>,

    /// Gmail OAuth refresh token
    #[arg(long, env = "SHIPTRACK_GMAIL_REFRESH_TOKEN", hide_env_values = true)]
    gmail_refresh_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting shiptrack-web v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let data_folder = config::resolve_data_folder(args.data_folder.as_deref(), "SHIPTRACK_DATA")?;
    config::ensure_data_folder(&data_folder)?;
    info!("Data folder: {}", data_folder.display());

    let orders = Arc::new(MemoryOrderStore::seeded());
    let subscriptions = Arc::new(SubscriptionStore::new(config::subscriptions_path(
        &data_folder,
    )));

    let mut state = AppState::new(orders, subscriptions);

    if let Some(key) = args.carrier_key {
        let geocoder: Arc<dyn Geocoder> = Arc::new(GeocodeClient::new(
            None,
            config::geocode_cache_path(&data_folder),
        ));
        state = state.with_tracking(Arc::new(CarrierClient::new(key, None, geocoder)));
        info!("✓ Carrier tracking provider configured");
    } else {
        info!("Carrier tracking not configured (set SHIPTRACK_CARRIER_KEY)");
    }

    if let Some(key) = args.ai_key {
        state = state.with_completion(Arc::new(CompletionClient::new(key, None, None)));
        info!("✓ AI completion provider configured");
    } else {
        info!("AI chat running on rules only (set SHIPTRACK_AI_KEY)");
    }

    if let Some(key) = args.mail_key {
        state = state.with_mail(Arc::new(MailClient::new(key, args.mail_from.clone(), None)));
        info!("✓ Mail relay configured");
    } else {
        info!("Email notifications not configured (set SHIPTRACK_MAIL_KEY)");
    }

    match (
        args.gmail_client_id,
        args.gmail_client_secret,
        args.gmail_refresh_token,
    ) {
        (Some(client_id), Some(client_secret), Some(refresh_token)) => {
            state = state.with_gmail(Arc::new(GmailScanner::new(
                GmailCredentials {
                    client_id,
                    client_secret,
                    refresh_token,
                },
                None,
                None,
            )));
            info!("✓ Gmail scan configured");
        }
        _ => info!("Gmail scan not configured"),
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("shiptrack-web listening on http://{}", args.bind);
    info!("Health check: http://{}/health", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
