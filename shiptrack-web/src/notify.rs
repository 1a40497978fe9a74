//! Subscriber email notifications
//!
//! All sends are best effort: a failed or unconfigured mail provider is
//! logged and otherwise ignored, never failing the enclosing request.

use tracing::{info, warn};

use crate::store::OrderRecord;
use crate::AppState;

/// Email every subscriber of `order` about its new status.
///
/// Duplicate subscriptions get duplicate emails, matching the flat-file
/// semantics. Returns the number of successful sends.
pub async fn notify_subscribers(state: &AppState, order: &OrderRecord) -> usize {
    let Some(mail) = &state.mail else {
        info!(order_id = %order.id, "Mail not configured, skipping subscriber notification");
        return 0;
    };

    let subscribers = match state.subscriptions.subscribers_for(&order.id).await {
        Ok(subscribers) => subscribers,
        Err(e) => {
            warn!(order_id = %order.id, "Could not read subscriptions: {}", e);
            return 0;
        }
    };

    let subject = format!("Order {} update: {}", order.id, order.status);
    let body = format!(
        "Your order {} is now \"{}\" ({}% complete).\n\nThis is an automated update from the shiptrack demo.",
        order.id,
        order.status,
        order.progress()
    );

    let mut sent = 0;
    for email in subscribers {
        match mail.send(&email, &subject, &body).await {
            Ok(()) => sent += 1,
            Err(e) => warn!(order_id = %order.id, to = %email, "Notification send failed: {}", e),
        }
    }
    info!(order_id = %order.id, sent, "Subscriber notification complete");
    sent
}

/// Send the subscribe confirmation email. Returns whether it was sent.
pub async fn send_confirmation(state: &AppState, order_id: &str, email: &str) -> bool {
    let Some(mail) = &state.mail else {
        return false;
    };

    let subject = format!("Subscribed to order {}", order_id);
    let body = format!(
        "You will receive an email whenever order {} changes status.",
        order_id
    );

    match mail.send(email, &subject, &body).await {
        Ok(()) => true,
        Err(e) => {
            warn!(to = %email, "Confirmation send failed: {}", e);
            false
        }
    }
}
