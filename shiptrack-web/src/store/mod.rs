//! Data access for demo orders and subscriptions

pub mod orders;
pub mod subscriptions;

pub use orders::{AdvanceOutcome, MemoryOrderStore, OrderRecord, OrderStore};
pub use subscriptions::{Subscription, SubscriptionStore};
