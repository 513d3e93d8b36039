//! Service layer for the expense manager
//!
//! The service layer owns session state: validation on the way in, computed
//! totals on the way out, and change notification for observers.

pub mod store;

pub use store::{ExpenseStore, StoreEvent, SubscriptionId};
