//! # Order Session
//!
//! Holds the draft order for one terminal session.
//!
//! ## Thread Safety
//! The `OrderBuilder` itself is a plain value; this wrapper protects it with
//! `Arc<Mutex<_>>` so async commands on different tasks share one draft
//! order. Lock scope is a single closure, never held across an `.await`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State                                        │
//! │                                                                         │
//! │  add_to_order ───────┐                                                  │
//! │  update_order_line ──┼──► OrderSession ──► Mutex<OrderBuilder>          │
//! │  submit_order ───────┘         │                                        │
//! │                                │ clone() shares the same draft          │
//! │                                ▼                                        │
//! │  One session per terminal; the host creates one OrderSession per        │
//! │  cashier screen and hands it to the commands that need it.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use revpos_core::OrderBuilder;

/// Shared handle to a session's draft order.
#[derive(Debug, Clone, Default)]
pub struct OrderSession {
    order: Arc<Mutex<OrderBuilder>>,
}

impl OrderSession {
    /// Creates a new empty session.
    pub fn new() -> Self {
        OrderSession {
            order: Arc::new(Mutex::new(OrderBuilder::new())),
        }
    }

    /// Executes a function with read access to the draft order.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = session.with_order(|order| order.total());
    /// ```
    pub fn with_order<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderBuilder) -> R,
    {
        let order = self.order.lock().expect("Order mutex poisoned");
        f(&order)
    }

    /// Executes a function with write access to the draft order.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session.with_order_mut(|order| order.add_item(&item, 1, ""))?;
    /// ```
    pub fn with_order_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderBuilder) -> R,
    {
        let mut order = self.order.lock().expect("Order mutex poisoned");
        f(&mut order)
    }
}
