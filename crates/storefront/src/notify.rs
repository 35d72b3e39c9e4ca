//! User-facing cart notifications.
//!
//! Cart operations never return errors to the UI. Conditions the shopper
//! should see (out of stock, failed add) are pushed to a [`Notifier`], the
//! equivalent of a toast.

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A condition to show the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Requested quantity exceeds available stock.
    OutOfStock,
    /// Adding a product failed (network, unknown product, storage).
    AddFailed,
    /// The product to remove is not in the cart, or storage failed.
    RemoveFailed,
    /// Changing a quantity failed (network, storage).
    UpdateFailed,
}

impl Notice {
    /// Message shown to the shopper.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OutOfStock => "Requested quantity is out of stock",
            Self::AddFailed => "Failed to add product",
            Self::RemoveFailed => "Failed to remove product",
            Self::UpdateFailed => "Failed to update product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    /// Deliver a notice. Must not block.
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Writes notices to the tracing log. Used by headless front ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(notice = ?notice, "{notice}");
    }
}

/// Forwards notices over a channel to whatever renders them.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            debug!(notice = ?notice, "Notice dropped, no receiver");
        }
    }
}
