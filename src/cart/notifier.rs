//! Cart Change Broadcast
//!
//! A process-wide publish/subscribe channel that keeps every on-screen
//! consumer of cart state (badge counter, cart page, checkout page)
//! consistent without direct references to one another. Signals carry no
//! payload: subscribers always re-read the [`CartStore`](super::store::CartStore),
//! so coalesced or reordered deliveries are harmless.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

const CHANNEL_CAPACITY: usize = 16;

/// Named signals emitted by the cart core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartSignal {
    /// Cart contents changed; re-read the store.
    CartUpdated,
    /// The cart was emptied.
    CartEmptied,
    /// An order completed on the payment processor side.
    OrderCompleted,
}

impl CartSignal {
    /// `CartEmptied` and `OrderCompleted` are semantically equivalent for a
    /// badge: reset any cached count to zero.
    pub fn resets_count(self) -> bool {
        matches!(self, CartSignal::CartEmptied | CartSignal::OrderCompleted)
    }
}

/// Process-lifetime broadcast handle. Cloning shares the same channel.
#[derive(Debug, Clone)]
pub struct CartNotifier {
    sender: broadcast::Sender<CartSignal>,
}

impl CartNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Registers a subscriber. Dropping the returned subscription
    /// deregisters it, so a view that unmounts cannot leak a handler.
    pub fn subscribe(&self) -> CartSubscription {
        CartSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Emits a signal to all current subscribers. Synchronous, and never an
    /// error: a cart with nobody watching is still a valid cart.
    pub fn emit(&self, signal: CartSignal) {
        let _ = self.sender.send(signal);
    }
}

impl Default for CartNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// A live registration on the cart channel.
#[derive(Debug)]
pub struct CartSubscription {
    receiver: broadcast::Receiver<CartSignal>,
}

impl CartSubscription {
    /// Waits for the next signal. Returns `None` once the notifier is gone.
    ///
    /// A lagged receiver skips ahead rather than failing: missed signals
    /// were announcing state the next re-read observes anyway.
    pub async fn next(&mut self) -> Option<CartSignal> {
        loop {
            match self.receiver.recv().await {
                Ok(signal) => return Some(signal),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`next`](Self::next); `None` when no signal
    /// is pending.
    pub fn try_next(&mut self) -> Option<CartSignal> {
        loop {
            match self.receiver.try_recv() {
                Ok(signal) => return Some(signal),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}
