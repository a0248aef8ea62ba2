// src/integrations/store/subscription.rs
//
// Live subscription plumbing shared by store implementations.
//
// A hub holds one unbounded sender per open subscription. Publishing fans a
// snapshot out to every sender in registration order. A subscription handle
// releases its slot exactly once, either through `close()` or on drop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use log::debug;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use super::client::StoreEvent;

#[derive(Default)]
pub struct SubscriptionHub {
    next_id: AtomicU64,
    senders: Mutex<HashMap<u64, UnboundedSender<StoreEvent>>>,
}

impl SubscriptionHub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Open a subscription. `initial` is queued before anything published later.
    pub fn register(self: &Arc<Self>, initial: Option<StoreEvent>) -> CatalogSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();

        if let Some(event) = initial {
            // Receiver is alive in this scope
            let _ = sender.send(event);
        }

        self.lock().insert(id, sender);
        debug!("Subscription {} opened", id);

        CatalogSubscription {
            id,
            receiver,
            hub: Arc::downgrade(self),
            released: false,
        }
    }

    /// Deliver to every open subscription; senders whose receiver is gone are pruned
    pub fn publish(&self, event: StoreEvent) {
        let mut senders = self.lock();
        senders.retain(|id, sender| {
            let delivered = sender.send(event.clone()).is_ok();
            if !delivered {
                debug!("Pruning closed subscription {}", id);
            }
            delivered
        });
    }

    pub fn active_count(&self) -> usize {
        self.lock().len()
    }

    fn release(&self, id: u64) {
        if self.lock().remove(&id).is_some() {
            debug!("Subscription {} closed", id);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, UnboundedSender<StoreEvent>>> {
        self.senders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to one live subscription
pub struct CatalogSubscription {
    id: u64,
    receiver: UnboundedReceiver<StoreEvent>,
    hub: Weak<SubscriptionHub>,
    released: bool,
}

impl CatalogSubscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Next event in emission order; `None` once closed or the store is gone
    pub async fn next(&mut self) -> Option<StoreEvent> {
        if self.released {
            return None;
        }
        self.receiver.recv().await
    }

    /// Non-suspending variant of `next`
    pub fn try_next(&mut self) -> Option<StoreEvent> {
        if self.released {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.released
    }

    /// Idempotent. Undelivered events are discarded.
    pub fn close(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}

        if let Some(hub) = self.hub.upgrade() {
            hub.release(self.id);
        }
    }
}

impl Drop for CatalogSubscription {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for CatalogSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSubscription")
            .field("id", &self.id)
            .field("released", &self.released)
            .finish()
    }
}
