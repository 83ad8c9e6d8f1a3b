//! Publish/subscribe bus owned by the simulation context.
//!
//! Every subscriber gets its own unbounded channel; `publish` fans a clone of
//! the event out to each of them. Subscribers drain their receiver whenever
//! they run, which keeps publishers free of any borrow on the listeners.

/// Identifies one subscription for later removal.
pub type SubscriptionId = u64;

/// A live subscription: its id and the receiving end of its channel.
#[derive(Debug)]
pub struct Subscription<T> {
    pub id: SubscriptionId,
    pub receiver: flume::Receiver<T>,
}

impl<T> Subscription<T> {
    /// Take every event delivered since the last drain.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}

#[derive(Debug)]
pub struct EventBus<T: Clone> {
    subscribers: Vec<(SubscriptionId, flume::Sender<T>)>,
    next_id: SubscriptionId,
}

impl<T: Clone> EventBus<T> {
    pub fn new() -> Self {
        log::debug!("EventBus initialized.");
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self) -> Subscription<T> {
        let (sender, receiver) = flume::unbounded();
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, sender));
        log::trace!("Subscription {id} added.");
        Subscription { id, receiver }
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        let removed = self.subscribers.len() != before;
        if removed {
            log::trace!("Subscription {id} removed.");
        }
        removed
    }

    /// Deliver `event` to every subscriber. Subscribers whose receiver was
    /// dropped without unsubscribing are pruned.
    pub fn publish(&mut self, event: T) {
        log::trace!("Publishing an event to {} subscribers.", self.subscribers.len());
        self.subscribers.retain(|(id, sender)| {
            let delivered = sender.send(event.clone()).is_ok();
            if !delivered {
                log::debug!("Subscription {id} disconnected; pruning.");
            }
            delivered
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
