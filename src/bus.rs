use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

type Callback<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Publish/subscribe bus for session events.
///
/// An explicit instance owned by the application context; components that
/// need notifications hold a clone. Subscriptions are disposed by dropping
/// the returned [`Subscription`] handle.
pub struct EventBus<E> {
    inner: Arc<BusInner<E>>,
}

struct BusInner<E> {
    subscribers: Mutex<HashMap<u64, Callback<E>>>,
    next_id: AtomicU64,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BusInner {
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register a callback for every published event.
    ///
    /// Dropping the returned handle unsubscribes. Callbacks run on the
    /// publisher's thread and must not subscribe from inside a callback.
    pub fn subscribe(&self, callback: impl Fn(&E) + Send + Sync + 'static) -> Subscription<E> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Box::new(callback));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to all current subscribers.
    pub fn publish(&self, event: &E) {
        let subscribers = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for callback in subscribers.values() {
            callback(event);
        }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Disposer handle for one subscription.
pub struct Subscription<E> {
    id: u64,
    inner: Weak<BusInner<E>>,
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn publish_reaches_subscribers() {
        let bus: EventBus<u32> = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_a = Arc::clone(&seen);
        let _sub_a = bus.subscribe(move |n| {
            seen_a.fetch_add(*n as usize, Ordering::SeqCst);
        });
        let seen_b = Arc::clone(&seen);
        let _sub_b = bus.subscribe(move |n| {
            seen_b.fetch_add(*n as usize, Ordering::SeqCst);
        });

        bus.publish(&3);
        assert_eq!(seen.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let bus: EventBus<u32> = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_cb = Arc::clone(&seen);
        let sub = bus.subscribe(move |_| {
            seen_cb.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.subscriber_count(), 1);

        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);

        bus.publish(&1);
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }
}
