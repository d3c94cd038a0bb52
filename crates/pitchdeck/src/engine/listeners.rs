use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Global platform event streams the engine listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Keyboard,
    PointerMove,
    FullscreenChange,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::Keyboard,
        EventKind::PointerMove,
        EventKind::FullscreenChange,
    ];
}

/// Host-side table of live listeners. The host only forwards an event kind
/// while at least one subscription for it is alive.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    counts: Rc<RefCell<HashMap<EventKind, usize>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, kind: EventKind) -> Subscription {
        *self.counts.borrow_mut().entry(kind).or_insert(0) += 1;
        tracing::trace!(?kind, "Listener attached");
        Subscription {
            kind,
            counts: Rc::clone(&self.counts),
        }
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.counts.borrow().get(&kind).copied().unwrap_or(0) > 0
    }

    /// Total number of live subscriptions across all kinds.
    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.counts.borrow().values().sum()
    }
}

/// A live listener. Dropping it detaches the listener.
#[derive(Debug)]
pub struct Subscription {
    kind: EventKind,
    counts: Rc<RefCell<HashMap<EventKind, usize>>>,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut counts = self.counts.borrow_mut();
        if let Some(count) = counts.get_mut(&self.kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                counts.remove(&self.kind);
            }
        }
        tracing::trace!(kind = ?self.kind, "Listener detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_releases_subscription() {
        let registry = ListenerRegistry::new();
        let sub = registry.subscribe(EventKind::Keyboard);
        assert_eq!(sub.kind(), EventKind::Keyboard);
        assert!(registry.is_listening(EventKind::Keyboard));
        assert!(!registry.is_listening(EventKind::PointerMove));

        drop(sub);
        assert!(!registry.is_listening(EventKind::Keyboard));
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_counts_overlapping_subscriptions() {
        let registry = ListenerRegistry::new();
        let a = registry.subscribe(EventKind::PointerMove);
        let b = registry.subscribe(EventKind::PointerMove);
        assert_eq!(registry.active_count(), 2);
        drop(a);
        assert!(registry.is_listening(EventKind::PointerMove));
        drop(b);
        assert!(!registry.is_listening(EventKind::PointerMove));
    }
}
