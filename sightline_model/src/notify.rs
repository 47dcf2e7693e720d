// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change fan-out from a model to its subscribers.

use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use alloc::vec::{self, Vec};
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::ModelEvent;

type EventQueue = RefCell<VecDeque<ModelEvent>>;

/// Broadcasts [`ModelEvent`]s to every live [`ModelSubscription`].
///
/// The notifier only keeps weak references to subscriber queues. A subscription that
/// has been dropped is pruned the next time an event is broadcast.
///
/// It also carries a monotonically increasing **revision** that is bumped once per
/// broadcast event, so observers can cheaply detect "did anything change?".
#[derive(Default)]
pub struct ModelNotify {
    queues: RefCell<Vec<Weak<EventQueue>>>,
    revision: Cell<u64>,
}

impl ModelNotify {
    /// Creates a notifier without subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new subscription. It observes only events broadcast after this call.
    pub fn subscribe(&self) -> ModelSubscription {
        let queue = Rc::new(RefCell::new(VecDeque::new()));
        self.queues.borrow_mut().push(Rc::downgrade(&queue));
        ModelSubscription { queue }
    }

    /// Broadcasts `event` to all live subscriptions.
    ///
    /// A [`ModelEvent::Reset`] supersedes everything still queued for a subscriber, so
    /// the pending queue collapses to the single reset.
    pub fn notify(&self, event: ModelEvent) {
        self.revision.set(self.revision.get() + 1);
        log::trace!("model change {event:?}");
        self.queues.borrow_mut().retain(|weak| {
            let Some(queue) = weak.upgrade() else {
                return false;
            };
            let mut queue = queue.borrow_mut();
            if event == ModelEvent::Reset {
                queue.clear();
            }
            queue.push_back(event);
            true
        });
    }

    /// Returns the number of subscriptions that are still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.queues
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Returns the number of events broadcast so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }
}

impl fmt::Debug for ModelNotify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelNotify")
            .field("subscribers", &self.subscriber_count())
            .field("revision", &self.revision.get())
            .finish()
    }
}

/// A consumer's view of a model's change stream.
///
/// Events accumulate until drained. Dropping the subscription detaches it from the
/// model.
pub struct ModelSubscription {
    queue: Rc<EventQueue>,
}

impl ModelSubscription {
    /// Removes and returns all pending events, oldest first.
    pub fn drain(&self) -> vec::IntoIter<ModelEvent> {
        let events: Vec<ModelEvent> = self.queue.borrow_mut().drain(..).collect();
        events.into_iter()
    }

    /// Removes and returns the oldest pending event.
    pub fn next_event(&self) -> Option<ModelEvent> {
        self.queue.borrow_mut().pop_front()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Returns `true` if no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl fmt::Debug for ModelSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSubscription")
            .field("pending", &self.pending())
            .finish()
    }
}
