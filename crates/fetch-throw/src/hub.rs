use std::collections::{BTreeMap, VecDeque};

use fetch_core::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The only pointer that produces gestures.
pub const PRIMARY_POINTER: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PointerPhase {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointerEvent {
    pub pointer: u32,
    /// Screen pixels, origin bottom-left.
    pub position: Vec2,
    pub phase: PointerPhase,
    /// Seconds since session start.
    pub time: f32,
}

impl PointerEvent {
    pub fn down(pointer: u32, position: Vec2, time: f32) -> Self {
        Self {
            pointer,
            position,
            phase: PointerPhase::Down,
            time,
        }
    }

    pub fn up(pointer: u32, position: Vec2, time: f32) -> Self {
        Self {
            pointer,
            position,
            phase: PointerPhase::Up,
            time,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.pointer == PRIMARY_POINTER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Publish/subscribe fan-out for pointer events.
///
/// Each subscriber gets its own mailbox, drained once per tick. Subscribers must call
/// [`PointerHub::unsubscribe`] when they are torn down; events published afterwards are never
/// queued for them.
#[derive(Debug, Default)]
pub struct PointerHub {
    next_id: u64,
    mailboxes: BTreeMap<SubscriptionId, VecDeque<PointerEvent>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.mailboxes.insert(id, VecDeque::new());
        id
    }

    /// Drop the mailbox and any events still queued in it.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.mailboxes.remove(&id).is_some()
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.mailboxes.contains_key(&id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.mailboxes.len()
    }

    pub fn publish(&mut self, event: PointerEvent) {
        for mailbox in self.mailboxes.values_mut() {
            mailbox.push_back(event);
        }
    }

    pub fn pointer_down(&mut self, pointer: u32, position: Vec2, time: f32) {
        self.publish(PointerEvent::down(pointer, position, time));
    }

    pub fn pointer_up(&mut self, pointer: u32, position: Vec2, time: f32) {
        self.publish(PointerEvent::up(pointer, position, time));
    }

    /// Take every queued event for `id`, oldest first. Unknown ids get nothing.
    pub fn drain(&mut self, id: SubscriptionId) -> Vec<PointerEvent> {
        self.mailboxes
            .get_mut(&id)
            .map(|mailbox| mailbox.drain(..).collect())
            .unwrap_or_default()
    }
}
