use fetch_throw::{PointerEvent, PointerHub, PointerPhase};
use fetch_core::Vec2;

#[test]
fn every_subscriber_sees_every_event_in_order() {
    let mut hub = PointerHub::new();
    let a = hub.subscribe();
    let b = hub.subscribe();

    hub.pointer_down(0, Vec2::new(1.0, 2.0), 0.0);
    hub.pointer_up(0, Vec2::new(3.0, 4.0), 0.5);

    let events_a = hub.drain(a);
    let events_b = hub.drain(b);
    assert_eq!(events_a, events_b);
    assert_eq!(events_a.len(), 2);
    assert_eq!(events_a[0].phase, PointerPhase::Down);
    assert_eq!(events_a[1].phase, PointerPhase::Up);

    assert!(hub.drain(a).is_empty(), "drain empties the mailbox");
}

#[test]
fn unsubscribed_mailboxes_stop_receiving() {
    let mut hub = PointerHub::new();
    let a = hub.subscribe();
    hub.publish(PointerEvent::down(0, Vec2::ZERO, 0.0));

    assert!(hub.unsubscribe(a));
    assert!(!hub.unsubscribe(a));
    assert!(!hub.is_subscribed(a));
    assert_eq!(hub.subscriber_count(), 0);

    hub.publish(PointerEvent::up(0, Vec2::ZERO, 0.1));
    assert!(hub.drain(a).is_empty());
}

#[test]
fn subscription_ids_are_not_reused() {
    let mut hub = PointerHub::new();
    let a = hub.subscribe();
    hub.unsubscribe(a);
    let b = hub.subscribe();
    assert_ne!(a, b);
}
