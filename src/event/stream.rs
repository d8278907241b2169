use async_channel::Receiver;

use crate::{
    clock::Millis,
    event::{EventBus, EventKind},
};

/// One clock notification, carried over an async channel for consumers that
/// live outside the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Update(Millis),
    Alarm(Millis),
}

/// Bridges the synchronous bus onto an unbounded channel.
///
/// The forwarding listeners stay registered for the bus's lifetime; once the
/// receiver is dropped they silently discard events.
pub(crate) fn attach(bus: &mut EventBus) -> Receiver<ClockEvent> {
    let (tx, rx) = async_channel::unbounded();
    let update_tx = tx.clone();
    bus.on(EventKind::Update, move |elapsed| {
        let _ = update_tx.try_send(ClockEvent::Update(elapsed));
    });
    bus.on(EventKind::Alarm, move |elapsed| {
        let _ = tx.try_send(ClockEvent::Alarm(elapsed));
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_preserves_dispatch_order() {
        let mut bus = EventBus::new();
        let rx = attach(&mut bus);

        bus.dispatch(EventKind::Update, 16);
        bus.dispatch(EventKind::Alarm, 16);
        bus.dispatch(EventKind::Update, 32);

        assert_eq!(rx.try_recv(), Ok(ClockEvent::Update(16)));
        assert_eq!(rx.try_recv(), Ok(ClockEvent::Alarm(16)));
        assert_eq!(rx.try_recv(), Ok(ClockEvent::Update(32)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_does_not_break_dispatch() {
        let mut bus = EventBus::new();
        let rx = attach(&mut bus);
        drop(rx);

        // Forwarders are still registered but sends fail silently.
        bus.dispatch(EventKind::Update, 100);
    }
}
