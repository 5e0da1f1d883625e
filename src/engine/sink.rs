//! Notification sinks for committed transitions.
//!
//! Delivery is fire-and-forget: the engine never waits for, or reacts to,
//! an observer.

use crate::core::StateTransition;
use std::sync::mpsc::Sender;

/// Observer of committed transitions.
pub trait TransitionSink: Send + Sync {
    fn notify(&self, transition: &StateTransition);
}

/// Sink that discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TransitionSink for NoopSink {
    fn notify(&self, _transition: &StateTransition) {}
}

impl<F> TransitionSink for F
where
    F: Fn(&StateTransition) + Send + Sync,
{
    fn notify(&self, transition: &StateTransition) {
        self(transition)
    }
}

/// Forwards notifications over a channel. A disconnected receiver is ignored.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    sender: Sender<StateTransition>,
}

impl ChannelSink {
    pub fn new(sender: Sender<StateTransition>) -> Self {
        Self { sender }
    }
}

impl TransitionSink for ChannelSink {
    fn notify(&self, transition: &StateTransition) {
        let _ = self.sender.send(transition.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateId;
    use chrono::Utc;
    use std::sync::mpsc;

    fn sample() -> StateTransition {
        StateTransition {
            from: StateId::from_name("Init"),
            to: StateId::from_name("Active"),
            sequence: 1,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn channel_sink_forwards() {
        let (tx, rx) = mpsc::channel();
        let sink = ChannelSink::new(tx);

        sink.notify(&sample());

        let received = rx.try_recv().unwrap();
        assert_eq!(received.to, StateId::from_name("Active"));
        assert_eq!(received.sequence, 1);
    }

    #[test]
    fn channel_sink_ignores_closed_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        ChannelSink::new(tx).notify(&sample());
    }

    #[test]
    fn channel_sink_is_shared_across_threads() {
        let (tx, rx) = mpsc::channel();
        let sink = ChannelSink::new(tx);

        std::thread::scope(|scope| {
            scope.spawn(|| sink.notify(&sample()));
            scope.spawn(|| sink.notify(&sample()));
        });

        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn closures_are_sinks() {
        let seen = std::sync::Mutex::new(Vec::new());
        let sink = |t: &StateTransition| seen.lock().unwrap().push(t.sequence);

        sink.notify(&sample());

        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }
}
