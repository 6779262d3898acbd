use crate::replica::replica_api::NodeStatus;
use std::fmt;
use tokio::sync::mpsc;

#[derive(Debug, thiserror::Error)]
#[error("Subscriber failed: {0}")]
pub struct SubscriberError(pub String);

/// Receives a status snapshot on every state change. Called from the replica event loop, so it
/// must not block.
pub trait StatusSubscriber: Send + Sync + 'static {
    fn notify(&self, status: &NodeStatus) -> Result<(), SubscriberError>;
}

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct SubscriberId(u64);

/// Owned wrapper so subscriptions can travel inside actor events.
pub(crate) struct Subscription(pub(crate) Box<dyn StatusSubscriber>);

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

pub(crate) struct Subscribers {
    logger: slog::Logger,
    next_id: u64,
    subscribers: Vec<(SubscriberId, Box<dyn StatusSubscriber>)>,
}

impl Subscribers {
    pub(crate) fn new(logger: slog::Logger) -> Self {
        Subscribers {
            logger,
            next_id: 1,
            subscribers: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, subscriber: Box<dyn StatusSubscriber>) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, subscriber));

        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Notify every subscriber. A failing subscriber is logged and skipped.
    pub(crate) fn broadcast(&self, status: &NodeStatus) {
        for (id, subscriber) in self.subscribers.iter() {
            if let Err(e) = subscriber.notify(status) {
                slog::warn!(self.logger, "Status subscriber {:?} failed: {}", id, e);
            }
        }
    }
}

/// StatusChannelSubscriber forwards every snapshot into an unbounded channel.
pub struct StatusChannelSubscriber {
    sender: mpsc::UnboundedSender<NodeStatus>,
}

impl StatusChannelSubscriber {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NodeStatus>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (StatusChannelSubscriber { sender: tx }, rx)
    }
}

impl StatusSubscriber for StatusChannelSubscriber {
    fn notify(&self, status: &NodeStatus) -> Result<(), SubscriberError> {
        self.sender
            .send(status.clone())
            .map_err(|_| SubscriberError("receiver disconnected".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replica::{ReplicaId, Role, Term};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn status() -> NodeStatus {
        NodeStatus {
            node_id: ReplicaId::new(1),
            role: Role::Follower,
            term: Term::new(0),
            voted_for: None,
            log_length: 0,
            commit_index: None,
            last_heartbeat: Utc::now(),
            leader_id: None,
            running: true,
        }
    }

    struct Failing;

    impl StatusSubscriber for Failing {
        fn notify(&self, _: &NodeStatus) -> Result<(), SubscriberError> {
            Err(SubscriberError("boom".into()))
        }
    }

    struct Counting(Arc<AtomicUsize>);

    impl StatusSubscriber for Counting {
        fn notify(&self, _: &NodeStatus) -> Result<(), SubscriberError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    #[test]
    fn failing_subscriber_does_not_starve_others() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut subscribers = Subscribers::new(logger());
        subscribers.subscribe(Box::new(Counting(count.clone())));
        subscribers.subscribe(Box::new(Failing));
        subscribers.subscribe(Box::new(Counting(count.clone())));

        subscribers.broadcast(&status());

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unsubscribe_removes_only_that_subscriber() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut subscribers = Subscribers::new(logger());
        let first = subscribers.subscribe(Box::new(Counting(count.clone())));
        let _second = subscribers.subscribe(Box::new(Counting(count.clone())));

        assert!(subscribers.unsubscribe(first));
        assert!(!subscribers.unsubscribe(first));
        assert_eq!(subscribers.len(), 1);

        subscribers.broadcast(&status());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn channel_subscriber_reports_disconnect() {
        let (subscriber, mut rx) = StatusChannelSubscriber::new();
        subscriber.notify(&status()).unwrap();
        assert_eq!(rx.recv().await.unwrap().node_id, ReplicaId::new(1));

        drop(rx);
        assert!(subscriber.notify(&status()).is_err());
    }
}
