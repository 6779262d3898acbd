use crate::actor::WeakActorClient;
use crate::replica::{NodeStatus, SubscriberId};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// StatusListener yields the node status at subscription time, then one status per state change.
///
/// Dropping the listener removes its subscription from the node.
pub struct StatusListener {
    initial: Option<NodeStatus>,
    receiver: mpsc::UnboundedReceiver<NodeStatus>,
    subscription: Option<(SubscriberId, WeakActorClient)>,
}

impl StatusListener {
    pub(crate) fn new(
        initial: NodeStatus,
        receiver: mpsc::UnboundedReceiver<NodeStatus>,
        subscriber_id: SubscriberId,
        actor_client: WeakActorClient,
    ) -> Self {
        StatusListener {
            initial: Some(initial),
            receiver,
            subscription: Some((subscriber_id, actor_client)),
        }
    }

    /// Returns `None` once the node has shut down.
    pub async fn next_status(&mut self) -> Option<NodeStatus> {
        if let Some(initial) = self.initial.take() {
            return Some(initial);
        }
        self.receiver.recv().await
    }
}

impl Stream for StatusListener {
    type Item = NodeStatus;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(initial) = self.initial.take() {
            return Poll::Ready(Some(initial));
        }
        self.receiver.poll_recv(cx)
    }
}

impl Drop for StatusListener {
    fn drop(&mut self) {
        let (subscriber_id, weak_client) = match self.subscription.take() {
            Some(subscription) => subscription,
            None => return,
        };
        let actor_client = match weak_client.upgrade() {
            Some(client) => client,
            None => return,
        };
        // Outside a runtime the node is going away anyway.
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                let _ = actor_client.unsubscribe(subscriber_id).await;
            });
        }
    }
}
