use crate::actor::ActorClient;
use crate::api::status_listener::StatusListener;
use crate::replica::{
    AppendEntriesReply, AppendEntriesRequest, CatchUpReply, CatchUpRequest, ClusterSnapshot, CommitReply,
    CommitRequest, HeartbeatReply, HeartbeatRequest, LeaderInfo, LogEntry, NodeEvent, NodeStatus, PromoteReply,
    PromoteRequest, ReplicaExited, ReplicaId, ReplicateError, ReplicateInput, ReplicateOutput, ReplicatedEntry,
    RpcHandlerError, StatusChannelSubscriber, StatusSubscriber, SubscriberId, Subscription, ToggleError,
};
use bytes::Bytes;
use std::collections::BTreeMap;

/// Number of events `recent_events` returns when the caller has no preference.
pub const DEFAULT_EVENTS_LIMIT: usize = 50;

/// RaftNode is the handle to a running replication node. Cheap to clone.
///
/// All state lives on the node's event loop. Calls on this handle are queued and answered in order.
#[derive(Clone)]
pub struct RaftNode {
    actor_client: ActorClient,
}

impl RaftNode {
    pub(crate) fn new(actor_client: ActorClient) -> Self {
        RaftNode { actor_client }
    }

    pub(crate) fn actor_client(&self) -> &ActorClient {
        &self.actor_client
    }

    /// Append `key`/`value` to the log and wait for a majority of acks.
    ///
    /// Only the leader accepts writes. On `QuorumNotReached` the entry stays in the log but is not
    /// committed.
    pub async fn replicate(&self, key: impl Into<String>, value: Bytes) -> Result<ReplicateOutput, ReplicateError> {
        self.actor_client
            .replicate(ReplicateInput { key: key.into(), value })
            .await
    }

    // ------- Inbound peer RPCs -------

    pub async fn receive_append_entries(
        &self,
        request: AppendEntriesRequest,
    ) -> Result<AppendEntriesReply, RpcHandlerError> {
        self.actor_client.append_entries(request).await
    }

    pub async fn receive_heartbeat(&self, request: HeartbeatRequest) -> Result<HeartbeatReply, RpcHandlerError> {
        self.actor_client.heartbeat(request).await
    }

    pub async fn receive_commit(&self, request: CommitRequest) -> Result<CommitReply, RpcHandlerError> {
        self.actor_client.commit(request).await
    }

    pub async fn receive_catch_up(&self, request: CatchUpRequest) -> Result<CatchUpReply, RpcHandlerError> {
        self.actor_client.catch_up(request).await
    }

    pub async fn receive_promote(&self, request: PromoteRequest) -> Result<PromoteReply, RpcHandlerError> {
        self.actor_client.promote(request).await
    }

    // ------- Operator control -------

    pub async fn start(&self) -> Result<NodeStatus, ReplicaExited> {
        self.actor_client.start().await
    }

    pub async fn stop(&self) -> Result<NodeStatus, ReplicaExited> {
        self.actor_client.stop().await
    }

    /// Stop the node if it runs, start it otherwise. `node_id` must name this node.
    pub async fn toggle(&self, node_id: ReplicaId) -> Result<NodeStatus, ToggleError> {
        self.actor_client.toggle(node_id).await
    }

    // ------- Observability -------

    pub async fn status(&self) -> Result<NodeStatus, ReplicaExited> {
        self.actor_client.status().await
    }

    pub async fn leader(&self) -> Result<LeaderInfo, ReplicaExited> {
        self.actor_client.leader().await
    }

    /// Most recent events, oldest first.
    pub async fn recent_events(&self, limit: usize) -> Result<Vec<NodeEvent>, ReplicaExited> {
        self.actor_client.events(limit).await
    }

    pub async fn log(&self) -> Result<Vec<LogEntry>, ReplicaExited> {
        self.actor_client.log().await
    }

    pub async fn log_with_replication(&self) -> Result<Vec<ReplicatedEntry>, ReplicaExited> {
        self.actor_client.log_with_replication().await
    }

    pub async fn replication_status(&self, index: u64) -> Result<BTreeMap<ReplicaId, bool>, ReplicaExited> {
        self.actor_client.replication_status(index).await
    }

    pub async fn cluster(&self) -> Result<ClusterSnapshot, ReplicaExited> {
        self.actor_client.cluster().await
    }

    /// Value of the newest log entry written under `key`, committed or not.
    pub async fn replicated_value(&self, key: impl Into<String>) -> Result<Option<Bytes>, ReplicaExited> {
        self.actor_client
            .latest_value(key.into())
            .await
            .map(|entry| entry.map(|e| e.value))
    }

    // ------- Subscriptions -------

    pub async fn subscribe(&self, subscriber: impl StatusSubscriber) -> Result<SubscriberId, ReplicaExited> {
        self.actor_client.subscribe(Subscription(Box::new(subscriber))).await
    }

    pub async fn unsubscribe(&self, id: SubscriberId) -> Result<bool, ReplicaExited> {
        self.actor_client.unsubscribe(id).await
    }

    pub async fn status_listener(&self) -> Result<StatusListener, ReplicaExited> {
        let (subscriber, receiver) = StatusChannelSubscriber::new();
        let id = self.subscribe(subscriber).await?;
        let initial = self.status().await?;

        Ok(StatusListener::new(initial, receiver, id, self.actor_client.weak()))
    }
}
