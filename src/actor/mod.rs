use crate::replica;
use crate::replica::{
    AppendEntriesReply, AppendEntriesRequest, CatchUpReply, CatchUpRequest, ClusterSnapshot, CommitReply,
    CommitRequest, HeartbeatReply, HeartbeatRequest, LeaderInfo, LogEntry, NodeEvent, NodeStatus, PromoteReply,
    PromoteRequest, ReplicaExited, ReplicaId, ReplicateError, ReplicateInput, ReplicateOutput, ReplicatedEntry,
    RpcHandlerError, SubscriberId, ToggleError,
};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot};

// Every mutation of replica state happens inside `ReplicaActor::handle_event`, one event at a time.
// Network calls never run on the actor. They are spawned, and their results come back as events.
#[derive(Debug)]
pub(crate) enum Event {
    // Leader: append locally, fan out AppendEntries, answer once acks are counted.
    // Otherwise: reject with leader hint.
    Replicate(ReplicateInput, Callback<ReplicateOutput, ReplicateError>),
    ReplicateAcksFromPeers(replica::ReplicateAcksFromPeers),

    // Inbound peer RPCs. Refused while stopped.
    AppendEntries(AppendEntriesRequest, Callback<AppendEntriesReply, RpcHandlerError>),
    Heartbeat(HeartbeatRequest, Callback<HeartbeatReply, RpcHandlerError>),
    Commit(CommitRequest, Callback<CommitReply, RpcHandlerError>),
    CatchUp(CatchUpRequest, Callback<CatchUpReply, RpcHandlerError>),
    Promote(PromoteRequest, Callback<PromoteReply, RpcHandlerError>),

    // Leader: send the missing tail if the peer is behind.
    HeartbeatReplyFromPeer(replica::HeartbeatReplyFromPeer),
    CatchUpReplyFromPeer(replica::CatchUpReplyFromPeer),

    Timer(replica::TimerTick),

    // Operator control.
    Start(Reply<NodeStatus>),
    Stop(Reply<NodeStatus>),
    Toggle(ReplicaId, Callback<NodeStatus, ToggleError>),

    // Read-only.
    Status(Reply<NodeStatus>),
    Leader(Reply<LeaderInfo>),
    Events(usize, Reply<Vec<NodeEvent>>),
    Log(Reply<Vec<LogEntry>>),
    LogWithReplication(Reply<Vec<ReplicatedEntry>>),
    ReplicationStatus(u64, Reply<BTreeMap<ReplicaId, bool>>),
    Cluster(Reply<ClusterSnapshot>),
    LatestValue(String, Reply<Option<LogEntry>>),

    Subscribe(replica::Subscription, Reply<SubscriberId>),
    Unsubscribe(SubscriberId, Reply<bool>),
}

#[derive(Debug)]
pub(crate) struct Callback<O: Debug, E: Error>(oneshot::Sender<Result<O, E>>);

impl<O: Debug, E: Error> Callback<O, E> {
    pub(crate) fn send(self, message: Result<O, E>) {
        let _ = self.0.send(message);
    }
}

#[derive(Debug)]
pub(crate) struct Reply<T: Debug>(oneshot::Sender<T>);

impl<T: Debug> Reply<T> {
    pub(crate) fn send(self, message: T) {
        let _ = self.0.send(message);
    }
}

#[derive(Clone)]
pub(crate) struct ActorClient {
    sender: mpsc::Sender<Event>,
}

impl ActorClient {
    pub(crate) fn new(buffer_size: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        (ActorClient { sender: tx }, rx)
    }

    pub(crate) fn weak(&self) -> WeakActorClient {
        WeakActorClient {
            sender: self.sender.downgrade(),
        }
    }

    pub(crate) async fn replicate(&self, input: ReplicateInput) -> Result<ReplicateOutput, ReplicateError> {
        self.call(|cb| Event::Replicate(input, cb), ReplicateError::ReplicaExited)
            .await
    }

    pub(crate) async fn append_entries(
        &self,
        request: AppendEntriesRequest,
    ) -> Result<AppendEntriesReply, RpcHandlerError> {
        self.call(|cb| Event::AppendEntries(request, cb), RpcHandlerError::ReplicaExited)
            .await
    }

    pub(crate) async fn heartbeat(&self, request: HeartbeatRequest) -> Result<HeartbeatReply, RpcHandlerError> {
        self.call(|cb| Event::Heartbeat(request, cb), RpcHandlerError::ReplicaExited)
            .await
    }

    pub(crate) async fn commit(&self, request: CommitRequest) -> Result<CommitReply, RpcHandlerError> {
        self.call(|cb| Event::Commit(request, cb), RpcHandlerError::ReplicaExited)
            .await
    }

    pub(crate) async fn catch_up(&self, request: CatchUpRequest) -> Result<CatchUpReply, RpcHandlerError> {
        self.call(|cb| Event::CatchUp(request, cb), RpcHandlerError::ReplicaExited)
            .await
    }

    pub(crate) async fn promote(&self, request: PromoteRequest) -> Result<PromoteReply, RpcHandlerError> {
        self.call(|cb| Event::Promote(request, cb), RpcHandlerError::ReplicaExited)
            .await
    }

    pub(crate) async fn start(&self) -> Result<NodeStatus, ReplicaExited> {
        self.query(Event::Start).await
    }

    pub(crate) async fn stop(&self) -> Result<NodeStatus, ReplicaExited> {
        self.query(Event::Stop).await
    }

    pub(crate) async fn toggle(&self, target: ReplicaId) -> Result<NodeStatus, ToggleError> {
        self.call(|cb| Event::Toggle(target, cb), ToggleError::ReplicaExited)
            .await
    }

    pub(crate) async fn status(&self) -> Result<NodeStatus, ReplicaExited> {
        self.query(Event::Status).await
    }

    pub(crate) async fn leader(&self) -> Result<LeaderInfo, ReplicaExited> {
        self.query(Event::Leader).await
    }

    pub(crate) async fn events(&self, limit: usize) -> Result<Vec<NodeEvent>, ReplicaExited> {
        self.query(|reply| Event::Events(limit, reply)).await
    }

    pub(crate) async fn log(&self) -> Result<Vec<LogEntry>, ReplicaExited> {
        self.query(Event::Log).await
    }

    pub(crate) async fn log_with_replication(&self) -> Result<Vec<ReplicatedEntry>, ReplicaExited> {
        self.query(Event::LogWithReplication).await
    }

    pub(crate) async fn replication_status(&self, index: u64) -> Result<BTreeMap<ReplicaId, bool>, ReplicaExited> {
        self.query(|reply| Event::ReplicationStatus(index, reply)).await
    }

    pub(crate) async fn cluster(&self) -> Result<ClusterSnapshot, ReplicaExited> {
        self.query(Event::Cluster).await
    }

    pub(crate) async fn latest_value(&self, key: String) -> Result<Option<LogEntry>, ReplicaExited> {
        self.query(|reply| Event::LatestValue(key, reply)).await
    }

    pub(crate) async fn subscribe(&self, subscription: replica::Subscription) -> Result<SubscriberId, ReplicaExited> {
        self.query(|reply| Event::Subscribe(subscription, reply)).await
    }

    pub(crate) async fn unsubscribe(&self, id: SubscriberId) -> Result<bool, ReplicaExited> {
        self.query(|reply| Event::Unsubscribe(id, reply)).await
    }

    async fn call<O, E, F>(&self, make_event: F, exited: E) -> Result<O, E>
    where
        O: Debug,
        E: Error,
        F: FnOnce(Callback<O, E>) -> Event,
    {
        let (tx, rx) = oneshot::channel();
        if self.send(make_event(Callback(tx))).await.is_err() {
            return Err(exited);
        }

        // Sender dropped without replying means the actor went away mid-request.
        rx.await.unwrap_or(Err(exited))
    }

    async fn query<T, F>(&self, make_event: F) -> Result<T, ReplicaExited>
    where
        T: Debug,
        F: FnOnce(Reply<T>) -> Event,
    {
        let (tx, rx) = oneshot::channel();
        self.send(make_event(Reply(tx))).await?;
        rx.await.map_err(|_| ReplicaExited)
    }

    async fn send(&self, event: Event) -> Result<(), ReplicaExited> {
        self.sender.send(event).await.map_err(|_| ReplicaExited)
    }
}

/// Handle used by background tasks and the RPC server. It does not keep the actor alive.
#[derive(Clone)]
pub(crate) struct WeakActorClient {
    sender: mpsc::WeakSender<Event>,
}

impl WeakActorClient {
    pub(crate) fn upgrade(&self) -> Option<ActorClient> {
        self.sender.upgrade().map(|sender| ActorClient { sender })
    }

    pub(crate) async fn timer_tick(&self, tick: replica::TimerTick) -> Result<(), ReplicaExited> {
        self.send(Event::Timer(tick)).await
    }

    pub(crate) async fn replicate_acks_from_peers(
        &self,
        input: replica::ReplicateAcksFromPeers,
    ) -> Result<(), ReplicaExited> {
        self.send(Event::ReplicateAcksFromPeers(input)).await
    }

    pub(crate) async fn heartbeat_reply_from_peer(
        &self,
        input: replica::HeartbeatReplyFromPeer,
    ) -> Result<(), ReplicaExited> {
        self.send(Event::HeartbeatReplyFromPeer(input)).await
    }

    pub(crate) async fn catch_up_reply_from_peer(
        &self,
        input: replica::CatchUpReplyFromPeer,
    ) -> Result<(), ReplicaExited> {
        self.send(Event::CatchUpReplyFromPeer(input)).await
    }

    async fn send(&self, event: Event) -> Result<(), ReplicaExited> {
        match self.upgrade() {
            Some(client) => client.send(event).await,
            None => Err(ReplicaExited),
        }
    }
}

/// ReplicaActor is replica logic in actor model.
pub(crate) struct ReplicaActor<C: replica::Clock = replica::RealClock> {
    logger: slog::Logger,
    receiver: mpsc::Receiver<Event>,
    replica: replica::Replica<C>,
}

impl<C: replica::Clock> ReplicaActor<C> {
    pub(crate) fn new(logger: slog::Logger, receiver: mpsc::Receiver<Event>, replica: replica::Replica<C>) -> Self {
        ReplicaActor {
            logger,
            receiver,
            replica,
        }
    }

    pub(crate) async fn run_event_loop(mut self) {
        while let Some(event) = self.receiver.recv().await {
            self.handle_event(event);
        }

        slog::info!(self.logger, "Replica event loop exited");
    }

    // This must NOT be async. Any long running work must be spawned on another task and come
    // back to this actor as an event.
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Replicate(input, callback) => self.replica.handle_replicate(input, callback),
            Event::ReplicateAcksFromPeers(input) => self.replica.handle_replicate_acks_from_peers(input),
            Event::AppendEntries(request, callback) => {
                callback.send(self.replica.handle_append_entries(request));
            }
            Event::Heartbeat(request, callback) => {
                callback.send(self.replica.handle_heartbeat(request));
            }
            Event::Commit(request, callback) => {
                callback.send(self.replica.handle_commit(request));
            }
            Event::CatchUp(request, callback) => {
                callback.send(self.replica.handle_catch_up(request));
            }
            Event::Promote(request, callback) => {
                callback.send(self.replica.handle_promote(request));
            }
            Event::HeartbeatReplyFromPeer(input) => self.replica.handle_heartbeat_reply_from_peer(input),
            Event::CatchUpReplyFromPeer(input) => self.replica.handle_catch_up_reply_from_peer(input),
            Event::Timer(tick) => self.replica.handle_timer_tick(tick),
            Event::Start(reply) => reply.send(self.replica.start()),
            Event::Stop(reply) => reply.send(self.replica.stop()),
            Event::Toggle(target, callback) => callback.send(self.replica.toggle(target)),
            Event::Status(reply) => reply.send(self.replica.status()),
            Event::Leader(reply) => reply.send(self.replica.leader_info()),
            Event::Events(limit, reply) => reply.send(self.replica.recent_events(limit)),
            Event::Log(reply) => reply.send(self.replica.log_entries()),
            Event::LogWithReplication(reply) => reply.send(self.replica.log_with_replication()),
            Event::ReplicationStatus(index, reply) => reply.send(self.replica.replication_status(index)),
            Event::Cluster(reply) => reply.send(self.replica.cluster_snapshot()),
            Event::LatestValue(key, reply) => reply.send(self.replica.latest_value(&key)),
            Event::Subscribe(subscription, reply) => reply.send(self.replica.subscribe(subscription)),
            Event::Unsubscribe(id, reply) => reply.send(self.replica.unsubscribe(id)),
        }
    }
}
