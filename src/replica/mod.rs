mod acks;
mod event_history;
mod local_log;
mod local_state;
mod peer_calls;
mod peers;
mod replica;
mod replica_api;
mod subscribers;
mod timers;

pub use event_history::{EventKind, NodeEvent, StateChangeReason};
pub use local_log::LogEntry;
pub use local_state::Term;
pub use peers::{InvalidClusterError, ReplicaId};
pub use replica_api::{
    AppendEntriesReply, AppendEntriesRequest, CatchUpReply, CatchUpRequest, ClusterSnapshot, CommitReply,
    CommitRequest, HeartbeatReply, HeartbeatRequest, LeaderInfo, NodeStatus, PromoteReply, PromoteRequest,
    ReplicaExited, ReplicateError, ReplicateInput, ReplicateOutput, ReplicatedEntry, Role, RpcHandlerError,
    ToggleError,
};
pub use subscribers::{StatusChannelSubscriber, StatusSubscriber, SubscriberError, SubscriberId};

pub(crate) use peer_calls::RpcTimeouts;
pub(crate) use peers::ClusterMembership;
pub(crate) use replica::{Replica, ReplicaConfig, ReplicaOptions};
pub(crate) use replica_api::{CatchUpReplyFromPeer, HeartbeatReplyFromPeer, ReplicateAcksFromPeers, TimerTick};
pub(crate) use subscribers::Subscription;
pub(crate) use timers::{Clock, RealClock};
