mod actor;
mod api;
mod config;
mod replica;
mod server;
mod tasks;
mod transport;
mod grpc {
    include!("../generated/raft.rs");
}

pub use api::create_raft_node;
pub use api::try_create_raft_client;
pub use api::RaftClient;
pub use api::RaftClientConfig;
pub use api::RaftMemberInfo;
pub use api::RaftNode;
pub use api::RaftNodeConfig;
pub use api::RaftNodeCreationError;
pub use api::RaftOptions;
pub use api::StatusListener;
pub use api::DEFAULT_EVENTS_LIMIT;
pub use config::load_config;
pub use config::parse_config;
pub use config::ConfigError;
pub use config::NodeFileConfig;
pub use replica::{
    AppendEntriesReply, AppendEntriesRequest, CatchUpReply, CatchUpRequest, ClusterSnapshot, CommitReply,
    CommitRequest, EventKind, HeartbeatReply, HeartbeatRequest, InvalidClusterError, LeaderInfo, LogEntry, NodeEvent,
    NodeStatus, PromoteReply, PromoteRequest, ReplicaExited, ReplicaId, ReplicateError, ReplicateOutput,
    ReplicatedEntry, Role, RpcHandlerError, StateChangeReason, StatusChannelSubscriber, StatusSubscriber,
    SubscriberError, SubscriberId, Term, ToggleError,
};
pub use tasks::{
    AuditOperation, AuditRecord, NewTask, Task, TaskError, TaskPriority, TaskService, TaskStatus, TaskStore,
    TaskStoreError, TaskUpdate,
};
pub use transport::{GrpcPeerTransport, PeerAddress, PeerCallError, PeerTransport};

