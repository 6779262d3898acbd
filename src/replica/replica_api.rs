use crate::replica::local_log::LogEntry;
use crate::replica::local_state::Term;
use crate::replica::peers::ReplicaId;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Role {
    Follower,
    Candidate,
    Leader,
    Stopped,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Follower => "follower",
            Role::Candidate => "candidate",
            Role::Leader => "leader",
            Role::Stopped => "stopped",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of a node. Recomputed on every request.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStatus {
    pub node_id: ReplicaId,
    pub role: Role,
    pub term: Term,
    pub voted_for: Option<ReplicaId>,
    pub log_length: u64,
    pub commit_index: Option<u64>,
    pub last_heartbeat: DateTime<Utc>,
    pub leader_id: Option<ReplicaId>,
    pub running: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderInfo {
    pub leader_id: Option<ReplicaId>,
    pub this_node_id: ReplicaId,
    pub is_leader: bool,
}

#[derive(Clone, Debug)]
pub struct ClusterSnapshot {
    pub this_node: NodeStatus,
    pub cluster_nodes: Vec<ReplicaId>,
    pub leader_id: Option<ReplicaId>,
    pub term: Term,
}

/// A local log entry together with which members acknowledged it, as far as this node knows.
#[derive(Clone, Debug)]
pub struct ReplicatedEntry {
    pub entry: LogEntry,
    pub replication: BTreeMap<ReplicaId, bool>,
}

#[derive(Debug, thiserror::Error)]
#[error("Replica task has exited")]
pub struct ReplicaExited;

// ------- replicate -------

#[derive(Debug)]
pub struct ReplicateInput {
    pub key: String,
    pub value: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplicateOutput {
    pub index: u64,
    pub term: Term,
    pub acks: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplicateError {
    #[error("I'm not leader. Known leader: {leader_hint:?}")]
    NotLeader { leader_hint: Option<ReplicaId> },

    // Entry stays in the local log, uncommitted.
    #[error("Entry {index} reached {acks} acks, {required} required")]
    QuorumNotReached { index: u64, acks: usize, required: usize },

    #[error("Replica task has exited")]
    ReplicaExited,
}

// ------- Inbound peer RPCs -------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RpcHandlerError {
    #[error("Node is stopped")]
    NodeStopped,
    #[error("Replica task has exited")]
    ReplicaExited,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppendEntriesRequest {
    pub leader_id: ReplicaId,
    pub term: Term,
    pub entry: LogEntry,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppendEntriesReply {
    pub success: bool,
    pub node_id: ReplicaId,
    pub term: Term,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeartbeatRequest {
    pub leader_id: ReplicaId,
    pub term: Term,
    pub leader_commit: Option<u64>,
    pub leader_log_length: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeartbeatReply {
    pub success: bool,
    pub node_id: ReplicaId,
    pub log_length: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommitRequest {
    pub commit_index: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommitReply {
    pub success: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchUpRequest {
    pub leader_id: ReplicaId,
    pub term: Term,
    pub entries: Vec<LogEntry>,
    pub leader_commit: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchUpReply {
    pub success: bool,
    pub node_id: ReplicaId,
    pub log_length: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PromoteRequest {
    pub term: Term,
    pub previous_leader: Option<ReplicaId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PromoteReply {
    pub success: bool,
    pub node_id: ReplicaId,
}

// ------- Operator control -------

#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    #[error("Toggle for node {requested} sent to node {this_node}")]
    NotThisNode { requested: ReplicaId, this_node: ReplicaId },
    #[error("Replica task has exited")]
    ReplicaExited,
}

// ------- Results of background work, fed back into the actor -------

#[derive(Debug)]
pub(crate) struct HeartbeatReplyFromPeer {
    pub(crate) peer_id: ReplicaId,
    pub(crate) sent_term: Term,
    pub(crate) reply: HeartbeatReply,
}

#[derive(Debug)]
pub(crate) struct CatchUpReplyFromPeer {
    pub(crate) peer_id: ReplicaId,
    pub(crate) sent_indices: Vec<u64>,
    pub(crate) reply: CatchUpReply,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum TimerTick {
    FailureDetector,
    Heartbeat,
    Bootstrap,
    CandidatePromotion { term: Term },
}

#[derive(Debug)]
pub(crate) struct ReplicateAcksFromPeers {
    pub(crate) index: u64,
    pub(crate) term: Term,
    pub(crate) acked_by: Vec<ReplicaId>,
    pub(crate) callback: crate::actor::Callback<ReplicateOutput, ReplicateError>,
}
