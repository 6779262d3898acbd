use crate::replica::{
    AppendEntriesReply, AppendEntriesRequest, CatchUpReply, CatchUpRequest, CommitReply, CommitRequest,
    HeartbeatReply, HeartbeatRequest, PromoteReply, PromoteRequest, ReplicaId,
};

#[derive(Debug, thiserror::Error)]
pub enum PeerCallError {
    #[error("Peer unreachable: {0}")]
    Unreachable(String),
    #[error("Peer call timed out")]
    Timeout,
    #[error("Malformed reply from peer: {0}")]
    Malformed(String),
}

/// PeerTransport delivers one RPC to one peer and returns its reply. Implementations do not
/// retry; the replica applies per-call timeouts on top.
#[async_trait::async_trait]
pub trait PeerTransport: Send + Sync + 'static {
    async fn append_entries(
        &self,
        peer: ReplicaId,
        request: AppendEntriesRequest,
    ) -> Result<AppendEntriesReply, PeerCallError>;

    async fn heartbeat(&self, peer: ReplicaId, request: HeartbeatRequest) -> Result<HeartbeatReply, PeerCallError>;

    async fn commit(&self, peer: ReplicaId, request: CommitRequest) -> Result<CommitReply, PeerCallError>;

    async fn catch_up(&self, peer: ReplicaId, request: CatchUpRequest) -> Result<CatchUpReply, PeerCallError>;

    async fn promote(&self, peer: ReplicaId, request: PromoteRequest) -> Result<PromoteReply, PeerCallError>;
}
