use crate::replica::{
    AppendEntriesReply, AppendEntriesRequest, CatchUpReply, CatchUpRequest, CommitReply, CommitRequest,
    HeartbeatReply, HeartbeatRequest, PromoteReply, PromoteRequest, ReplicaId, Term,
};
use crate::transport::peer_transport::{PeerCallError, PeerTransport};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum StubCall {
    AppendEntries { index: u64, term: Term },
    Heartbeat { term: Term, leader_commit: Option<u64> },
    Commit { commit_index: u64 },
    CatchUp { indices: Vec<u64> },
    Promote { term: Term },
}

/// Records every outbound call. Reachable peers accept everything; unreachable peers fail.
#[derive(Default)]
pub(crate) struct StubTransport {
    unreachable: Mutex<HashSet<ReplicaId>>,
    peer_log_lengths: Mutex<HashMap<ReplicaId, u64>>,
    calls: Mutex<Vec<(ReplicaId, StubCall)>>,
}

impl StubTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(StubTransport::default())
    }

    pub(crate) fn set_unreachable(&self, peer: ReplicaId) {
        self.unreachable.lock().unwrap().insert(peer);
    }

    /// Log length a peer reports in heartbeat replies.
    pub(crate) fn set_peer_log_length(&self, peer: ReplicaId, log_length: u64) {
        self.peer_log_lengths.lock().unwrap().insert(peer, log_length);
    }

    pub(crate) fn calls(&self) -> Vec<(ReplicaId, StubCall)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_to(&self, peer: ReplicaId) -> Vec<StubCall> {
        self.calls()
            .into_iter()
            .filter(|(to, _)| *to == peer)
            .map(|(_, call)| call)
            .collect()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, peer: ReplicaId, call: StubCall) -> Result<(), PeerCallError> {
        self.calls.lock().unwrap().push((peer, call));
        if self.unreachable.lock().unwrap().contains(&peer) {
            Err(PeerCallError::Unreachable(format!("{:?} is unreachable", peer)))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl PeerTransport for StubTransport {
    async fn append_entries(
        &self,
        peer: ReplicaId,
        request: AppendEntriesRequest,
    ) -> Result<AppendEntriesReply, PeerCallError> {
        self.record(
            peer,
            StubCall::AppendEntries {
                index: request.entry.index,
                term: request.term,
            },
        )?;
        Ok(AppendEntriesReply {
            success: true,
            node_id: peer,
            term: request.term,
        })
    }

    async fn heartbeat(&self, peer: ReplicaId, request: HeartbeatRequest) -> Result<HeartbeatReply, PeerCallError> {
        self.record(
            peer,
            StubCall::Heartbeat {
                term: request.term,
                leader_commit: request.leader_commit,
            },
        )?;
        let log_length = self
            .peer_log_lengths
            .lock()
            .unwrap()
            .get(&peer)
            .copied()
            .unwrap_or(request.leader_log_length);
        Ok(HeartbeatReply {
            success: true,
            node_id: peer,
            log_length,
        })
    }

    async fn commit(&self, peer: ReplicaId, request: CommitRequest) -> Result<CommitReply, PeerCallError> {
        self.record(
            peer,
            StubCall::Commit {
                commit_index: request.commit_index,
            },
        )?;
        Ok(CommitReply { success: true })
    }

    async fn catch_up(&self, peer: ReplicaId, request: CatchUpRequest) -> Result<CatchUpReply, PeerCallError> {
        let indices: Vec<u64> = request.entries.iter().map(|e| e.index).collect();
        self.record(peer, StubCall::CatchUp { indices: indices.clone() })?;

        let log_length = indices.last().map(|last| last + 1).unwrap_or(0);
        self.set_peer_log_length(peer, log_length);
        Ok(CatchUpReply {
            success: true,
            node_id: peer,
            log_length,
        })
    }

    async fn promote(&self, peer: ReplicaId, request: PromoteRequest) -> Result<PromoteReply, PeerCallError> {
        self.record(peer, StubCall::Promote { term: request.term })?;
        Ok(PromoteReply {
            success: true,
            node_id: peer,
        })
    }
}
