use crate::actor::{Callback, WeakActorClient};
use crate::replica::local_state::Term;
use crate::replica::peers::ReplicaId;
use crate::replica::replica_api::{
    AppendEntriesRequest, CatchUpReplyFromPeer, CatchUpRequest, CommitRequest, HeartbeatReplyFromPeer,
    HeartbeatRequest, PromoteRequest, ReplicateAcksFromPeers, ReplicateError, ReplicateOutput,
};
use crate::transport::{PeerCallError, PeerTransport};
use futures::future;
use std::future::Future;
use std::sync::Arc;
use tokio::time::Duration;

#[derive(Copy, Clone, Debug)]
pub(crate) struct RpcTimeouts {
    pub(crate) append_entries: Duration,
    pub(crate) heartbeat: Duration,
    pub(crate) commit: Duration,
    pub(crate) catch_up: Duration,
    pub(crate) promote: Duration,
}

/// PeerCalls spawns outbound RPCs. Nothing here touches replica state: results that matter come
/// back to the actor as events.
pub(crate) struct PeerCalls {
    logger: slog::Logger,
    transport: Arc<dyn PeerTransport>,
    timeouts: RpcTimeouts,
    actor_client: WeakActorClient,
}

async fn call_with_timeout<T, F>(timeout: Duration, call: F) -> Result<T, PeerCallError>
where
    F: Future<Output = Result<T, PeerCallError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_elapsed) => Err(PeerCallError::Timeout),
    }
}

impl PeerCalls {
    pub(crate) fn new(
        logger: slog::Logger,
        transport: Arc<dyn PeerTransport>,
        timeouts: RpcTimeouts,
        actor_client: WeakActorClient,
    ) -> Self {
        PeerCalls {
            logger,
            transport,
            timeouts,
            actor_client,
        }
    }

    /// Send one entry to every peer concurrently, then hand the set of peers that acked back to
    /// the actor, which owns the quorum decision and the client's callback.
    pub(crate) fn replicate(
        &self,
        peers: Vec<ReplicaId>,
        request: AppendEntriesRequest,
        callback: Callback<ReplicateOutput, ReplicateError>,
    ) {
        let logger = self.logger.clone();
        let transport = self.transport.clone();
        let timeout = self.timeouts.append_entries;
        let actor_client = self.actor_client.clone();

        tokio::task::spawn(async move {
            let index = request.entry.index;
            let term = request.term;

            let calls = peers.into_iter().map(|peer| {
                let transport = transport.clone();
                let request = request.clone();
                async move {
                    let result = call_with_timeout(timeout, transport.append_entries(peer, request)).await;
                    (peer, result)
                }
            });

            let mut acked_by = Vec::new();
            for (peer, result) in future::join_all(calls).await {
                match result {
                    Ok(reply) if reply.success => acked_by.push(peer),
                    Ok(reply) => slog::info!(logger, "Peer {:?} rejected entry {}: {:?}", peer, index, reply),
                    Err(e) => slog::warn!(logger, "AppendEntries to {:?} for entry {} failed: {}", peer, index, e),
                }
            }

            let _ = actor_client
                .replicate_acks_from_peers(ReplicateAcksFromPeers {
                    index,
                    term,
                    acked_by,
                    callback,
                })
                .await;
        });
    }

    pub(crate) fn broadcast_heartbeats(&self, peers: Vec<ReplicaId>, request: HeartbeatRequest) {
        for peer in peers {
            let logger = self.logger.clone();
            let transport = self.transport.clone();
            let timeout = self.timeouts.heartbeat;
            let actor_client = self.actor_client.clone();
            let request = request.clone();

            tokio::task::spawn(async move {
                let sent_term = request.term;
                match call_with_timeout(timeout, transport.heartbeat(peer, request)).await {
                    Ok(reply) => {
                        let _ = actor_client
                            .heartbeat_reply_from_peer(HeartbeatReplyFromPeer {
                                peer_id: peer,
                                sent_term,
                                reply,
                            })
                            .await;
                    }
                    Err(e) => slog::debug!(logger, "Heartbeat to {:?} failed: {}", peer, e),
                }
            });
        }
    }

    /// Fire-and-forget.
    pub(crate) fn notify_commit(&self, peers: Vec<ReplicaId>, commit_index: u64) {
        for peer in peers {
            let logger = self.logger.clone();
            let transport = self.transport.clone();
            let timeout = self.timeouts.commit;

            tokio::task::spawn(async move {
                let request = CommitRequest { commit_index };
                if let Err(e) = call_with_timeout(timeout, transport.commit(peer, request)).await {
                    slog::debug!(logger, "Commit notification to {:?} failed: {}", peer, e);
                }
            });
        }
    }

    pub(crate) fn catch_up(&self, peer: ReplicaId, request: CatchUpRequest) {
        let logger = self.logger.clone();
        let transport = self.transport.clone();
        let timeout = self.timeouts.catch_up;
        let actor_client = self.actor_client.clone();

        tokio::task::spawn(async move {
            let sent_indices: Vec<u64> = request.entries.iter().map(|e| e.index).collect();
            match call_with_timeout(timeout, transport.catch_up(peer, request)).await {
                Ok(reply) => {
                    let _ = actor_client
                        .catch_up_reply_from_peer(CatchUpReplyFromPeer {
                            peer_id: peer,
                            sent_indices,
                            reply,
                        })
                        .await;
                }
                Err(e) => slog::warn!(logger, "CatchUp to {:?} failed: {}", peer, e),
            }
        });
    }

    pub(crate) fn promote(&self, peer: ReplicaId, term: Term, previous_leader: ReplicaId) {
        let logger = self.logger.clone();
        let transport = self.transport.clone();
        let timeout = self.timeouts.promote;

        tokio::task::spawn(async move {
            let request = PromoteRequest {
                term,
                previous_leader: Some(previous_leader),
            };
            match call_with_timeout(timeout, transport.promote(peer, request)).await {
                Ok(reply) => slog::info!(logger, "Promotion of {:?} accepted: {}", peer, reply.success),
                Err(e) => slog::warn!(logger, "Promotion of {:?} failed: {}", peer, e),
            }
        });
    }
}
