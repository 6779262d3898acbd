use crate::grpc::grpc_raft_client::GrpcRaftClient;
use crate::replica::{
    AppendEntriesReply, AppendEntriesRequest, CatchUpReply, CatchUpRequest, CommitReply, CommitRequest,
    HeartbeatReply, HeartbeatRequest, PromoteReply, PromoteRequest, ReplicaId,
};
use crate::transport::peer_transport::{PeerCallError, PeerTransport};
use crate::transport::proto;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use tokio::sync::Mutex;
use tonic::transport::{Channel, Endpoint};

#[derive(Clone, Debug)]
pub struct PeerAddress {
    pub replica_id: ReplicaId,
    pub ip_addr: Ipv4Addr,
    pub port: u16,
}

impl PeerAddress {
    fn url(&self) -> String {
        format!("http://{}:{}", self.ip_addr, self.port)
    }
}

/// GrpcPeerTransport calls peers' `GrpcRaft` service. Connections are opened on first use and
/// cached; tonic's channel reconnects on its own after that.
pub struct GrpcPeerTransport {
    logger: slog::Logger,
    peers: HashMap<ReplicaId, PeerConnection>,
}

struct PeerConnection {
    url: String,
    client: Mutex<Option<GrpcRaftClient<Channel>>>,
}

impl GrpcPeerTransport {
    pub fn new(logger: slog::Logger, peers: Vec<PeerAddress>) -> Self {
        let peers = peers
            .into_iter()
            .map(|address| {
                let connection = PeerConnection {
                    url: address.url(),
                    client: Mutex::new(None),
                };
                (address.replica_id, connection)
            })
            .collect();

        GrpcPeerTransport { logger, peers }
    }

    async fn client(&self, peer: ReplicaId) -> Result<GrpcRaftClient<Channel>, PeerCallError> {
        let connection = self
            .peers
            .get(&peer)
            .ok_or_else(|| PeerCallError::Unreachable(format!("No address for peer {:?}", peer)))?;

        let mut cached = connection.client.lock().await;
        if let Some(client) = cached.as_ref() {
            return Ok(client.clone());
        }

        slog::debug!(self.logger, "Connecting to {:?} at {}", peer, connection.url);
        let endpoint = Endpoint::from_shared(connection.url.clone())
            .map_err(|e| PeerCallError::Unreachable(format!("Invalid uri {}: {}", connection.url, e)))?;
        let channel = endpoint
            .connect()
            .await
            .map_err(|e| PeerCallError::Unreachable(format!("Connect to {} failed: {}", connection.url, e)))?;

        let client = GrpcRaftClient::new(channel);
        cached.replace(client.clone());

        Ok(client)
    }
}

fn status_to_error(status: tonic::Status) -> PeerCallError {
    PeerCallError::Unreachable(format!("{:?}: {}", status.code(), status.message()))
}

fn malformed(e: proto::ConversionError) -> PeerCallError {
    PeerCallError::Malformed(e.to_string())
}

#[async_trait::async_trait]
impl PeerTransport for GrpcPeerTransport {
    async fn append_entries(
        &self,
        peer: ReplicaId,
        request: AppendEntriesRequest,
    ) -> Result<AppendEntriesReply, PeerCallError> {
        let mut client = self.client(peer).await?;
        let rpc_request = proto::append_entries_req_to_proto(&request);

        slog::debug!(self.logger, "ClientWire - {:?} - {:?}", peer, rpc_request);
        let rpc_reply = client
            .append_entries(rpc_request)
            .await
            .map_err(status_to_error)?
            .into_inner();
        slog::debug!(self.logger, "ClientWire - {:?} - {:?}", peer, rpc_reply);

        proto::append_entries_reply_from_proto(rpc_reply).map_err(malformed)
    }

    async fn heartbeat(&self, peer: ReplicaId, request: HeartbeatRequest) -> Result<HeartbeatReply, PeerCallError> {
        let mut client = self.client(peer).await?;
        let rpc_reply = client
            .heartbeat(proto::heartbeat_req_to_proto(&request))
            .await
            .map_err(status_to_error)?
            .into_inner();

        proto::heartbeat_reply_from_proto(rpc_reply).map_err(malformed)
    }

    async fn commit(&self, peer: ReplicaId, request: CommitRequest) -> Result<CommitReply, PeerCallError> {
        let mut client = self.client(peer).await?;
        let rpc_reply = client
            .commit(proto::commit_req_to_proto(&request))
            .await
            .map_err(status_to_error)?
            .into_inner();

        Ok(proto::commit_reply_from_proto(rpc_reply))
    }

    async fn catch_up(&self, peer: ReplicaId, request: CatchUpRequest) -> Result<CatchUpReply, PeerCallError> {
        let mut client = self.client(peer).await?;
        let rpc_request = proto::catch_up_req_to_proto(&request);

        slog::debug!(
            self.logger,
            "ClientWire - {:?} - CatchUp with {} entries",
            peer,
            rpc_request.entries.len()
        );
        let rpc_reply = client
            .catch_up(rpc_request)
            .await
            .map_err(status_to_error)?
            .into_inner();

        proto::catch_up_reply_from_proto(rpc_reply).map_err(malformed)
    }

    async fn promote(&self, peer: ReplicaId, request: PromoteRequest) -> Result<PromoteReply, PeerCallError> {
        let mut client = self.client(peer).await?;
        let rpc_reply = client
            .promote(proto::promote_req_to_proto(&request))
            .await
            .map_err(status_to_error)?
            .into_inner();

        proto::promote_reply_from_proto(rpc_reply).map_err(malformed)
    }
}
