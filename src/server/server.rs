use crate::actor::WeakActorClient;
use crate::api::RaftNode;
use crate::grpc::grpc_observability_server::GrpcObservabilityServer;
use crate::grpc::grpc_raft_server::{GrpcRaft, GrpcRaftServer};
use crate::grpc::grpc_tasks_server::GrpcTasksServer;
use crate::grpc::{
    ProtoAppendEntriesReq, ProtoAppendEntriesResult, ProtoCatchUpReq, ProtoCatchUpResult, ProtoCommitReq,
    ProtoCommitResult, ProtoHeartbeatReq, ProtoHeartbeatResult, ProtoPromoteReq, ProtoPromoteResult,
};
use crate::replica::RpcHandlerError;
use crate::server::RpcServerShutdownSignal;
use crate::tasks::TaskService;
use crate::transport::proto;
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// RpcServer serves the peer replication, observability and task gRPC services of one node.
#[derive(Clone)]
pub(crate) struct RpcServer {
    pub(super) logger: slog::Logger,
    local_replica: WeakActorClient,
    pub(super) tasks: Arc<TaskService>,
}

impl RpcServer {
    pub(crate) fn new(logger: slog::Logger, local_replica: WeakActorClient, tasks: Arc<TaskService>) -> Self {
        RpcServer {
            logger,
            local_replica,
            tasks,
        }
    }

    pub(crate) async fn run(self, socket_addr: SocketAddr, shutdown_signal: RpcServerShutdownSignal) {
        let logger = self.logger.clone();
        slog::info!(logger, "Listening on '{:?}'", socket_addr);

        let result = Server::builder()
            .add_service(GrpcRaftServer::new(self.clone()))
            .add_service(GrpcObservabilityServer::new(self.clone()))
            .add_service(GrpcTasksServer::new(self))
            .serve_with_shutdown(socket_addr, shutdown_signal)
            .await;

        match result {
            Ok(()) => slog::info!(logger, "Server run() has exited"),
            Err(e) => slog::error!(logger, "Server run() failed: {:?}", e),
        }
    }

    /// The server must not keep the node alive, so it only holds a weak handle.
    pub(super) fn local_node(&self) -> Result<RaftNode, Status> {
        self.local_replica
            .upgrade()
            .map(RaftNode::new)
            .ok_or_else(|| Status::unavailable("Replica task has exited"))
    }
}

pub(super) fn rpc_handler_error_to_status(error: RpcHandlerError) -> Status {
    match error {
        RpcHandlerError::NodeStopped => Status::unavailable("Node is stopped"),
        RpcHandlerError::ReplicaExited => Status::unavailable("Replica task has exited"),
    }
}

fn invalid_argument(e: proto::ConversionError) -> Status {
    Status::invalid_argument(e.to_string())
}

#[async_trait::async_trait]
impl GrpcRaft for RpcServer {
    async fn append_entries(
        &self,
        rpc_request_wrapped: Request<ProtoAppendEntriesReq>,
    ) -> Result<Response<ProtoAppendEntriesResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let request = proto::append_entries_req_from_proto(rpc_request).map_err(invalid_argument)?;
        let reply = self
            .local_node()?
            .receive_append_entries(request)
            .await
            .map_err(rpc_handler_error_to_status)?;

        let rpc_reply = proto::append_entries_reply_to_proto(&reply);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }

    async fn heartbeat(
        &self,
        rpc_request_wrapped: Request<ProtoHeartbeatReq>,
    ) -> Result<Response<ProtoHeartbeatResult>, Status> {
        let request =
            proto::heartbeat_req_from_proto(rpc_request_wrapped.into_inner()).map_err(invalid_argument)?;
        let reply = self
            .local_node()?
            .receive_heartbeat(request)
            .await
            .map_err(rpc_handler_error_to_status)?;

        Ok(Response::new(proto::heartbeat_reply_to_proto(&reply)))
    }

    async fn commit(&self, rpc_request_wrapped: Request<ProtoCommitReq>) -> Result<Response<ProtoCommitResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let request = proto::commit_req_from_proto(rpc_request).map_err(invalid_argument)?;
        let reply = self
            .local_node()?
            .receive_commit(request)
            .await
            .map_err(rpc_handler_error_to_status)?;

        Ok(Response::new(proto::commit_reply_to_proto(&reply)))
    }

    async fn catch_up(
        &self,
        rpc_request_wrapped: Request<ProtoCatchUpReq>,
    ) -> Result<Response<ProtoCatchUpResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(
            self.logger,
            "ServerWire - CatchUp from {} with {} entries",
            rpc_request.leader_id,
            rpc_request.entries.len()
        );

        let request = proto::catch_up_req_from_proto(rpc_request).map_err(invalid_argument)?;
        let reply = self
            .local_node()?
            .receive_catch_up(request)
            .await
            .map_err(rpc_handler_error_to_status)?;

        Ok(Response::new(proto::catch_up_reply_to_proto(&reply)))
    }

    async fn promote(
        &self,
        rpc_request_wrapped: Request<ProtoPromoteReq>,
    ) -> Result<Response<ProtoPromoteResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let request = proto::promote_req_from_proto(rpc_request);
        let reply = self
            .local_node()?
            .receive_promote(request)
            .await
            .map_err(rpc_handler_error_to_status)?;

        Ok(Response::new(proto::promote_reply_to_proto(&reply)))
    }
}
