use crate::api::DEFAULT_EVENTS_LIMIT;
use crate::grpc::grpc_observability_server::GrpcObservability;
use crate::grpc::{
    proto_toggle_error, proto_toggle_result, ProtoClusterReq, ProtoClusterSnapshot, ProtoEvent, ProtoEventsReply,
    ProtoEventsReq, ProtoLeaderInfo, ProtoLeaderReq, ProtoLogReply, ProtoLogReq, ProtoNodeStatus, ProtoNotThisNode,
    ProtoReplicatedEntry, ProtoServerFault, ProtoStatusReq, ProtoToggleError, ProtoToggleReq, ProtoToggleResult,
    ProtoWatchStatusReq,
};
use crate::replica::{NodeEvent, NodeStatus, ReplicaExited, ReplicaId, ToggleError};
use crate::server::server::RpcServer;
use crate::transport::proto;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tonic::{Request, Response, Status};

fn replica_exited(_: ReplicaExited) -> Status {
    Status::unavailable("Replica task has exited")
}

fn event_to_proto(event: &NodeEvent) -> ProtoEvent {
    ProtoEvent {
        timestamp_millis: event.timestamp.timestamp_millis(),
        event_type: event.kind.event_type().to_string(),
        node_id: event.node_id.as_u64(),
        term: event.term.as_u64(),
        details_json: event.kind.details().to_string(),
    }
}

fn toggle_result_to_proto(result: Result<NodeStatus, ToggleError>) -> ProtoToggleResult {
    let result = match result {
        Ok(status) => proto_toggle_result::Result::Ok(proto::node_status_to_proto(&status)),
        Err(ToggleError::NotThisNode { requested, this_node }) => {
            proto_toggle_result::Result::Err(ProtoToggleError {
                err: Some(proto_toggle_error::Err::NotThisNode(ProtoNotThisNode {
                    requested: requested.as_u64(),
                    this_node: this_node.as_u64(),
                })),
            })
        }
        Err(e @ ToggleError::ReplicaExited) => proto_toggle_result::Result::Err(ProtoToggleError {
            err: Some(proto_toggle_error::Err::ServerFault(ProtoServerFault { message: e.to_string() })),
        }),
    };

    ProtoToggleResult { result: Some(result) }
}

#[async_trait::async_trait]
impl GrpcObservability for RpcServer {
    async fn get_status(&self, _: Request<ProtoStatusReq>) -> Result<Response<ProtoNodeStatus>, Status> {
        let status = self.local_node()?.status().await.map_err(replica_exited)?;
        Ok(Response::new(proto::node_status_to_proto(&status)))
    }

    async fn get_leader(&self, _: Request<ProtoLeaderReq>) -> Result<Response<ProtoLeaderInfo>, Status> {
        let leader = self.local_node()?.leader().await.map_err(replica_exited)?;
        Ok(Response::new(ProtoLeaderInfo {
            leader_id: proto::optional_id_to_proto(leader.leader_id),
            this_node_id: leader.this_node_id.as_u64(),
            is_leader: leader.is_leader,
        }))
    }

    async fn get_events(&self, request: Request<ProtoEventsReq>) -> Result<Response<ProtoEventsReply>, Status> {
        let limit = match request.into_inner().limit {
            0 => DEFAULT_EVENTS_LIMIT,
            limit => limit as usize,
        };
        let events = self
            .local_node()?
            .recent_events(limit)
            .await
            .map_err(replica_exited)?;

        Ok(Response::new(ProtoEventsReply {
            events: events.iter().map(event_to_proto).collect(),
        }))
    }

    async fn get_log(&self, _: Request<ProtoLogReq>) -> Result<Response<ProtoLogReply>, Status> {
        let node = self.local_node()?;
        let entries = node.log_with_replication().await.map_err(replica_exited)?;
        let status = node.status().await.map_err(replica_exited)?;

        let entries = entries
            .iter()
            .map(|replicated| ProtoReplicatedEntry {
                entry: Some(proto::log_entry_to_proto(&replicated.entry)),
                replication: replicated
                    .replication
                    .iter()
                    .map(|(id, acked)| (id.as_u64(), *acked))
                    .collect(),
            })
            .collect();

        Ok(Response::new(ProtoLogReply {
            entries,
            log_length: status.log_length,
            commit_index: proto::optional_index_to_proto(status.commit_index),
        }))
    }

    async fn get_cluster(&self, _: Request<ProtoClusterReq>) -> Result<Response<ProtoClusterSnapshot>, Status> {
        let cluster = self.local_node()?.cluster().await.map_err(replica_exited)?;

        Ok(Response::new(ProtoClusterSnapshot {
            this_node: Some(proto::node_status_to_proto(&cluster.this_node)),
            cluster_nodes: cluster.cluster_nodes.iter().map(ReplicaId::as_u64).collect(),
            leader_id: proto::optional_id_to_proto(cluster.leader_id),
            term: cluster.term.as_u64(),
        }))
    }

    async fn toggle_node(&self, request: Request<ProtoToggleReq>) -> Result<Response<ProtoToggleResult>, Status> {
        let target = ReplicaId::new(request.into_inner().node_id);
        slog::info!(self.logger, "Toggle requested for {:?}", target);

        let result = self.local_node()?.toggle(target).await;
        Ok(Response::new(toggle_result_to_proto(result)))
    }

    type WatchStatusStream = Pin<Box<dyn Stream<Item = Result<ProtoNodeStatus, Status>> + Send + Sync + 'static>>;

    async fn watch_status(
        &self,
        _: Request<ProtoWatchStatusReq>,
    ) -> Result<Response<Self::WatchStatusStream>, Status> {
        let listener = self
            .local_node()?
            .status_listener()
            .await
            .map_err(replica_exited)?;
        slog::debug!(self.logger, "Status watcher connected");

        let stream = listener.map(|status| Ok(proto::node_status_to_proto(&status)));
        Ok(Response::new(Box::pin(stream)))
    }
}
