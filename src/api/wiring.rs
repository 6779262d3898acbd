use crate::actor::{ActorClient, ReplicaActor};
use crate::api::client::RaftClient;
use crate::api::node::RaftNode;
use crate::api::options::RaftOptionsValidated;
use crate::api::types::RaftMemberInfo;
use crate::replica::{ClusterMembership, InvalidClusterError, RealClock, Replica, ReplicaConfig, ReplicaId};
use crate::server::{self, RpcServer};
use crate::tasks::{TaskService, TaskStore, TaskStoreError};
use crate::transport::{GrpcPeerTransport, PeerAddress, PeerTransport};
use crate::RaftOptions;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::convert::TryFrom;
use std::sync::Arc;

const ACTOR_QUEUE_SIZE: usize = 64;
const IN_MEMORY_DATABASE: &str = ":memory:";

pub struct RaftNodeConfig {
    pub my_replica_id: u64,
    pub cluster_member_ids: Vec<u64>,
    pub info_logger: slog::Logger,
    pub options: RaftOptions,
}

pub struct RaftClientConfig {
    pub my_replica_id: u64,
    pub cluster_members: Vec<RaftMemberInfo>,
    /// SQLite database for tasks and the audit table. In memory when `None`.
    pub task_database_path: Option<String>,
    pub info_logger: slog::Logger,
    pub options: RaftOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum RaftNodeCreationError {
    #[error("Invalid cluster info")]
    InvalidClusterInfo(#[from] InvalidClusterError),
    #[error("Illegal options for configuring node: {0}")]
    IllegalOptions(String),
    #[error("Task store initialization failure")]
    TaskStore(#[from] TaskStoreError),
    #[error("Replica task has exited")]
    ReplicaExited,
}

/// Create and start a node that reaches its peers through `transport`.
pub async fn create_raft_node(
    config: RaftNodeConfig,
    transport: Arc<dyn PeerTransport>,
) -> Result<RaftNode, RaftNodeCreationError> {
    let node = spawn_node(
        config.info_logger,
        config.my_replica_id,
        &config.cluster_member_ids,
        config.options,
        transport,
    )?;
    node.start().await.map_err(|_| RaftNodeCreationError::ReplicaExited)?;

    Ok(node)
}

/// Create and start a node that talks gRPC, serving the raft, observability and task services on
/// its own member address.
pub async fn try_create_raft_client(config: RaftClientConfig) -> Result<RaftClient, RaftNodeCreationError> {
    let root_logger = config.info_logger;
    let my_replica_id = config.my_replica_id;

    let my_member_info = config
        .cluster_members
        .iter()
        .find(|member| member.replica_id == my_replica_id)
        .ok_or(InvalidClusterError::NotAMember(my_replica_id))?;
    let my_server_addr = my_member_info.socket_addr();

    let peers: Vec<PeerAddress> = config
        .cluster_members
        .iter()
        .filter(|member| member.replica_id != my_replica_id)
        .map(PeerAddress::from)
        .collect();
    let member_ids: Vec<u64> = config.cluster_members.iter().map(|m| m.replica_id).collect();
    let transport = Arc::new(GrpcPeerTransport::new(
        root_logger.new(slog::o!("ReplicaId" => my_replica_id, "Component" => "transport")),
        peers,
    ));

    let node = spawn_node(
        root_logger.clone(),
        my_replica_id,
        &member_ids,
        config.options,
        transport,
    )?;

    let database_path = config.task_database_path.as_deref().unwrap_or(IN_MEMORY_DATABASE);
    let store = Arc::new(TaskStore::open(database_path)?);
    let tasks = TaskService::new(
        root_logger.new(slog::o!("ReplicaId" => my_replica_id, "Component" => "tasks")),
        node.clone(),
        store,
    )
    .await
    .map(Arc::new)
    .map_err(|_| RaftNodeCreationError::ReplicaExited)?;

    let (server_shutdown_handle, server_shutdown_signal) = server::shutdown_signal();
    let rpc_server = RpcServer::new(
        root_logger.new(slog::o!("ReplicaId" => my_replica_id, "Component" => "server")),
        node.actor_client().weak(),
        tasks.clone(),
    );
    tokio::spawn(rpc_server.run(my_server_addr, server_shutdown_signal));

    node.start().await.map_err(|_| RaftNodeCreationError::ReplicaExited)?;

    Ok(RaftClient::new(node, tasks, server_shutdown_handle))
}

fn spawn_node(
    root_logger: slog::Logger,
    my_replica_id: u64,
    member_ids: &[u64],
    options: RaftOptions,
    transport: Arc<dyn PeerTransport>,
) -> Result<RaftNode, RaftNodeCreationError> {
    let members: Vec<ReplicaId> = member_ids.iter().copied().map(ReplicaId::new).collect();
    let cluster = ClusterMembership::new(ReplicaId::new(my_replica_id), &members)?;

    let options = RaftOptionsValidated::try_from(options)
        .and_then(|validated| validated.into_replica_options(&cluster))
        .map_err(|e| RaftNodeCreationError::IllegalOptions(e.to_string()))?;

    let logger = root_logger.new(slog::o!("ReplicaId" => my_replica_id));
    let (actor_client, actor_queue_rx) = ActorClient::new(ACTOR_QUEUE_SIZE);

    let replica = Replica::new(ReplicaConfig {
        logger: logger.clone(),
        cluster,
        transport,
        actor_client: actor_client.weak(),
        options,
        clock: RealClock,
        rng: StdRng::from_entropy(),
    });
    let replica_actor = ReplicaActor::new(logger, actor_queue_rx, replica);
    tokio::spawn(replica_actor.run_event_loop());

    Ok(RaftNode::new(actor_client))
}
