#![allow(dead_code)]

use replinode::{
    create_raft_node, AppendEntriesReply, AppendEntriesRequest, CatchUpReply, CatchUpRequest, CommitReply,
    CommitRequest, HeartbeatReply, HeartbeatRequest, NodeStatus, PeerCallError, PeerTransport, PromoteReply,
    PromoteRequest, RaftNode, RaftNodeConfig, RaftOptions, ReplicaId, Role,
};
use slog::Drain;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::time::{Duration, Instant};

/// Routes peer calls between in-process nodes. Links can be cut in both directions.
#[derive(Default)]
pub struct Network {
    nodes: Mutex<BTreeMap<ReplicaId, RaftNode>>,
    cut_links: Mutex<HashSet<(ReplicaId, ReplicaId)>>,
}

impl Network {
    pub fn new() -> Arc<Self> {
        Arc::new(Network::default())
    }

    pub fn transport_for(self: &Arc<Self>, me: ReplicaId) -> Arc<InMemoryTransport> {
        Arc::new(InMemoryTransport {
            me,
            network: self.clone(),
        })
    }

    pub fn register(&self, id: ReplicaId, node: RaftNode) {
        self.nodes.lock().unwrap().insert(id, node);
    }

    /// Cut every link between `id` and the rest of the cluster.
    pub fn isolate(&self, id: ReplicaId) {
        let others: Vec<ReplicaId> = self.nodes.lock().unwrap().keys().copied().filter(|o| *o != id).collect();
        let mut cut_links = self.cut_links.lock().unwrap();
        for other in others {
            cut_links.insert((id, other));
            cut_links.insert((other, id));
        }
    }

    pub fn heal(&self) {
        self.cut_links.lock().unwrap().clear();
    }

    fn route(&self, from: ReplicaId, to: ReplicaId) -> Result<RaftNode, PeerCallError> {
        if self.cut_links.lock().unwrap().contains(&(from, to)) {
            return Err(PeerCallError::Unreachable(format!("link {} -> {} is cut", from, to)));
        }
        self.nodes
            .lock()
            .unwrap()
            .get(&to)
            .cloned()
            .ok_or_else(|| PeerCallError::Unreachable(format!("{} is not registered", to)))
    }
}

pub struct InMemoryTransport {
    me: ReplicaId,
    network: Arc<Network>,
}

fn refused(e: impl std::fmt::Display) -> PeerCallError {
    PeerCallError::Unreachable(e.to_string())
}

#[async_trait::async_trait]
impl PeerTransport for InMemoryTransport {
    async fn append_entries(
        &self,
        peer: ReplicaId,
        request: AppendEntriesRequest,
    ) -> Result<AppendEntriesReply, PeerCallError> {
        let node = self.network.route(self.me, peer)?;
        node.receive_append_entries(request).await.map_err(refused)
    }

    async fn heartbeat(&self, peer: ReplicaId, request: HeartbeatRequest) -> Result<HeartbeatReply, PeerCallError> {
        let node = self.network.route(self.me, peer)?;
        node.receive_heartbeat(request).await.map_err(refused)
    }

    async fn commit(&self, peer: ReplicaId, request: CommitRequest) -> Result<CommitReply, PeerCallError> {
        let node = self.network.route(self.me, peer)?;
        node.receive_commit(request).await.map_err(refused)
    }

    async fn catch_up(&self, peer: ReplicaId, request: CatchUpRequest) -> Result<CatchUpReply, PeerCallError> {
        let node = self.network.route(self.me, peer)?;
        node.receive_catch_up(request).await.map_err(refused)
    }

    async fn promote(&self, peer: ReplicaId, request: PromoteRequest) -> Result<PromoteReply, PeerCallError> {
        let node = self.network.route(self.me, peer)?;
        node.receive_promote(request).await.map_err(refused)
    }
}

/// Timings scaled down so tests run in well under a second per phase.
pub fn fast_options(election_timeout: Duration) -> RaftOptions {
    let rpc_timeout = Duration::from_millis(200);
    RaftOptions {
        heartbeat_interval: Some(Duration::from_millis(50)),
        failure_detector_interval: Some(Duration::from_millis(100)),
        election_timeout: Some(election_timeout),
        startup_delay: Some(Duration::from_millis(200)),
        candidate_promotion_delay: Some(Duration::from_millis(50)),
        leadership_handoff_probability: Some(0.0),
        event_history_capacity: None,
        bootstrap_leader: None,
        append_entries_timeout: Some(rpc_timeout),
        heartbeat_timeout: Some(rpc_timeout),
        commit_timeout: Some(rpc_timeout),
        catch_up_timeout: Some(rpc_timeout),
        promote_timeout: Some(rpc_timeout),
    }
}

pub struct Cluster {
    pub network: Arc<Network>,
    pub nodes: BTreeMap<u64, RaftNode>,
}

impl Cluster {
    pub async fn start(size: u64, options: RaftOptions) -> Cluster {
        let network = Network::new();
        let member_ids: Vec<u64> = (1..=size).collect();
        let mut nodes = BTreeMap::new();

        for id in member_ids.iter().copied() {
            let node = create_raft_node(
                RaftNodeConfig {
                    my_replica_id: id,
                    cluster_member_ids: member_ids.clone(),
                    info_logger: create_root_logger_for_stdout(id),
                    options: options.clone(),
                },
                network.transport_for(ReplicaId::new(id)),
            )
            .await
            .unwrap();
            network.register(ReplicaId::new(id), node.clone());
            nodes.insert(id, node);
        }

        Cluster { network, nodes }
    }

    pub fn node(&self, id: u64) -> &RaftNode {
        &self.nodes[&id]
    }

    pub async fn wait_for_status<F: Fn(&NodeStatus) -> bool>(&self, id: u64, predicate: F) -> NodeStatus {
        wait_for_status(self.node(id), predicate).await
    }

    pub async fn wait_for_leader(&self, id: u64) -> NodeStatus {
        self.wait_for_status(id, |s| s.role == Role::Leader).await
    }
}

pub async fn wait_for_status<F: Fn(&NodeStatus) -> bool>(node: &RaftNode, predicate: F) -> NodeStatus {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let status = node.status().await.unwrap();
        if predicate(&status) {
            return status;
        }
        if Instant::now() > deadline {
            panic!("Timed out waiting for status. Last seen: {:?}", status);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

pub fn create_root_logger_for_stdout(replica_id: u64) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).use_file_location().build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = slog::LevelFilter::new(drain, slog::Level::Info).fuse();

    slog::Logger::root(drain, slog::o!("Test" => replica_id))
}
