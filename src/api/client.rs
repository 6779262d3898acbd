use crate::api::node::RaftNode;
use crate::server::RpcServerShutdownHandle;
use crate::tasks::TaskService;
use std::sync::Arc;

/// RaftClient bundles a node with its gRPC server and task service.
///
/// The server keeps serving until this value is dropped or `shutdown()` is called.
pub struct RaftClient {
    pub node: RaftNode,
    pub tasks: Arc<TaskService>,
    server_shutdown_handle: RpcServerShutdownHandle,
}

impl RaftClient {
    pub(crate) fn new(node: RaftNode, tasks: Arc<TaskService>, server_shutdown_handle: RpcServerShutdownHandle) -> Self {
        RaftClient {
            node,
            tasks,
            server_shutdown_handle,
        }
    }

    /// Stop the node and its gRPC server.
    pub async fn shutdown(self) {
        let _ = self.node.stop().await;
        self.server_shutdown_handle.shutdown();
    }
}
