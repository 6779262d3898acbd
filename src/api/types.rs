use crate::replica::ReplicaId;
use crate::transport::PeerAddress;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Where a cluster member serves its gRPC interface.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RaftMemberInfo {
    pub replica_id: u64,
    pub ip_addr: Ipv4Addr,
    pub raft_rpc_port: u16,
}

impl RaftMemberInfo {
    pub(crate) fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.ip_addr, self.raft_rpc_port))
    }
}

impl From<&RaftMemberInfo> for PeerAddress {
    fn from(member_info: &RaftMemberInfo) -> Self {
        PeerAddress {
            replica_id: ReplicaId::new(member_info.replica_id),
            ip_addr: member_info.ip_addr,
            port: member_info.raft_rpc_port,
        }
    }
}
