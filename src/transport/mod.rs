mod grpc_transport;
mod peer_transport;
pub(crate) mod proto;
#[cfg(test)]
mod stub;

pub use grpc_transport::GrpcPeerTransport;
pub use grpc_transport::PeerAddress;
pub use peer_transport::PeerCallError;
pub use peer_transport::PeerTransport;
#[cfg(test)]
pub(crate) use stub::{StubCall, StubTransport};
