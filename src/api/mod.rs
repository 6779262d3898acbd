//! This mod is meant to hold most of the code for the library's client-facing API.
mod client;
mod node;
mod options;
mod status_listener;
mod types;
mod wiring;

pub use client::RaftClient;
pub use node::RaftNode;
pub use node::DEFAULT_EVENTS_LIMIT;
pub use options::RaftOptions;
pub use status_listener::StatusListener;
pub use types::RaftMemberInfo;
pub use wiring::create_raft_node;
pub use wiring::try_create_raft_client;
pub use wiring::RaftClientConfig;
pub use wiring::RaftNodeConfig;
pub use wiring::RaftNodeCreationError;
