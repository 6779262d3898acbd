//! YAML configuration for the `replinode` binary.
//!
//! ```yaml
//! cluster:
//!   members:
//!     - { id: 1, host: 127.0.0.1, port: 50051 }
//! raft:
//!   heartbeat_interval_ms: 500
//! storage:
//!   database_path: "node-{node_id}.db"
//! logging:
//!   level: info
//! ```
use crate::api::{RaftClientConfig, RaftMemberInfo, RaftOptions};
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::path::Path;
use tokio::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeFileConfig {
    pub cluster: ClusterSection,
    #[serde(default)]
    pub raft: RaftSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterSection {
    pub members: Vec<MemberSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberSection {
    pub id: u64,
    pub host: Ipv4Addr,
    pub port: u16,
}

/// Millisecond overrides for `RaftOptions`. Missing keys keep the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaftSection {
    pub heartbeat_interval_ms: Option<u64>,
    pub failure_detector_interval_ms: Option<u64>,
    pub election_timeout_ms: Option<u64>,
    pub startup_delay_ms: Option<u64>,
    pub candidate_promotion_delay_ms: Option<u64>,
    pub leadership_handoff_probability: Option<f64>,
    pub event_history_capacity: Option<usize>,
    pub bootstrap_leader: Option<u64>,
    pub append_entries_timeout_ms: Option<u64>,
    pub heartbeat_timeout_ms: Option<u64>,
    pub commit_timeout_ms: Option<u64>,
    pub catch_up_timeout_ms: Option<u64>,
    pub promote_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    /// `{node_id}` is replaced with the node's id. In memory when absent.
    pub database_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        LoggingSection {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn load_config(path: impl AsRef<Path>) -> Result<NodeFileConfig, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&raw)
}

pub fn parse_config(raw: &str) -> Result<NodeFileConfig, ConfigError> {
    let config: NodeFileConfig = serde_yaml::from_str(raw)?;
    if config.cluster.members.is_empty() {
        return Err(ConfigError::Invalid("cluster.members must not be empty".to_string()));
    }
    Ok(config)
}

impl NodeFileConfig {
    pub fn log_level(&self) -> Result<slog::Level, ConfigError> {
        self.logging
            .level
            .parse::<slog::Level>()
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.logging.level)))
    }

    pub fn client_config(&self, node_id: u64, info_logger: slog::Logger) -> Result<RaftClientConfig, ConfigError> {
        if !self.cluster.members.iter().any(|m| m.id == node_id) {
            return Err(ConfigError::Invalid(format!("node {} is not in cluster.members", node_id)));
        }

        Ok(RaftClientConfig {
            my_replica_id: node_id,
            cluster_members: self
                .cluster
                .members
                .iter()
                .map(|m| RaftMemberInfo {
                    replica_id: m.id,
                    ip_addr: m.host,
                    raft_rpc_port: m.port,
                })
                .collect(),
            task_database_path: self
                .storage
                .database_path
                .as_ref()
                .map(|path| path.replace("{node_id}", &node_id.to_string())),
            info_logger,
            options: self.raft.to_options(),
        })
    }
}

impl RaftSection {
    fn to_options(&self) -> RaftOptions {
        let millis = |value: Option<u64>| value.map(Duration::from_millis);

        RaftOptions {
            heartbeat_interval: millis(self.heartbeat_interval_ms),
            failure_detector_interval: millis(self.failure_detector_interval_ms),
            election_timeout: millis(self.election_timeout_ms),
            startup_delay: millis(self.startup_delay_ms),
            candidate_promotion_delay: millis(self.candidate_promotion_delay_ms),
            leadership_handoff_probability: self.leadership_handoff_probability,
            event_history_capacity: self.event_history_capacity,
            bootstrap_leader: self.bootstrap_leader,
            append_entries_timeout: millis(self.append_entries_timeout_ms),
            heartbeat_timeout: millis(self.heartbeat_timeout_ms),
            commit_timeout: millis(self.commit_timeout_ms),
            catch_up_timeout: millis(self.catch_up_timeout_ms),
            promote_timeout: millis(self.promote_timeout_ms),
        }
    }
}
