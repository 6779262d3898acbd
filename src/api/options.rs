use crate::replica::{ClusterMembership, ReplicaId, ReplicaOptions, RpcTimeouts};
use std::convert::TryFrom;
use tokio::time::Duration;

/// Tuning knobs for a node. Anything left `None` takes the default.
#[derive(Clone, Debug, Default)]
pub struct RaftOptions {
    pub heartbeat_interval: Option<Duration>,
    pub failure_detector_interval: Option<Duration>,
    pub election_timeout: Option<Duration>,
    pub startup_delay: Option<Duration>,
    pub candidate_promotion_delay: Option<Duration>,
    /// Chance, per failure-detector tick, that a leader hands leadership to a random member.
    pub leadership_handoff_probability: Option<f64>,
    pub event_history_capacity: Option<usize>,
    /// Member that takes leadership on its own after the startup delay. Defaults to the lowest id.
    pub bootstrap_leader: Option<u64>,
    pub append_entries_timeout: Option<Duration>,
    pub heartbeat_timeout: Option<Duration>,
    pub commit_timeout: Option<Duration>,
    pub catch_up_timeout: Option<Duration>,
    pub promote_timeout: Option<Duration>,
}

#[derive(Clone, Debug)]
pub(super) struct RaftOptionsValidated {
    pub heartbeat_interval: Duration,
    pub failure_detector_interval: Duration,
    pub election_timeout: Duration,
    pub startup_delay: Duration,
    pub candidate_promotion_delay: Duration,
    pub leadership_handoff_probability: f64,
    pub event_history_capacity: usize,
    pub bootstrap_leader: Option<ReplicaId>,
    pub rpc_timeouts: RpcTimeouts,
}

impl RaftOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.heartbeat_interval >= self.election_timeout {
            return Err("Election timeout must be greater than leader's heartbeat interval");
        }
        if self.failure_detector_interval >= self.election_timeout {
            return Err("Election timeout must be greater than the failure detector interval");
        }
        if self.heartbeat_interval == Duration::from_millis(0) || self.failure_detector_interval == Duration::from_millis(0)
        {
            return Err("Ticker intervals must be non-zero");
        }
        if !(0.0..=1.0).contains(&self.leadership_handoff_probability) {
            return Err("Leadership handoff probability must be within [0, 1]");
        }
        if self.event_history_capacity == 0 {
            return Err("Event history capacity must be positive");
        }

        Ok(())
    }

    /// Resolve the options that depend on cluster membership.
    pub(super) fn into_replica_options(self, cluster: &ClusterMembership) -> Result<ReplicaOptions, &'static str> {
        let bootstrap_leader = match self.bootstrap_leader {
            Some(id) if cluster.contains_member(id) => id,
            Some(_) => return Err("Bootstrap leader must be a cluster member"),
            None => cluster.lowest_member_id(),
        };

        Ok(ReplicaOptions {
            heartbeat_interval: self.heartbeat_interval,
            failure_detector_interval: self.failure_detector_interval,
            election_timeout: self.election_timeout,
            startup_delay: self.startup_delay,
            candidate_promotion_delay: self.candidate_promotion_delay,
            leadership_handoff_probability: self.leadership_handoff_probability,
            bootstrap_leader,
            event_history_capacity: self.event_history_capacity,
            rpc_timeouts: self.rpc_timeouts,
        })
    }
}

impl TryFrom<RaftOptions> for RaftOptionsValidated {
    type Error = &'static str;

    fn try_from(options: RaftOptions) -> Result<Self, Self::Error> {
        let values = RaftOptionsValidated {
            heartbeat_interval: options.heartbeat_interval.unwrap_or(Duration::from_millis(500)),
            failure_detector_interval: options.failure_detector_interval.unwrap_or(Duration::from_secs(1)),
            election_timeout: options.election_timeout.unwrap_or(Duration::from_secs(5)),
            startup_delay: options.startup_delay.unwrap_or(Duration::from_secs(2)),
            candidate_promotion_delay: options.candidate_promotion_delay.unwrap_or(Duration::from_millis(500)),
            leadership_handoff_probability: options.leadership_handoff_probability.unwrap_or(0.01),
            event_history_capacity: options.event_history_capacity.unwrap_or(100),
            bootstrap_leader: options.bootstrap_leader.map(ReplicaId::new),
            rpc_timeouts: RpcTimeouts {
                append_entries: options.append_entries_timeout.unwrap_or(Duration::from_secs(2)),
                heartbeat: options.heartbeat_timeout.unwrap_or(Duration::from_secs(1)),
                commit: options.commit_timeout.unwrap_or(Duration::from_secs(1)),
                catch_up: options.catch_up_timeout.unwrap_or(Duration::from_secs(5)),
                promote: options.promote_timeout.unwrap_or(Duration::from_secs(2)),
            },
        };

        values.validate()?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster() -> ClusterMembership {
        let members: Vec<ReplicaId> = vec![3, 1, 2].into_iter().map(ReplicaId::new).collect();
        ClusterMembership::new(ReplicaId::new(2), &members).unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let validated = RaftOptionsValidated::try_from(RaftOptions::default()).unwrap();

        assert_eq!(validated.heartbeat_interval, Duration::from_millis(500));
        assert_eq!(validated.election_timeout, Duration::from_secs(5));
        assert_eq!(validated.rpc_timeouts.catch_up, Duration::from_secs(5));
        assert_eq!(validated.event_history_capacity, 100);

        let replica_options = validated.into_replica_options(&cluster()).unwrap();
        assert_eq!(replica_options.bootstrap_leader, ReplicaId::new(1));
    }

    #[test]
    fn heartbeat_must_be_shorter_than_election_timeout() {
        let options = RaftOptions {
            heartbeat_interval: Some(Duration::from_secs(5)),
            ..RaftOptions::default()
        };

        assert!(RaftOptionsValidated::try_from(options).is_err());
    }

    #[test]
    fn handoff_probability_is_bounded() {
        for probability in [-0.1, 1.5].iter() {
            let options = RaftOptions {
                leadership_handoff_probability: Some(*probability),
                ..RaftOptions::default()
            };
            assert!(RaftOptionsValidated::try_from(options).is_err(), "{}", probability);
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let options = RaftOptions {
            event_history_capacity: Some(0),
            ..RaftOptions::default()
        };

        assert!(RaftOptionsValidated::try_from(options).is_err());
    }

    #[test]
    fn bootstrap_leader_must_be_a_member() {
        let options = RaftOptions {
            bootstrap_leader: Some(9),
            ..RaftOptions::default()
        };
        let validated = RaftOptionsValidated::try_from(options).unwrap();

        assert!(validated.into_replica_options(&cluster()).is_err());
    }
}
