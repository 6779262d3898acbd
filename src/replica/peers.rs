use std::collections::BTreeSet;
use std::fmt;

/// ReplicaId identifies one member of the static cluster. Ids are small positive integers.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ReplicaId(u64);

impl ReplicaId {
    pub fn new(id: u64) -> Self {
        ReplicaId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

impl fmt::Display for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InvalidClusterError {
    #[error("Cluster membership is empty")]
    Empty,
    #[error("Replica id 0 is reserved")]
    ZeroId,
    #[error("Replica {0} is listed more than once")]
    Duplicate(u64),
    #[error("Replica {0} is not a cluster member")]
    NotAMember(u64),
}

/// Static membership, fixed for the lifetime of the process.
#[derive(Clone, Debug)]
pub(crate) struct ClusterMembership {
    my_replica_id: ReplicaId,
    members: BTreeSet<ReplicaId>,
}

impl ClusterMembership {
    pub(crate) fn new(my_replica_id: ReplicaId, member_ids: &[ReplicaId]) -> Result<Self, InvalidClusterError> {
        if member_ids.is_empty() {
            return Err(InvalidClusterError::Empty);
        }

        let mut members = BTreeSet::new();
        for id in member_ids {
            if id.as_u64() == 0 {
                return Err(InvalidClusterError::ZeroId);
            }
            if !members.insert(*id) {
                return Err(InvalidClusterError::Duplicate(id.as_u64()));
            }
        }
        if !members.contains(&my_replica_id) {
            return Err(InvalidClusterError::NotAMember(my_replica_id.as_u64()));
        }

        Ok(ClusterMembership { my_replica_id, members })
    }

    pub(crate) fn my_replica_id(&self) -> ReplicaId {
        self.my_replica_id
    }

    pub(crate) fn contains_member(&self, id: ReplicaId) -> bool {
        self.members.contains(&id)
    }

    /// All members in ascending id order, including me.
    pub(crate) fn member_ids(&self) -> Vec<ReplicaId> {
        self.members.iter().copied().collect()
    }

    pub(crate) fn peer_ids(&self) -> Vec<ReplicaId> {
        self.members
            .iter()
            .copied()
            .filter(|id| *id != self.my_replica_id)
            .collect()
    }

    pub(crate) fn lowest_member_id(&self) -> ReplicaId {
        // Membership is validated non-empty at construction.
        self.members.iter().next().copied().unwrap_or(self.my_replica_id)
    }

    /// Strict majority of the full membership: `floor(N/2) + 1`.
    pub(crate) fn quorum(&self) -> usize {
        self.members.len() / 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<ReplicaId> {
        raw.iter().copied().map(ReplicaId::new).collect()
    }

    #[test]
    fn quorum_is_strict_majority() {
        for (n, expected) in [(1, 1), (2, 2), (3, 2), (4, 3), (5, 3)].iter() {
            let members: Vec<u64> = (1..=*n as u64).collect();
            let cluster = ClusterMembership::new(ReplicaId::new(1), &ids(&members)).unwrap();
            assert_eq!(cluster.quorum(), *expected, "cluster of {}", n);
        }
    }

    #[test]
    fn peers_exclude_me() {
        let cluster = ClusterMembership::new(ReplicaId::new(2), &ids(&[3, 1, 2])).unwrap();
        assert_eq!(cluster.peer_ids(), ids(&[1, 3]));
        assert_eq!(cluster.member_ids(), ids(&[1, 2, 3]));
        assert_eq!(cluster.lowest_member_id(), ReplicaId::new(1));
    }

    #[test]
    fn invalid_membership() {
        assert_eq!(
            ClusterMembership::new(ReplicaId::new(1), &[]).unwrap_err(),
            InvalidClusterError::Empty
        );
        assert_eq!(
            ClusterMembership::new(ReplicaId::new(1), &ids(&[1, 1])).unwrap_err(),
            InvalidClusterError::Duplicate(1)
        );
        assert_eq!(
            ClusterMembership::new(ReplicaId::new(4), &ids(&[1, 2, 3])).unwrap_err(),
            InvalidClusterError::NotAMember(4)
        );
        assert_eq!(
            ClusterMembership::new(ReplicaId::new(1), &ids(&[0, 1])).unwrap_err(),
            InvalidClusterError::ZeroId
        );
    }
}
