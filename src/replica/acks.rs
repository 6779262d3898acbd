use crate::replica::peers::ReplicaId;
use std::collections::{BTreeMap, BTreeSet};

/// Leader-side record of which members confirmed receipt of each log index.
#[derive(Default)]
pub(crate) struct ReplicationAcks {
    by_index: BTreeMap<u64, BTreeSet<ReplicaId>>,
}

impl ReplicationAcks {
    pub(crate) fn new() -> Self {
        ReplicationAcks::default()
    }

    /// Start tracking a freshly appended index. The leader always acks its own entry.
    pub(crate) fn track_new_entry(&mut self, index: u64, leader: ReplicaId) {
        self.by_index.entry(index).or_default().insert(leader);
    }

    pub(crate) fn record(&mut self, index: u64, member: ReplicaId) {
        self.by_index.entry(index).or_default().insert(member);
    }

    pub(crate) fn ack_count(&self, index: u64) -> usize {
        self.by_index.get(&index).map(|acks| acks.len()).unwrap_or(0)
    }

    /// Membership -> acknowledged, for one index.
    pub(crate) fn status(&self, index: u64, members: &[ReplicaId]) -> BTreeMap<ReplicaId, bool> {
        let acks = self.by_index.get(&index);
        members
            .iter()
            .map(|member| (*member, acks.map(|a| a.contains(member)).unwrap_or(false)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leader_is_always_in_its_own_ack_set() {
        let leader = ReplicaId::new(1);
        let members = vec![ReplicaId::new(1), ReplicaId::new(2), ReplicaId::new(3)];
        let mut acks = ReplicationAcks::new();

        acks.track_new_entry(0, leader);
        acks.record(0, ReplicaId::new(3));
        acks.record(0, ReplicaId::new(3));

        assert_eq!(acks.ack_count(0), 2);
        let status = acks.status(0, &members);
        assert_eq!(status[&ReplicaId::new(1)], true);
        assert_eq!(status[&ReplicaId::new(2)], false);
        assert_eq!(status[&ReplicaId::new(3)], true);
    }

    #[test]
    fn unknown_index_reports_no_acks() {
        let acks = ReplicationAcks::new();
        let status = acks.status(9, &[ReplicaId::new(1)]);
        assert_eq!(acks.ack_count(9), 0);
        assert_eq!(status[&ReplicaId::new(1)], false);
    }
}
