use crate::replica::local_state::Term;
use crate::replica::peers::ReplicaId;
use crate::replica::replica_api::Role;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::VecDeque;

/// Something that happened on this node. Audit trail only, never read back by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeEvent {
    pub timestamp: DateTime<Utc>,
    pub node_id: ReplicaId,
    pub term: Term,
    pub kind: EventKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    NodeStarted,
    NodeStopped {
        old_role: Role,
    },
    StateChange {
        old_role: Role,
        new_role: Role,
        reason: StateChangeReason,
    },
    LogAppend {
        key: String,
        index: u64,
    },
    LogCommit {
        index: u64,
        acks: usize,
    },
    LogReplicated {
        index: u64,
        from_leader: ReplicaId,
    },
    LogCatchUp {
        entries_received: usize,
        from_leader: ReplicaId,
        new_log_length: u64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum StateChangeReason {
    ElectionTimeout,
    BecameLeader,
    /// Stepped down after hearing from (or handing off to) this leader.
    FollowLeader(ReplicaId),
    PromotedBy(Option<ReplicaId>),
    Reelected,
}

impl EventKind {
    pub fn event_type(&self) -> &'static str {
        match self {
            EventKind::NodeStarted => "node_started",
            EventKind::NodeStopped { .. } => "node_stopped",
            EventKind::StateChange { .. } => "state_change",
            EventKind::LogAppend { .. } => "log_append",
            EventKind::LogCommit { .. } => "log_commit",
            EventKind::LogReplicated { .. } => "log_replicated",
            EventKind::LogCatchUp { .. } => "log_catch_up",
        }
    }

    pub fn details(&self) -> serde_json::Value {
        match self {
            EventKind::NodeStarted => json!({}),
            EventKind::NodeStopped { old_role } => json!({ "old_state": old_role.as_str() }),
            EventKind::StateChange {
                old_role,
                new_role,
                reason,
            } => {
                let mut details = json!({
                    "old_state": old_role.as_str(),
                    "new_state": new_role.as_str(),
                });
                match reason {
                    StateChangeReason::FollowLeader(leader) => details["leader"] = json!(leader.as_u64()),
                    StateChangeReason::PromotedBy(previous) => {
                        details["promoted_by"] = json!(previous.map(|id| id.as_u64()))
                    }
                    StateChangeReason::Reelected => details["reelected"] = json!(true),
                    StateChangeReason::ElectionTimeout | StateChangeReason::BecameLeader => {}
                }
                details
            }
            EventKind::LogAppend { key, index } => json!({ "key": key, "index": index }),
            EventKind::LogCommit { index, acks } => json!({ "index": index, "acks": acks }),
            EventKind::LogReplicated { index, from_leader } => {
                json!({ "index": index, "from_leader": from_leader.as_u64() })
            }
            EventKind::LogCatchUp {
                entries_received,
                from_leader,
                new_log_length,
            } => json!({
                "entries_received": entries_received,
                "from_leader": from_leader.as_u64(),
                "new_log_length": new_log_length,
            }),
        }
    }
}

/// Fixed capacity history. The oldest event is dropped first.
pub(crate) struct EventHistory {
    capacity: usize,
    events: VecDeque<NodeEvent>,
}

impl EventHistory {
    pub(crate) fn new(capacity: usize) -> Self {
        EventHistory {
            capacity,
            events: VecDeque::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, event: NodeEvent) {
        if self.capacity == 0 {
            return;
        }
        while self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Up to `limit` most recent events, oldest first.
    pub(crate) fn recent(&self, limit: usize) -> Vec<NodeEvent> {
        let skip = self.events.len().saturating_sub(limit);
        self.events.iter().skip(skip).cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(index: u64) -> NodeEvent {
        NodeEvent {
            timestamp: Utc::now(),
            node_id: ReplicaId::new(1),
            term: Term::new(1),
            kind: EventKind::LogAppend {
                key: format!("k{}", index),
                index,
            },
        }
    }

    fn indices(events: &[NodeEvent]) -> Vec<u64> {
        events
            .iter()
            .map(|e| match &e.kind {
                EventKind::LogAppend { index, .. } => *index,
                other => panic!("Unexpected event {:?}", other),
            })
            .collect()
    }

    #[test]
    fn never_exceeds_capacity_and_drops_oldest_first() {
        let mut history = EventHistory::new(3);
        for i in 0..5 {
            history.push(event(i));
            assert!(history.len() <= 3);
        }

        assert_eq!(indices(&history.recent(10)), vec![2, 3, 4]);
    }

    #[test]
    fn recent_returns_tail_in_order() {
        let mut history = EventHistory::new(100);
        for i in 0..10 {
            history.push(event(i));
        }

        assert_eq!(indices(&history.recent(3)), vec![7, 8, 9]);
        assert!(history.recent(0).is_empty());
    }

    #[test]
    fn details_use_wire_field_names() {
        let kind = EventKind::StateChange {
            old_role: Role::Leader,
            new_role: Role::Follower,
            reason: StateChangeReason::FollowLeader(ReplicaId::new(3)),
        };
        assert_eq!(kind.event_type(), "state_change");
        assert_eq!(
            kind.details(),
            json!({"old_state": "leader", "new_state": "follower", "leader": 3})
        );

        let kind = EventKind::LogCatchUp {
            entries_received: 2,
            from_leader: ReplicaId::new(1),
            new_log_length: 5,
        };
        assert_eq!(kind.details()["new_log_length"], json!(5));
    }
}
