use crate::replica::local_state::Term;
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// One replicated operation. `index` is the entry's position in the local log of the node that
/// holds it.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub index: u64,
    pub term: Term,
    pub key: String,
    pub value: Bytes,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of offering an entry at a specific position.
#[derive(Debug, PartialEq)]
pub(crate) enum PositionalAppend {
    Appended,
    AlreadyPresent,
    /// Entry index is past the end of the log. Accepting it would leave a gap.
    Gap { log_length: u64 },
}

/// LocalLog is an append-only, in-memory log whose indices are always exactly `0..len`. The
/// commit index never decreases and is always less than the log length.
#[derive(Default)]
pub(crate) struct LocalLog {
    entries: Vec<LogEntry>,
    commit_index: Option<u64>,
}

impl LocalLog {
    pub(crate) fn new() -> Self {
        LocalLog::default()
    }

    pub(crate) fn len(&self) -> u64 {
        self.entries.len() as u64
    }

    pub(crate) fn commit_index(&self) -> Option<u64> {
        self.commit_index
    }

    #[cfg(test)]
    pub(crate) fn get(&self, index: u64) -> Option<&LogEntry> {
        self.entries.get(index as usize)
    }

    /// Leader path: build and append a new entry at the tail.
    pub(crate) fn append_new(&mut self, term: Term, key: String, value: Bytes, timestamp: DateTime<Utc>) -> LogEntry {
        let entry = LogEntry {
            index: self.len(),
            term,
            key,
            value,
            timestamp,
        };
        self.entries.push(entry.clone());

        entry
    }

    /// Follower path: append an entry produced by another node's log, positionally.
    pub(crate) fn append_at_position(&mut self, entry: LogEntry) -> PositionalAppend {
        let log_length = self.len();
        if entry.index < log_length {
            PositionalAppend::AlreadyPresent
        } else if entry.index > log_length {
            PositionalAppend::Gap { log_length }
        } else {
            self.entries.push(entry);
            PositionalAppend::Appended
        }
    }

    /// Append every entry whose index is at or past the current length, preserving order. Stops at
    /// the first gap. Returns the number of entries appended.
    pub(crate) fn extend_from_position(&mut self, entries: Vec<LogEntry>) -> usize {
        let mut appended = 0;
        for entry in entries {
            match self.append_at_position(entry) {
                PositionalAppend::Appended => appended += 1,
                PositionalAppend::AlreadyPresent => {}
                PositionalAppend::Gap { .. } => break,
            }
        }

        appended
    }

    /// Copy of every entry from `start` to the tail.
    pub(crate) fn entries_from(&self, start: u64) -> Vec<LogEntry> {
        let start = (start as usize).min(self.entries.len());
        self.entries[start..].to_vec()
    }

    pub(crate) fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub(crate) fn latest_for_key(&self, key: &str) -> Option<&LogEntry> {
        self.entries.iter().rev().find(|e| e.key == key)
    }

    /// Ratchet commit index forward to `index`. Returns true if it moved.
    pub(crate) fn commit_to(&mut self, index: u64) -> bool {
        if index >= self.len() {
            return false;
        }
        match self.commit_index {
            Some(current) if current >= index => false,
            _ => {
                self.commit_index = Some(index);
                true
            }
        }
    }

    /// Follower path: `commit_index = min(leader_commit, len - 1)` if that raises it.
    pub(crate) fn commit_to_leader(&mut self, leader_commit: Option<u64>) -> bool {
        match (leader_commit, self.len()) {
            (Some(leader_commit), len) if len > 0 => self.commit_to(leader_commit.min(len - 1)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: u64, key: &str) -> LogEntry {
        LogEntry {
            index,
            term: Term::new(1),
            key: key.to_string(),
            value: Bytes::from_static(b"v"),
            timestamp: Utc::now(),
        }
    }

    fn assert_contiguous(log: &LocalLog) {
        for (position, e) in log.entries().iter().enumerate() {
            assert_eq!(e.index, position as u64);
        }
        if let Some(commit) = log.commit_index() {
            assert!(commit < log.len());
        }
    }

    #[test]
    fn append_new_assigns_next_index() {
        let mut log = LocalLog::new();
        let a = log.append_new(Term::new(1), "a".into(), Bytes::new(), Utc::now());
        let b = log.append_new(Term::new(2), "b".into(), Bytes::new(), Utc::now());

        assert_eq!(a.index, 0);
        assert_eq!(b.index, 1);
        assert_eq!(log.len(), 2);
        assert_contiguous(&log);
    }

    #[test]
    fn positional_append() {
        let mut log = LocalLog::new();
        assert_eq!(log.append_at_position(entry(0, "a")), PositionalAppend::Appended);
        assert_eq!(log.append_at_position(entry(0, "a")), PositionalAppend::AlreadyPresent);
        assert_eq!(
            log.append_at_position(entry(5, "z")),
            PositionalAppend::Gap { log_length: 1 }
        );
        assert_eq!(log.len(), 1);
        assert_contiguous(&log);
    }

    #[test]
    fn extend_skips_held_entries_and_stops_at_gap() {
        let mut log = LocalLog::new();
        log.append_at_position(entry(0, "a"));

        let appended = log.extend_from_position(vec![entry(0, "a"), entry(1, "b"), entry(2, "c"), entry(4, "e")]);

        assert_eq!(appended, 2);
        assert_eq!(log.len(), 3);
        assert_eq!(log.get(2).map(|e| e.key.as_str()), Some("c"));
        assert_contiguous(&log);
    }

    #[test]
    fn commit_index_ratchets() {
        let mut log = LocalLog::new();
        assert!(!log.commit_to(0));
        assert_eq!(log.commit_index(), None);

        log.extend_from_position(vec![entry(0, "a"), entry(1, "b"), entry(2, "c")]);
        assert!(log.commit_to(1));
        assert!(!log.commit_to(0));
        assert!(!log.commit_to(3));
        assert_eq!(log.commit_index(), Some(1));
        assert_contiguous(&log);
    }

    #[test]
    fn leader_commit_is_capped_by_log_length() {
        let mut log = LocalLog::new();
        assert!(!log.commit_to_leader(Some(4)));

        log.extend_from_position(vec![entry(0, "a"), entry(1, "b")]);
        assert!(!log.commit_to_leader(None));
        assert!(log.commit_to_leader(Some(4)));
        assert_eq!(log.commit_index(), Some(1));
        assert_contiguous(&log);
    }

    #[test]
    fn latest_for_key_prefers_newest() {
        let mut log = LocalLog::new();
        log.append_new(Term::new(1), "task:1".into(), Bytes::from_static(b"old"), Utc::now());
        log.append_new(Term::new(1), "task:2".into(), Bytes::from_static(b"other"), Utc::now());
        log.append_new(Term::new(1), "task:1".into(), Bytes::from_static(b"new"), Utc::now());

        assert_eq!(
            log.latest_for_key("task:1").map(|e| e.value.clone()),
            Some(Bytes::from_static(b"new"))
        );
        assert!(log.latest_for_key("task:3").is_none());
        assert_eq!(log.entries_from(1).len(), 2);
        assert!(log.entries_from(9).is_empty());
    }
}
