//! Conversions between wire messages and replica types, shared by the gRPC client transport and
//! the gRPC server.
use crate::grpc::{
    ProtoAppendEntriesReq, ProtoAppendEntriesResult, ProtoCatchUpReq, ProtoCatchUpResult, ProtoCommitReq,
    ProtoCommitResult, ProtoHeartbeatReq, ProtoHeartbeatResult, ProtoLogEntry, ProtoNodeStatus, ProtoPromoteReq,
    ProtoPromoteResult,
};
use crate::replica::{
    AppendEntriesReply, AppendEntriesRequest, CatchUpReply, CatchUpRequest, CommitReply, CommitRequest,
    HeartbeatReply, HeartbeatRequest, LogEntry, NodeStatus, PromoteReply, PromoteRequest, ReplicaId, Term,
};
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub(crate) struct ConversionError(String);

/// Log positions that may be absent go on the wire as `-1`.
pub(crate) fn optional_index_to_proto(index: Option<u64>) -> i64 {
    match index {
        Some(index) => index as i64,
        None => -1,
    }
}

pub(crate) fn commit_index_from_proto(commit_index: i64) -> Option<u64> {
    if commit_index < 0 {
        None
    } else {
        Some(commit_index as u64)
    }
}

pub(crate) fn optional_id_to_proto(id: Option<ReplicaId>) -> u64 {
    id.map(|id| id.as_u64()).unwrap_or(0)
}

pub(crate) fn optional_id_from_proto(id: u64) -> Option<ReplicaId> {
    match id {
        0 => None,
        id => Some(ReplicaId::new(id)),
    }
}

fn required_id_from_proto(field: &str, id: u64) -> Result<ReplicaId, ConversionError> {
    optional_id_from_proto(id).ok_or_else(|| ConversionError(format!("{} must be non-zero", field)))
}

pub(crate) fn datetime_from_millis(millis: i64) -> Result<DateTime<Utc>, ConversionError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ConversionError(format!("Timestamp {} out of range", millis)))
}

pub(crate) fn log_entry_to_proto(entry: &LogEntry) -> ProtoLogEntry {
    ProtoLogEntry {
        index: entry.index,
        term: entry.term.as_u64(),
        key: entry.key.clone(),
        value: entry.value.to_vec(),
        timestamp_millis: entry.timestamp.timestamp_millis(),
    }
}

pub(crate) fn log_entry_from_proto(entry: ProtoLogEntry) -> Result<LogEntry, ConversionError> {
    Ok(LogEntry {
        index: entry.index,
        term: Term::new(entry.term),
        key: entry.key,
        value: Bytes::from(entry.value),
        timestamp: datetime_from_millis(entry.timestamp_millis)?,
    })
}

pub(crate) fn node_status_to_proto(status: &NodeStatus) -> ProtoNodeStatus {
    ProtoNodeStatus {
        node_id: status.node_id.as_u64(),
        role: status.role.as_str().to_string(),
        term: status.term.as_u64(),
        voted_for: optional_id_to_proto(status.voted_for),
        log_length: status.log_length,
        commit_index: optional_index_to_proto(status.commit_index),
        last_heartbeat_millis: status.last_heartbeat.timestamp_millis(),
        leader_id: optional_id_to_proto(status.leader_id),
        running: status.running,
    }
}

// ------- AppendEntries -------

pub(crate) fn append_entries_req_to_proto(request: &AppendEntriesRequest) -> ProtoAppendEntriesReq {
    ProtoAppendEntriesReq {
        leader_id: request.leader_id.as_u64(),
        term: request.term.as_u64(),
        entry: Some(log_entry_to_proto(&request.entry)),
    }
}

pub(crate) fn append_entries_req_from_proto(
    request: ProtoAppendEntriesReq,
) -> Result<AppendEntriesRequest, ConversionError> {
    let entry = request
        .entry
        .ok_or_else(|| ConversionError("AppendEntries is missing its entry".into()))?;

    Ok(AppendEntriesRequest {
        leader_id: required_id_from_proto("leader_id", request.leader_id)?,
        term: Term::new(request.term),
        entry: log_entry_from_proto(entry)?,
    })
}

pub(crate) fn append_entries_reply_to_proto(reply: &AppendEntriesReply) -> ProtoAppendEntriesResult {
    ProtoAppendEntriesResult {
        success: reply.success,
        node_id: reply.node_id.as_u64(),
        term: reply.term.as_u64(),
    }
}

pub(crate) fn append_entries_reply_from_proto(
    reply: ProtoAppendEntriesResult,
) -> Result<AppendEntriesReply, ConversionError> {
    Ok(AppendEntriesReply {
        success: reply.success,
        node_id: required_id_from_proto("node_id", reply.node_id)?,
        term: Term::new(reply.term),
    })
}

// ------- Heartbeat -------

pub(crate) fn heartbeat_req_to_proto(request: &HeartbeatRequest) -> ProtoHeartbeatReq {
    ProtoHeartbeatReq {
        leader_id: request.leader_id.as_u64(),
        term: request.term.as_u64(),
        leader_commit: optional_index_to_proto(request.leader_commit),
        leader_log_length: request.leader_log_length,
    }
}

pub(crate) fn heartbeat_req_from_proto(request: ProtoHeartbeatReq) -> Result<HeartbeatRequest, ConversionError> {
    Ok(HeartbeatRequest {
        leader_id: required_id_from_proto("leader_id", request.leader_id)?,
        term: Term::new(request.term),
        leader_commit: commit_index_from_proto(request.leader_commit),
        leader_log_length: request.leader_log_length,
    })
}

pub(crate) fn heartbeat_reply_to_proto(reply: &HeartbeatReply) -> ProtoHeartbeatResult {
    ProtoHeartbeatResult {
        success: reply.success,
        node_id: reply.node_id.as_u64(),
        log_length: reply.log_length,
    }
}

pub(crate) fn heartbeat_reply_from_proto(reply: ProtoHeartbeatResult) -> Result<HeartbeatReply, ConversionError> {
    Ok(HeartbeatReply {
        success: reply.success,
        node_id: required_id_from_proto("node_id", reply.node_id)?,
        log_length: reply.log_length,
    })
}

// ------- Commit -------

pub(crate) fn commit_req_to_proto(request: &CommitRequest) -> ProtoCommitReq {
    ProtoCommitReq {
        commit_index: request.commit_index as i64,
    }
}

pub(crate) fn commit_req_from_proto(request: ProtoCommitReq) -> Result<CommitRequest, ConversionError> {
    let commit_index = commit_index_from_proto(request.commit_index)
        .ok_or_else(|| ConversionError(format!("Commit index {} is negative", request.commit_index)))?;

    Ok(CommitRequest { commit_index })
}

pub(crate) fn commit_reply_to_proto(reply: &CommitReply) -> ProtoCommitResult {
    ProtoCommitResult {
        success: reply.success,
    }
}

pub(crate) fn commit_reply_from_proto(reply: ProtoCommitResult) -> CommitReply {
    CommitReply {
        success: reply.success,
    }
}

// ------- CatchUp -------

pub(crate) fn catch_up_req_to_proto(request: &CatchUpRequest) -> ProtoCatchUpReq {
    ProtoCatchUpReq {
        leader_id: request.leader_id.as_u64(),
        term: request.term.as_u64(),
        entries: request.entries.iter().map(log_entry_to_proto).collect(),
        leader_commit: optional_index_to_proto(request.leader_commit),
    }
}

pub(crate) fn catch_up_req_from_proto(request: ProtoCatchUpReq) -> Result<CatchUpRequest, ConversionError> {
    let mut entries = Vec::with_capacity(request.entries.len());
    for proto_entry in request.entries {
        entries.push(log_entry_from_proto(proto_entry)?);
    }

    Ok(CatchUpRequest {
        leader_id: required_id_from_proto("leader_id", request.leader_id)?,
        term: Term::new(request.term),
        entries,
        leader_commit: commit_index_from_proto(request.leader_commit),
    })
}

pub(crate) fn catch_up_reply_to_proto(reply: &CatchUpReply) -> ProtoCatchUpResult {
    ProtoCatchUpResult {
        success: reply.success,
        node_id: reply.node_id.as_u64(),
        log_length: reply.log_length,
    }
}

pub(crate) fn catch_up_reply_from_proto(reply: ProtoCatchUpResult) -> Result<CatchUpReply, ConversionError> {
    Ok(CatchUpReply {
        success: reply.success,
        node_id: required_id_from_proto("node_id", reply.node_id)?,
        log_length: reply.log_length,
    })
}

// ------- Promote -------

pub(crate) fn promote_req_to_proto(request: &PromoteRequest) -> ProtoPromoteReq {
    ProtoPromoteReq {
        term: request.term.as_u64(),
        previous_leader: optional_id_to_proto(request.previous_leader),
    }
}

pub(crate) fn promote_req_from_proto(request: ProtoPromoteReq) -> PromoteRequest {
    PromoteRequest {
        term: Term::new(request.term),
        previous_leader: optional_id_from_proto(request.previous_leader),
    }
}

pub(crate) fn promote_reply_to_proto(reply: &PromoteReply) -> ProtoPromoteResult {
    ProtoPromoteResult {
        success: reply.success,
        node_id: reply.node_id.as_u64(),
    }
}

pub(crate) fn promote_reply_from_proto(reply: ProtoPromoteResult) -> Result<PromoteReply, ConversionError> {
    Ok(PromoteReply {
        success: reply.success,
        node_id: required_id_from_proto("node_id", reply.node_id)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_index_sentinel() {
        assert_eq!(optional_index_to_proto(None), -1);
        assert_eq!(optional_index_to_proto(Some(4)), 4);
        assert_eq!(commit_index_from_proto(-1), None);
        assert_eq!(commit_index_from_proto(0), Some(0));
    }

    #[test]
    fn append_entries_without_entry_is_rejected() {
        let request = ProtoAppendEntriesReq {
            leader_id: 1,
            term: 2,
            entry: None,
        };
        assert!(append_entries_req_from_proto(request).is_err());
    }

    #[test]
    fn zero_leader_id_is_rejected() {
        let request = ProtoHeartbeatReq {
            leader_id: 0,
            term: 2,
            leader_commit: -1,
            leader_log_length: 0,
        };
        assert!(heartbeat_req_from_proto(request).is_err());
    }

    #[test]
    fn catch_up_request_keeps_entry_order_and_millis() {
        let timestamp = Utc.timestamp_millis_opt(1_600_000_000_123).single().unwrap();
        let entries: Vec<LogEntry> = (3..6)
            .map(|index| LogEntry {
                index,
                term: Term::new(2),
                key: format!("task:{}", index),
                value: Bytes::from_static(b"{}"),
                timestamp,
            })
            .collect();
        let request = CatchUpRequest {
            leader_id: ReplicaId::new(1),
            term: Term::new(2),
            entries: entries.clone(),
            leader_commit: None,
        };

        let decoded = catch_up_req_from_proto(catch_up_req_to_proto(&request)).unwrap();

        assert_eq!(decoded, request);
        assert_eq!(decoded.entries[0].timestamp, timestamp);
    }
}
