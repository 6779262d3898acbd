use crate::api::RaftNode;
use crate::replica::{ReplicaExited, ReplicaId, ReplicateError, ReplicateOutput};
use crate::tasks::applier::{self, CommittedTaskApplier};
use crate::tasks::model::{AuditOperation, AuditRecord, NewTask, Task, TaskUpdate};
use crate::tasks::store::{TaskStore, TaskStoreError};
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Not the leader. Known leader: {leader_hint:?}")]
    NotLeader { leader_hint: Option<ReplicaId> },
    #[error("Task {0} not found")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Replication failed")]
    Replication(#[source] ReplicateError),
    #[error("Task store failure")]
    Store(#[from] TaskStoreError),
    #[error("Failed to encode task")]
    Encoding(#[from] serde_json::Error),
    #[error("Replica task has exited")]
    ReplicaExited,
}

impl From<ReplicaExited> for TaskError {
    fn from(_: ReplicaExited) -> Self {
        TaskError::ReplicaExited
    }
}

impl From<ReplicateError> for TaskError {
    fn from(e: ReplicateError) -> Self {
        match e {
            ReplicateError::NotLeader { leader_hint } => TaskError::NotLeader { leader_hint },
            ReplicateError::ReplicaExited => TaskError::ReplicaExited,
            e @ ReplicateError::QuorumNotReached { .. } => TaskError::Replication(e),
        }
    }
}

/// TaskService runs task writes through the replicated log.
///
/// Writes are leader-only. The local store only changes once a write is committed, on this node
/// and on every follower, so tasks survive a change of leader. Reads are served from the local
/// store on any node.
pub struct TaskService {
    logger: slog::Logger,
    node: RaftNode,
    store: Arc<TaskStore>,
    applier: Arc<CommittedTaskApplier>,
}

impl TaskService {
    /// Also starts applying the node's committed task entries to `store`.
    pub async fn new(logger: slog::Logger, node: RaftNode, store: Arc<TaskStore>) -> Result<Self, TaskError> {
        let applier = Arc::new(CommittedTaskApplier::new(
            logger.new(slog::o!("Component" => "task-applier")),
            store.clone(),
        ));
        let listener = node.status_listener().await?;
        applier::spawn_commit_follower(applier.clone(), listener, node.actor_client().weak());

        Ok(TaskService {
            logger,
            node,
            store,
            applier,
        })
    }

    pub async fn create_task(&self, input: NewTask) -> Result<Task, TaskError> {
        if input.title.trim().is_empty() {
            return Err(TaskError::InvalidInput("Title is required".to_string()));
        }
        let node_id = self.ensure_leader().await?;

        let now = Utc::now();
        let mut task = Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            created_by_node: node_id.as_u64(),
            log_index: None,
        };
        let data = serde_json::to_value(&task)?;

        let output = self.replicate(applier::upsert_key(&task.id), &data).await?;
        task.log_index = Some(output.index);
        self.audit(&output, AuditOperation::Create, &task.id, Some(&data))?;

        slog::info!(self.logger, "Created task {} at log index {}", task.id, output.index);
        Ok(task)
    }

    pub async fn update_task(&self, id: &str, update: TaskUpdate) -> Result<Task, TaskError> {
        self.ensure_leader().await?;
        let mut task = self.get_task(id)?;

        update.apply_to(&mut task);
        task.updated_at = Utc::now();

        let output = self.replicate(applier::upsert_key(id), &serde_json::to_value(&task)?).await?;
        self.audit(&output, AuditOperation::Update, id, Some(&serde_json::to_value(&update)?))?;

        Ok(task)
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), TaskError> {
        self.ensure_leader().await?;
        self.get_task(id)?;

        let output = self
            .replicate(applier::deleted_key(id), &serde_json::Value::Bool(true))
            .await?;
        self.audit(&output, AuditOperation::Delete, id, None)?;

        Ok(())
    }

    pub fn get_task(&self, id: &str) -> Result<Task, TaskError> {
        self.store
            .get_task(id)?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.list_tasks()?)
    }

    pub fn audit_log(&self, limit: usize) -> Result<Vec<AuditRecord>, TaskError> {
        Ok(self.store.recent_audit(limit)?)
    }

    async fn ensure_leader(&self) -> Result<ReplicaId, TaskError> {
        let leader = self.node.leader().await?;
        if leader.is_leader {
            Ok(leader.this_node_id)
        } else {
            Err(TaskError::NotLeader {
                leader_hint: leader.leader_id.filter(|id| *id != leader.this_node_id),
            })
        }
    }

    /// Replicate, then apply the committed prefix so the write is visible locally on return.
    async fn replicate(&self, key: String, data: &serde_json::Value) -> Result<ReplicateOutput, TaskError> {
        let value = Bytes::from(serde_json::to_vec(data)?);
        let output = self.node.replicate(key.clone(), value).await.map_err(|e| {
            slog::warn!(self.logger, "Replication of {} failed: {}", key, e);
            TaskError::from(e)
        })?;
        self.applier.apply_through(&self.node, output.index).await?;

        Ok(output)
    }

    fn audit(
        &self,
        output: &ReplicateOutput,
        operation: AuditOperation,
        task_id: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<(), TaskError> {
        self.store
            .append_audit(output.term.as_u64(), output.index, operation, task_id, data, true)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{create_raft_node, RaftNodeConfig, RaftOptions};
    use crate::replica::{AppendEntriesRequest, CommitRequest, LogEntry, PromoteRequest, Term};
    use crate::tasks::{TaskPriority, TaskStatus};
    use crate::transport::StubTransport;
    use std::time::Duration;

    async fn service(leader: bool, transport: Arc<StubTransport>) -> (TaskService, RaftNode) {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let node = create_raft_node(
            RaftNodeConfig {
                my_replica_id: 1,
                cluster_member_ids: vec![1, 2, 3],
                info_logger: logger.clone(),
                options: RaftOptions {
                    // Keep the node from taking leadership on its own during a test.
                    startup_delay: Some(Duration::from_secs(60)),
                    leadership_handoff_probability: Some(0.0),
                    ..RaftOptions::default()
                },
            },
            transport,
        )
        .await
        .unwrap();

        if leader {
            let reply = node
                .receive_promote(PromoteRequest {
                    term: Term::new(1),
                    previous_leader: None,
                })
                .await
                .unwrap();
            assert!(reply.success);
        }

        let store = Arc::new(TaskStore::open(":memory:").unwrap());
        let tasks = TaskService::new(logger, node.clone(), store).await.unwrap();
        (tasks, node)
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            priority: Some(TaskPriority::High),
            ..NewTask::default()
        }
    }

    #[tokio::test]
    async fn create_replicates_task_and_records_audit() {
        let (tasks, node) = service(true, StubTransport::new()).await;

        let task = tasks.create_task(new_task("write docs")).await.unwrap();

        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.created_by_node, 1);
        assert_eq!(task.log_index, Some(0));
        assert_eq!(tasks.get_task(&task.id).unwrap().title, "write docs");

        let replicated = node.replicated_value(format!("task:{}", task.id)).await.unwrap().unwrap();
        let replicated: serde_json::Value = serde_json::from_slice(&replicated).unwrap();
        assert_eq!(replicated["title"], "write docs");
        assert_eq!(replicated["priority"], "high");

        let audit = tasks.audit_log(10).unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].operation, AuditOperation::Create);
        assert_eq!(audit[0].log_index, 0);
        assert_eq!(audit[0].term, 1);
    }

    #[tokio::test]
    async fn title_is_required() {
        let (tasks, _node) = service(true, StubTransport::new()).await;

        match tasks.create_task(new_task("  ")).await {
            Err(TaskError::InvalidInput(_)) => {}
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn writes_on_follower_are_rejected() {
        let (tasks, node) = service(false, StubTransport::new()).await;

        match tasks.create_task(new_task("nope")).await {
            Err(TaskError::NotLeader { leader_hint }) => assert_eq!(leader_hint, None),
            other => panic!("Unexpected result {:?}", other),
        }
        assert!(tasks.list_tasks().unwrap().is_empty());
        assert_eq!(node.status().await.unwrap().log_length, 0);
    }

    #[tokio::test]
    async fn update_and_delete_go_through_the_log() {
        let (tasks, node) = service(true, StubTransport::new()).await;
        let task = tasks.create_task(new_task("ship it")).await.unwrap();

        let updated = tasks
            .update_task(
                &task.id,
                TaskUpdate {
                    status: Some(TaskStatus::InProgress),
                    ..TaskUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.title, "ship it");

        tasks.delete_task(&task.id).await.unwrap();
        assert!(matches!(tasks.get_task(&task.id), Err(TaskError::NotFound(_))));

        let deleted = node
            .replicated_value(format!("task:{}:deleted", task.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&deleted[..], b"true");
        assert_eq!(node.status().await.unwrap().commit_index, Some(2));

        let operations: Vec<AuditOperation> = tasks.audit_log(10).unwrap().into_iter().map(|r| r.operation).collect();
        assert_eq!(
            operations,
            vec![AuditOperation::Delete, AuditOperation::Update, AuditOperation::Create]
        );
    }

    #[tokio::test]
    async fn missing_task_is_not_replicated() {
        let (tasks, node) = service(true, StubTransport::new()).await;

        assert!(matches!(
            tasks.delete_task("ghost").await,
            Err(TaskError::NotFound(_))
        ));
        assert_eq!(node.status().await.unwrap().log_length, 0);
    }

    #[tokio::test]
    async fn failed_replication_leaves_store_untouched() {
        let transport = StubTransport::new();
        transport.set_unreachable(ReplicaId::new(2));
        transport.set_unreachable(ReplicaId::new(3));
        let (tasks, _node) = service(true, transport).await;

        match tasks.create_task(new_task("lost")).await {
            Err(TaskError::Replication(ReplicateError::QuorumNotReached { acks, .. })) => assert_eq!(acks, 1),
            other => panic!("Unexpected result {:?}", other),
        }
        assert!(tasks.list_tasks().unwrap().is_empty());
        assert!(tasks.audit_log(10).unwrap().is_empty());
    }

    async fn wait_for_task(tasks: &TaskService, id: &str) -> Task {
        for _ in 0..200 {
            if let Ok(task) = tasks.get_task(id) {
                return task;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("Task {} never applied", id);
    }

    fn entry_from_leader(index: u64, key: String, value: &serde_json::Value) -> AppendEntriesRequest {
        AppendEntriesRequest {
            leader_id: ReplicaId::new(2),
            term: Term::new(1),
            entry: LogEntry {
                index,
                term: Term::new(1),
                key,
                value: Bytes::from(serde_json::to_vec(value).unwrap()),
                timestamp: Utc::now(),
            },
        }
    }

    #[tokio::test]
    async fn follower_applies_committed_task_entries() {
        let (tasks, node) = service(false, StubTransport::new()).await;
        let now = Utc::now();
        let task = Task {
            id: "t-1".to_string(),
            title: "from the leader".to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Low,
            created_at: now,
            updated_at: now,
            created_by_node: 2,
            log_index: None,
        };

        let reply = node
            .receive_append_entries(entry_from_leader(0, "task:t-1".into(), &serde_json::to_value(&task).unwrap()))
            .await
            .unwrap();
        assert!(reply.success);
        // Appended but not committed yet.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(tasks.list_tasks().unwrap().is_empty());

        node.receive_commit(CommitRequest { commit_index: 0 }).await.unwrap();
        let applied = wait_for_task(&tasks, "t-1").await;
        assert_eq!(applied.title, "from the leader");
        assert_eq!(applied.log_index, Some(0));

        node.receive_append_entries(entry_from_leader(1, "task:t-1:deleted".into(), &serde_json::Value::Bool(true)))
            .await
            .unwrap();
        node.receive_commit(CommitRequest { commit_index: 1 }).await.unwrap();
        for _ in 0..200 {
            if tasks.list_tasks().unwrap().is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("Delete never applied");
    }

    #[tokio::test]
    async fn unreadable_task_entry_does_not_block_later_ones() {
        let (tasks, node) = service(false, StubTransport::new()).await;
        let mut bad = entry_from_leader(0, "task:broken".into(), &serde_json::Value::Null);
        bad.entry.value = Bytes::from_static(b"not json");
        node.receive_append_entries(bad).await.unwrap();

        let now = Utc::now();
        let good = Task {
            id: "t-2".to_string(),
            title: "still applied".to_string(),
            description: None,
            status: TaskStatus::Completed,
            priority: TaskPriority::Medium,
            created_at: now,
            updated_at: now,
            created_by_node: 2,
            log_index: None,
        };
        node.receive_append_entries(entry_from_leader(1, "task:t-2".into(), &serde_json::to_value(&good).unwrap()))
            .await
            .unwrap();
        node.receive_commit(CommitRequest { commit_index: 1 }).await.unwrap();

        assert_eq!(wait_for_task(&tasks, "t-2").await.log_index, Some(1));
        assert!(matches!(tasks.get_task("broken"), Err(TaskError::NotFound(_))));
    }
}
