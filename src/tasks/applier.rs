use crate::actor::WeakActorClient;
use crate::api::{RaftNode, StatusListener};
use crate::replica::LogEntry;
use crate::tasks::model::Task;
use crate::tasks::service::TaskError;
use crate::tasks::store::TaskStore;
use std::sync::Arc;
use tokio::sync::Mutex;

const TASK_KEY_PREFIX: &str = "task:";
const DELETED_SUFFIX: &str = ":deleted";

/// Log keys that carry task writes.
#[derive(Debug, PartialEq)]
pub(crate) enum TaskLogKey<'a> {
    Upsert(&'a str),
    Deleted(&'a str),
}

impl<'a> TaskLogKey<'a> {
    pub(crate) fn parse(key: &'a str) -> Option<Self> {
        let rest = key.strip_prefix(TASK_KEY_PREFIX)?;
        let parsed = match rest.strip_suffix(DELETED_SUFFIX) {
            Some(id) => TaskLogKey::Deleted(id),
            None => TaskLogKey::Upsert(rest),
        };
        match parsed {
            TaskLogKey::Upsert(id) | TaskLogKey::Deleted(id) if id.is_empty() => None,
            parsed => Some(parsed),
        }
    }
}

pub(crate) fn upsert_key(id: &str) -> String {
    format!("{}{}", TASK_KEY_PREFIX, id)
}

pub(crate) fn deleted_key(id: &str) -> String {
    format!("{}{}{}", TASK_KEY_PREFIX, id, DELETED_SUFFIX)
}

/// CommittedTaskApplier writes committed task entries into the local store, in log order.
///
/// It is the only writer of the `tasks` table, on leaders and followers alike, so every node's
/// table is the same function of its committed log prefix.
pub(crate) struct CommittedTaskApplier {
    logger: slog::Logger,
    store: Arc<TaskStore>,
    last_applied: Mutex<Option<u64>>,
}

impl CommittedTaskApplier {
    pub(crate) fn new(logger: slog::Logger, store: Arc<TaskStore>) -> Self {
        CommittedTaskApplier {
            logger,
            store,
            last_applied: Mutex::new(None),
        }
    }

    /// Apply every entry up to and including `commit_index` not applied yet. Returns how many
    /// entries were applied.
    pub(crate) async fn apply_through(&self, node: &RaftNode, commit_index: u64) -> Result<usize, TaskError> {
        let mut last_applied = self.last_applied.lock().await;
        let start = last_applied.map_or(0, |index| index + 1);
        if start > commit_index {
            return Ok(0);
        }

        let log = node.log().await?;
        let mut applied = 0;
        for entry in log.iter().filter(|e| e.index >= start && e.index <= commit_index) {
            self.apply_entry(entry)?;
            *last_applied = Some(entry.index);
            applied += 1;
        }

        Ok(applied)
    }

    fn apply_entry(&self, entry: &LogEntry) -> Result<(), TaskError> {
        match TaskLogKey::parse(&entry.key) {
            Some(TaskLogKey::Upsert(id)) => {
                let mut task: Task = match serde_json::from_slice(&entry.value) {
                    Ok(task) => task,
                    Err(e) => {
                        // Unreadable entries never become readable. Skip instead of stalling.
                        slog::warn!(self.logger, "Skipping unreadable task entry {}: {}", entry.index, e);
                        return Ok(());
                    }
                };
                if task.id != id {
                    slog::warn!(self.logger, "Entry {} for task {} carries id {}", entry.index, id, task.id);
                    return Ok(());
                }
                if task.log_index.is_none() {
                    task.log_index = Some(entry.index);
                }
                self.store.upsert_task(&task)?;
            }
            Some(TaskLogKey::Deleted(id)) => {
                self.store.delete_task(id)?;
            }
            None => {}
        }

        slog::debug!(self.logger, "Applied entry {} ({})", entry.index, entry.key);
        Ok(())
    }
}

/// Apply commits as the node reports them. Ends when the node shuts down.
pub(crate) fn spawn_commit_follower(
    applier: Arc<CommittedTaskApplier>,
    mut listener: StatusListener,
    actor_client: WeakActorClient,
) {
    tokio::spawn(async move {
        while let Some(status) = listener.next_status().await {
            let commit_index = match status.commit_index {
                Some(index) => index,
                None => continue,
            };
            let node = match actor_client.upgrade() {
                Some(client) => RaftNode::new(client),
                None => break,
            };
            if let Err(e) = applier.apply_through(&node, commit_index).await {
                slog::warn!(applier.logger, "Failed to apply committed tasks through {}: {}", commit_index, e);
            }
        }

        slog::debug!(applier.logger, "Commit follower exited");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_keys() {
        assert_eq!(TaskLogKey::parse("task:abc"), Some(TaskLogKey::Upsert("abc")));
        assert_eq!(TaskLogKey::parse("task:abc:deleted"), Some(TaskLogKey::Deleted("abc")));
        assert_eq!(TaskLogKey::parse(&upsert_key("x1")), Some(TaskLogKey::Upsert("x1")));
        assert_eq!(TaskLogKey::parse(&deleted_key("x1")), Some(TaskLogKey::Deleted("x1")));
        assert_eq!(TaskLogKey::parse("task:"), None);
        assert_eq!(TaskLogKey::parse("task::deleted"), None);
        assert_eq!(TaskLogKey::parse("greeting"), None);
    }
}
