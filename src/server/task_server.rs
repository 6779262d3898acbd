use crate::grpc::grpc_tasks_server::GrpcTasks;
use crate::grpc::{
    proto_delete_task_result, proto_task_error, proto_task_result, ProtoAuditLogReply, ProtoAuditLogReq,
    ProtoAuditRecord, ProtoCreateTaskReq, ProtoDeleteTaskReq, ProtoDeleteTaskResult, ProtoDeleted, ProtoGetTaskReq,
    ProtoInvalidInput, ProtoListTasksReply, ProtoListTasksReq, ProtoNotFound, ProtoNotLeader, ProtoServerFault,
    ProtoTask, ProtoTaskError, ProtoTaskResult, ProtoUpdateTaskReq,
};
use crate::server::server::RpcServer;
use crate::tasks::{AuditRecord, NewTask, Task, TaskError, TaskUpdate};
use crate::transport::proto;
use std::str::FromStr;
use tonic::{Request, Response, Status};

const DEFAULT_AUDIT_LIMIT: usize = 50;

fn task_to_proto(task: &Task) -> ProtoTask {
    ProtoTask {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description.clone().unwrap_or_default(),
        status: task.status.as_str().to_string(),
        priority: task.priority.as_str().to_string(),
        created_at_millis: task.created_at.timestamp_millis(),
        updated_at_millis: task.updated_at.timestamp_millis(),
        created_by_node: task.created_by_node,
        log_index: proto::optional_index_to_proto(task.log_index),
    }
}

fn audit_record_to_proto(record: &AuditRecord) -> ProtoAuditRecord {
    ProtoAuditRecord {
        id: record.id,
        term: record.term,
        log_index: record.log_index,
        operation: record.operation.to_string(),
        task_id: record.task_id.clone(),
        data_json: record.data.as_ref().map(|d| d.to_string()).unwrap_or_default(),
        committed: record.committed,
        created_at_millis: record.created_at.timestamp_millis(),
    }
}

fn task_error_to_proto(error: TaskError) -> ProtoTaskError {
    let err = match error {
        TaskError::NotLeader { leader_hint } => proto_task_error::Err::NotLeader(ProtoNotLeader {
            leader_id: proto::optional_id_to_proto(leader_hint),
        }),
        TaskError::NotFound(id) => proto_task_error::Err::NotFound(ProtoNotFound { id }),
        TaskError::InvalidInput(message) => proto_task_error::Err::InvalidInput(ProtoInvalidInput { message }),
        e => proto_task_error::Err::ServerFault(ProtoServerFault {
            message: format!("{}", e),
        }),
    };

    ProtoTaskError { err: Some(err) }
}

fn task_result_to_proto(result: Result<Task, TaskError>) -> ProtoTaskResult {
    let result = match result {
        Ok(task) => proto_task_result::Result::Ok(task_to_proto(&task)),
        Err(e) => proto_task_result::Result::Err(task_error_to_proto(e)),
    };

    ProtoTaskResult { result: Some(result) }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Empty means "not provided". Anything else must name a variant.
fn parse_optional<T: FromStr>(field: &str, value: String) -> Result<Option<T>, TaskError>
where
    T::Err: std::fmt::Display,
{
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => T::from_str(&raw)
            .map(Some)
            .map_err(|e| TaskError::InvalidInput(format!("{}: {}", field, e))),
    }
}

fn new_task_from_proto(request: ProtoCreateTaskReq) -> Result<NewTask, TaskError> {
    Ok(NewTask {
        status: parse_optional("status", request.status)?,
        priority: parse_optional("priority", request.priority)?,
        title: request.title,
        description: non_empty(request.description),
    })
}

fn task_update_from_proto(request: ProtoUpdateTaskReq) -> Result<(String, TaskUpdate), TaskError> {
    let update = TaskUpdate {
        title: non_empty(request.title),
        description: non_empty(request.description),
        status: parse_optional("status", request.status)?,
        priority: parse_optional("priority", request.priority)?,
    };

    Ok((request.id, update))
}

#[async_trait::async_trait]
impl GrpcTasks for RpcServer {
    async fn create_task(&self, request: Request<ProtoCreateTaskReq>) -> Result<Response<ProtoTaskResult>, Status> {
        let result = match new_task_from_proto(request.into_inner()) {
            Ok(new_task) => self.tasks.create_task(new_task).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            slog::info!(self.logger, "CreateTask rejected: {}", e);
        }

        Ok(Response::new(task_result_to_proto(result)))
    }

    async fn update_task(&self, request: Request<ProtoUpdateTaskReq>) -> Result<Response<ProtoTaskResult>, Status> {
        let result = match task_update_from_proto(request.into_inner()) {
            Ok((id, update)) => self.tasks.update_task(&id, update).await,
            Err(e) => Err(e),
        };

        Ok(Response::new(task_result_to_proto(result)))
    }

    async fn delete_task(
        &self,
        request: Request<ProtoDeleteTaskReq>,
    ) -> Result<Response<ProtoDeleteTaskResult>, Status> {
        let id = request.into_inner().id;
        let result = match self.tasks.delete_task(&id).await {
            Ok(()) => proto_delete_task_result::Result::Ok(ProtoDeleted { id }),
            Err(e) => proto_delete_task_result::Result::Err(task_error_to_proto(e)),
        };

        Ok(Response::new(ProtoDeleteTaskResult { result: Some(result) }))
    }

    async fn get_task(&self, request: Request<ProtoGetTaskReq>) -> Result<Response<ProtoTaskResult>, Status> {
        let result = self.tasks.get_task(&request.into_inner().id);
        Ok(Response::new(task_result_to_proto(result)))
    }

    async fn list_tasks(&self, _: Request<ProtoListTasksReq>) -> Result<Response<ProtoListTasksReply>, Status> {
        let tasks = self
            .tasks
            .list_tasks()
            .map_err(|e| Status::internal(e.to_string()))?;

        Ok(Response::new(ProtoListTasksReply {
            tasks: tasks.iter().map(task_to_proto).collect(),
        }))
    }

    async fn get_audit_log(&self, request: Request<ProtoAuditLogReq>) -> Result<Response<ProtoAuditLogReply>, Status> {
        let limit = match request.into_inner().limit {
            0 => DEFAULT_AUDIT_LIMIT,
            limit => limit as usize,
        };
        let records = self
            .tasks
            .audit_log(limit)
            .map_err(|e| Status::internal(e.to_string()))?;

        Ok(Response::new(ProtoAuditLogReply {
            records: records.iter().map(audit_record_to_proto).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replica::ReplicaId;
    use crate::tasks::{TaskPriority, TaskStatus};

    #[test]
    fn empty_fields_mean_unchanged() {
        let (id, update) = task_update_from_proto(ProtoUpdateTaskReq {
            id: "t1".into(),
            title: String::new(),
            description: String::new(),
            status: "completed".into(),
            priority: String::new(),
        })
        .unwrap();

        assert_eq!(id, "t1");
        assert_eq!(
            update,
            TaskUpdate {
                status: Some(TaskStatus::Completed),
                ..TaskUpdate::default()
            }
        );
    }

    #[test]
    fn unknown_priority_is_invalid_input() {
        let result = new_task_from_proto(ProtoCreateTaskReq {
            title: "t".into(),
            description: String::new(),
            status: String::new(),
            priority: "urgent".into(),
        });

        assert!(matches!(result, Err(TaskError::InvalidInput(_))));
    }

    #[test]
    fn create_defaults_are_left_to_the_service() {
        let new_task = new_task_from_proto(ProtoCreateTaskReq {
            title: "t".into(),
            description: "d".into(),
            status: String::new(),
            priority: "low".into(),
        })
        .unwrap();

        assert_eq!(new_task.status, None);
        assert_eq!(new_task.priority, Some(TaskPriority::Low));
        assert_eq!(new_task.description.as_deref(), Some("d"));
    }

    #[test]
    fn not_leader_carries_hint() {
        let error = task_error_to_proto(TaskError::NotLeader {
            leader_hint: Some(ReplicaId::new(3)),
        });

        assert_eq!(
            error.err,
            Some(proto_task_error::Err::NotLeader(ProtoNotLeader { leader_id: 3 }))
        );
    }

    #[test]
    fn missing_log_index_is_not_reported_as_first_entry() {
        let now = chrono::Utc::now();
        let mut task = Task {
            id: "t1".into(),
            title: "t".into(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            created_at: now,
            updated_at: now,
            created_by_node: 1,
            log_index: None,
        };
        assert_eq!(task_to_proto(&task).log_index, -1);

        task.log_index = Some(0);
        assert_eq!(task_to_proto(&task).log_index, 0);
    }
}
