mod applier;
mod model;
mod service;
mod store;

pub use model::{AuditOperation, AuditRecord, NewTask, Task, TaskPriority, TaskStatus, TaskUpdate, UnknownVariant};
pub use service::{TaskError, TaskService};
pub use store::{TaskStore, TaskStoreError};
