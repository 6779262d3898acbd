// Node ids start at 1. A value of 0 means "none" wherever an id is optional.
// Commit indices are signed. A value of -1 means nothing is committed.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLogEntry {
    #[prost(uint64, tag = "1")]
    pub index: u64,
    #[prost(uint64, tag = "2")]
    pub term: u64,
    #[prost(string, tag = "3")]
    pub key: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "4")]
    pub value: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "5")]
    pub timestamp_millis: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAppendEntriesReq {
    #[prost(uint64, tag = "1")]
    pub leader_id: u64,
    #[prost(uint64, tag = "2")]
    pub term: u64,
    #[prost(message, optional, tag = "3")]
    pub entry: ::core::option::Option<ProtoLogEntry>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAppendEntriesResult {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(uint64, tag = "2")]
    pub node_id: u64,
    #[prost(uint64, tag = "3")]
    pub term: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoHeartbeatReq {
    #[prost(uint64, tag = "1")]
    pub leader_id: u64,
    #[prost(uint64, tag = "2")]
    pub term: u64,
    #[prost(int64, tag = "3")]
    pub leader_commit: i64,
    #[prost(uint64, tag = "4")]
    pub leader_log_length: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoHeartbeatResult {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(uint64, tag = "2")]
    pub node_id: u64,
    #[prost(uint64, tag = "3")]
    pub log_length: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCommitReq {
    #[prost(int64, tag = "1")]
    pub commit_index: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCommitResult {
    #[prost(bool, tag = "1")]
    pub success: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCatchUpReq {
    #[prost(uint64, tag = "1")]
    pub leader_id: u64,
    #[prost(uint64, tag = "2")]
    pub term: u64,
    #[prost(message, repeated, tag = "3")]
    pub entries: ::prost::alloc::vec::Vec<ProtoLogEntry>,
    #[prost(int64, tag = "4")]
    pub leader_commit: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCatchUpResult {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(uint64, tag = "2")]
    pub node_id: u64,
    #[prost(uint64, tag = "3")]
    pub log_length: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPromoteReq {
    #[prost(uint64, tag = "1")]
    pub term: u64,
    #[prost(uint64, tag = "2")]
    pub previous_leader: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPromoteResult {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(uint64, tag = "2")]
    pub node_id: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStatusReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNodeStatus {
    #[prost(uint64, tag = "1")]
    pub node_id: u64,
    #[prost(string, tag = "2")]
    pub role: ::prost::alloc::string::String,
    #[prost(uint64, tag = "3")]
    pub term: u64,
    #[prost(uint64, tag = "4")]
    pub voted_for: u64,
    #[prost(uint64, tag = "5")]
    pub log_length: u64,
    #[prost(int64, tag = "6")]
    pub commit_index: i64,
    #[prost(int64, tag = "7")]
    pub last_heartbeat_millis: i64,
    #[prost(uint64, tag = "8")]
    pub leader_id: u64,
    #[prost(bool, tag = "9")]
    pub running: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaderReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaderInfo {
    #[prost(uint64, tag = "1")]
    pub leader_id: u64,
    #[prost(uint64, tag = "2")]
    pub this_node_id: u64,
    #[prost(bool, tag = "3")]
    pub is_leader: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoEventsReq {
    /// 0 selects the default of 50.
    #[prost(uint32, tag = "1")]
    pub limit: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoEvent {
    #[prost(int64, tag = "1")]
    pub timestamp_millis: i64,
    #[prost(string, tag = "2")]
    pub event_type: ::prost::alloc::string::String,
    #[prost(uint64, tag = "3")]
    pub node_id: u64,
    #[prost(uint64, tag = "4")]
    pub term: u64,
    #[prost(string, tag = "5")]
    pub details_json: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoEventsReply {
    #[prost(message, repeated, tag = "1")]
    pub events: ::prost::alloc::vec::Vec<ProtoEvent>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLogReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReplicatedEntry {
    #[prost(message, optional, tag = "1")]
    pub entry: ::core::option::Option<ProtoLogEntry>,
    #[prost(map = "uint64, bool", tag = "2")]
    pub replication: ::std::collections::HashMap<u64, bool>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLogReply {
    #[prost(message, repeated, tag = "1")]
    pub entries: ::prost::alloc::vec::Vec<ProtoReplicatedEntry>,
    #[prost(uint64, tag = "2")]
    pub log_length: u64,
    #[prost(int64, tag = "3")]
    pub commit_index: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoClusterReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoClusterSnapshot {
    #[prost(message, optional, tag = "1")]
    pub this_node: ::core::option::Option<ProtoNodeStatus>,
    #[prost(uint64, repeated, tag = "2")]
    pub cluster_nodes: ::prost::alloc::vec::Vec<u64>,
    #[prost(uint64, tag = "3")]
    pub leader_id: u64,
    #[prost(uint64, tag = "4")]
    pub term: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoToggleReq {
    #[prost(uint64, tag = "1")]
    pub node_id: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoToggleResult {
    #[prost(oneof = "proto_toggle_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_toggle_result::Result>,
}
/// Nested message and enum types in `ProtoToggleResult`.
pub mod proto_toggle_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoNodeStatus),
        #[prost(message, tag = "2")]
        Err(super::ProtoToggleError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoToggleError {
    #[prost(oneof = "proto_toggle_error::Err", tags = "1, 2")]
    pub err: ::core::option::Option<proto_toggle_error::Err>,
}
/// Nested message and enum types in `ProtoToggleError`.
pub mod proto_toggle_error {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Err {
        #[prost(message, tag = "1")]
        NotThisNode(super::ProtoNotThisNode),
        #[prost(message, tag = "2")]
        ServerFault(super::ProtoServerFault),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNotThisNode {
    #[prost(uint64, tag = "1")]
    pub requested: u64,
    #[prost(uint64, tag = "2")]
    pub this_node: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWatchStatusReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTask {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub description: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub status: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub priority: ::prost::alloc::string::String,
    #[prost(int64, tag = "6")]
    pub created_at_millis: i64,
    #[prost(int64, tag = "7")]
    pub updated_at_millis: i64,
    #[prost(uint64, tag = "8")]
    pub created_by_node: u64,
    /// -1 until the task has a log entry.
    #[prost(int64, tag = "9")]
    pub log_index: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCreateTaskReq {
    #[prost(string, tag = "1")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub description: ::prost::alloc::string::String,
    /// Empty selects the default.
    #[prost(string, tag = "3")]
    pub status: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub priority: ::prost::alloc::string::String,
}
/// Empty strings leave the corresponding field unchanged.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoUpdateTaskReq {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub description: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub status: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub priority: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeleteTaskReq {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetTaskReq {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoListTasksReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoListTasksReply {
    #[prost(message, repeated, tag = "1")]
    pub tasks: ::prost::alloc::vec::Vec<ProtoTask>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTaskResult {
    #[prost(oneof = "proto_task_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_task_result::Result>,
}
/// Nested message and enum types in `ProtoTaskResult`.
pub mod proto_task_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoTask),
        #[prost(message, tag = "2")]
        Err(super::ProtoTaskError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeleted {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeleteTaskResult {
    #[prost(oneof = "proto_delete_task_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_delete_task_result::Result>,
}
/// Nested message and enum types in `ProtoDeleteTaskResult`.
pub mod proto_delete_task_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoDeleted),
        #[prost(message, tag = "2")]
        Err(super::ProtoTaskError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTaskError {
    #[prost(oneof = "proto_task_error::Err", tags = "1, 2, 3, 4")]
    pub err: ::core::option::Option<proto_task_error::Err>,
}
/// Nested message and enum types in `ProtoTaskError`.
pub mod proto_task_error {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Err {
        #[prost(message, tag = "1")]
        NotLeader(super::ProtoNotLeader),
        #[prost(message, tag = "2")]
        NotFound(super::ProtoNotFound),
        #[prost(message, tag = "3")]
        InvalidInput(super::ProtoInvalidInput),
        #[prost(message, tag = "4")]
        ServerFault(super::ProtoServerFault),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNotLeader {
    #[prost(uint64, tag = "1")]
    pub leader_id: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNotFound {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoInvalidInput {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoServerFault {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAuditLogReq {
    /// 0 selects the default of 50.
    #[prost(uint32, tag = "1")]
    pub limit: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAuditRecord {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(uint64, tag = "2")]
    pub term: u64,
    #[prost(uint64, tag = "3")]
    pub log_index: u64,
    #[prost(string, tag = "4")]
    pub operation: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub task_id: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub data_json: ::prost::alloc::string::String,
    #[prost(bool, tag = "7")]
    pub committed: bool,
    #[prost(int64, tag = "8")]
    pub created_at_millis: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAuditLogReply {
    #[prost(message, repeated, tag = "1")]
    pub records: ::prost::alloc::vec::Vec<ProtoAuditRecord>,
}
#[doc = r" Generated client implementations."]
pub mod grpc_raft_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcRaftClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcRaftClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcRaftClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn append_entries(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoAppendEntriesReq>,
        ) -> Result<tonic::Response<super::ProtoAppendEntriesResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcRaft/AppendEntries");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn heartbeat(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoHeartbeatReq>,
        ) -> Result<tonic::Response<super::ProtoHeartbeatResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcRaft/Heartbeat");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn commit(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoCommitReq>,
        ) -> Result<tonic::Response<super::ProtoCommitResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcRaft/Commit");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn catch_up(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoCatchUpReq>,
        ) -> Result<tonic::Response<super::ProtoCatchUpResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcRaft/CatchUp");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn promote(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPromoteReq>,
        ) -> Result<tonic::Response<super::ProtoPromoteResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcRaft/Promote");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcRaftClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcRaftClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcRaftClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_observability_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcObservabilityClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcObservabilityClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcObservabilityClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn get_status(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoStatusReq>,
        ) -> Result<tonic::Response<super::ProtoNodeStatus>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcObservability/GetStatus");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_leader(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoLeaderReq>,
        ) -> Result<tonic::Response<super::ProtoLeaderInfo>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcObservability/GetLeader");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_events(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoEventsReq>,
        ) -> Result<tonic::Response<super::ProtoEventsReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcObservability/GetEvents");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_log(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoLogReq>,
        ) -> Result<tonic::Response<super::ProtoLogReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcObservability/GetLog");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_cluster(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoClusterReq>,
        ) -> Result<tonic::Response<super::ProtoClusterSnapshot>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcObservability/GetCluster");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn toggle_node(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoToggleReq>,
        ) -> Result<tonic::Response<super::ProtoToggleResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcObservability/ToggleNode");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn watch_status(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoWatchStatusReq>,
        ) -> Result<tonic::Response<tonic::codec::Streaming<super::ProtoNodeStatus>>, tonic::Status>
        {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcObservability/WatchStatus");
            self.inner
                .server_streaming(request.into_request(), path, codec)
                .await
        }
    }
    impl<T: Clone> Clone for GrpcObservabilityClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcObservabilityClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcObservabilityClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_tasks_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcTasksClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcTasksClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcTasksClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn create_task(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoCreateTaskReq>,
        ) -> Result<tonic::Response<super::ProtoTaskResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcTasks/CreateTask");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn update_task(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoUpdateTaskReq>,
        ) -> Result<tonic::Response<super::ProtoTaskResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcTasks/UpdateTask");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn delete_task(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoDeleteTaskReq>,
        ) -> Result<tonic::Response<super::ProtoDeleteTaskResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcTasks/DeleteTask");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_task(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetTaskReq>,
        ) -> Result<tonic::Response<super::ProtoTaskResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcTasks/GetTask");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn list_tasks(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoListTasksReq>,
        ) -> Result<tonic::Response<super::ProtoListTasksReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcTasks/ListTasks");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_audit_log(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoAuditLogReq>,
        ) -> Result<tonic::Response<super::ProtoAuditLogReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/raft.GrpcTasks/GetAuditLog");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcTasksClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcTasksClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcTasksClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_raft_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcRaftServer."]
    #[async_trait]
    pub trait GrpcRaft: Send + Sync + 'static {
        async fn append_entries(
            &self,
            request: tonic::Request<super::ProtoAppendEntriesReq>,
        ) -> Result<tonic::Response<super::ProtoAppendEntriesResult>, tonic::Status>;
        async fn heartbeat(
            &self,
            request: tonic::Request<super::ProtoHeartbeatReq>,
        ) -> Result<tonic::Response<super::ProtoHeartbeatResult>, tonic::Status>;
        async fn commit(
            &self,
            request: tonic::Request<super::ProtoCommitReq>,
        ) -> Result<tonic::Response<super::ProtoCommitResult>, tonic::Status>;
        async fn catch_up(
            &self,
            request: tonic::Request<super::ProtoCatchUpReq>,
        ) -> Result<tonic::Response<super::ProtoCatchUpResult>, tonic::Status>;
        async fn promote(
            &self,
            request: tonic::Request<super::ProtoPromoteReq>,
        ) -> Result<tonic::Response<super::ProtoPromoteResult>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcRaftServer<T: GrpcRaft> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcRaft> GrpcRaftServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcRaftServer<T>
    where
        T: GrpcRaft,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/raft.GrpcRaft/AppendEntries" => {
                    #[allow(non_camel_case_types)]
                    struct AppendEntriesSvc<T: GrpcRaft>(pub Arc<T>);
                    impl<T: GrpcRaft> tonic::server::UnaryService<super::ProtoAppendEntriesReq>
                        for AppendEntriesSvc<T>
                    {
                        type Response = super::ProtoAppendEntriesResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoAppendEntriesReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).append_entries(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = AppendEntriesSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcRaft/Heartbeat" => {
                    #[allow(non_camel_case_types)]
                    struct HeartbeatSvc<T: GrpcRaft>(pub Arc<T>);
                    impl<T: GrpcRaft> tonic::server::UnaryService<super::ProtoHeartbeatReq> for HeartbeatSvc<T> {
                        type Response = super::ProtoHeartbeatResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoHeartbeatReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).heartbeat(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = HeartbeatSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcRaft/Commit" => {
                    #[allow(non_camel_case_types)]
                    struct CommitSvc<T: GrpcRaft>(pub Arc<T>);
                    impl<T: GrpcRaft> tonic::server::UnaryService<super::ProtoCommitReq> for CommitSvc<T> {
                        type Response = super::ProtoCommitResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoCommitReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).commit(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = CommitSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcRaft/CatchUp" => {
                    #[allow(non_camel_case_types)]
                    struct CatchUpSvc<T: GrpcRaft>(pub Arc<T>);
                    impl<T: GrpcRaft> tonic::server::UnaryService<super::ProtoCatchUpReq> for CatchUpSvc<T> {
                        type Response = super::ProtoCatchUpResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoCatchUpReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).catch_up(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = CatchUpSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcRaft/Promote" => {
                    #[allow(non_camel_case_types)]
                    struct PromoteSvc<T: GrpcRaft>(pub Arc<T>);
                    impl<T: GrpcRaft> tonic::server::UnaryService<super::ProtoPromoteReq> for PromoteSvc<T> {
                        type Response = super::ProtoPromoteResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPromoteReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).promote(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PromoteSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcRaft> Clone for GrpcRaftServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcRaft> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcRaft> tonic::transport::NamedService for GrpcRaftServer<T> {
        const NAME: &'static str = "raft.GrpcRaft";
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_observability_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcObservabilityServer."]
    #[async_trait]
    pub trait GrpcObservability: Send + Sync + 'static {
        async fn get_status(
            &self,
            request: tonic::Request<super::ProtoStatusReq>,
        ) -> Result<tonic::Response<super::ProtoNodeStatus>, tonic::Status>;
        async fn get_leader(
            &self,
            request: tonic::Request<super::ProtoLeaderReq>,
        ) -> Result<tonic::Response<super::ProtoLeaderInfo>, tonic::Status>;
        async fn get_events(
            &self,
            request: tonic::Request<super::ProtoEventsReq>,
        ) -> Result<tonic::Response<super::ProtoEventsReply>, tonic::Status>;
        async fn get_log(
            &self,
            request: tonic::Request<super::ProtoLogReq>,
        ) -> Result<tonic::Response<super::ProtoLogReply>, tonic::Status>;
        async fn get_cluster(
            &self,
            request: tonic::Request<super::ProtoClusterReq>,
        ) -> Result<tonic::Response<super::ProtoClusterSnapshot>, tonic::Status>;
        async fn toggle_node(
            &self,
            request: tonic::Request<super::ProtoToggleReq>,
        ) -> Result<tonic::Response<super::ProtoToggleResult>, tonic::Status>;
        #[doc = "Server streaming response type for the WatchStatus method."]
        type WatchStatusStream: futures_core::Stream<Item = Result<super::ProtoNodeStatus, tonic::Status>>
            + Send
            + Sync
            + 'static;
        async fn watch_status(
            &self,
            request: tonic::Request<super::ProtoWatchStatusReq>,
        ) -> Result<tonic::Response<Self::WatchStatusStream>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcObservabilityServer<T: GrpcObservability> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcObservability> GrpcObservabilityServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcObservabilityServer<T>
    where
        T: GrpcObservability,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/raft.GrpcObservability/GetStatus" => {
                    #[allow(non_camel_case_types)]
                    struct GetStatusSvc<T: GrpcObservability>(pub Arc<T>);
                    impl<T: GrpcObservability> tonic::server::UnaryService<super::ProtoStatusReq> for GetStatusSvc<T> {
                        type Response = super::ProtoNodeStatus;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoStatusReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_status(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetStatusSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcObservability/GetLeader" => {
                    #[allow(non_camel_case_types)]
                    struct GetLeaderSvc<T: GrpcObservability>(pub Arc<T>);
                    impl<T: GrpcObservability> tonic::server::UnaryService<super::ProtoLeaderReq> for GetLeaderSvc<T> {
                        type Response = super::ProtoLeaderInfo;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoLeaderReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_leader(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetLeaderSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcObservability/GetEvents" => {
                    #[allow(non_camel_case_types)]
                    struct GetEventsSvc<T: GrpcObservability>(pub Arc<T>);
                    impl<T: GrpcObservability> tonic::server::UnaryService<super::ProtoEventsReq> for GetEventsSvc<T> {
                        type Response = super::ProtoEventsReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoEventsReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_events(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetEventsSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcObservability/GetLog" => {
                    #[allow(non_camel_case_types)]
                    struct GetLogSvc<T: GrpcObservability>(pub Arc<T>);
                    impl<T: GrpcObservability> tonic::server::UnaryService<super::ProtoLogReq> for GetLogSvc<T> {
                        type Response = super::ProtoLogReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoLogReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_log(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetLogSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcObservability/GetCluster" => {
                    #[allow(non_camel_case_types)]
                    struct GetClusterSvc<T: GrpcObservability>(pub Arc<T>);
                    impl<T: GrpcObservability> tonic::server::UnaryService<super::ProtoClusterReq>
                        for GetClusterSvc<T>
                    {
                        type Response = super::ProtoClusterSnapshot;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoClusterReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_cluster(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetClusterSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcObservability/ToggleNode" => {
                    #[allow(non_camel_case_types)]
                    struct ToggleNodeSvc<T: GrpcObservability>(pub Arc<T>);
                    impl<T: GrpcObservability> tonic::server::UnaryService<super::ProtoToggleReq> for ToggleNodeSvc<T> {
                        type Response = super::ProtoToggleResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoToggleReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).toggle_node(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ToggleNodeSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcObservability/WatchStatus" => {
                    #[allow(non_camel_case_types)]
                    struct WatchStatusSvc<T: GrpcObservability>(pub Arc<T>);
                    impl<T: GrpcObservability>
                        tonic::server::ServerStreamingService<super::ProtoWatchStatusReq>
                        for WatchStatusSvc<T>
                    {
                        type Response = super::ProtoNodeStatus;
                        type ResponseStream = T::WatchStatusStream;
                        type Future =
                            BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoWatchStatusReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).watch_status(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1;
                        let inner = inner.0;
                        let method = WatchStatusSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.server_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcObservability> Clone for GrpcObservabilityServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcObservability> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcObservability> tonic::transport::NamedService for GrpcObservabilityServer<T> {
        const NAME: &'static str = "raft.GrpcObservability";
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_tasks_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcTasksServer."]
    #[async_trait]
    pub trait GrpcTasks: Send + Sync + 'static {
        async fn create_task(
            &self,
            request: tonic::Request<super::ProtoCreateTaskReq>,
        ) -> Result<tonic::Response<super::ProtoTaskResult>, tonic::Status>;
        async fn update_task(
            &self,
            request: tonic::Request<super::ProtoUpdateTaskReq>,
        ) -> Result<tonic::Response<super::ProtoTaskResult>, tonic::Status>;
        async fn delete_task(
            &self,
            request: tonic::Request<super::ProtoDeleteTaskReq>,
        ) -> Result<tonic::Response<super::ProtoDeleteTaskResult>, tonic::Status>;
        async fn get_task(
            &self,
            request: tonic::Request<super::ProtoGetTaskReq>,
        ) -> Result<tonic::Response<super::ProtoTaskResult>, tonic::Status>;
        async fn list_tasks(
            &self,
            request: tonic::Request<super::ProtoListTasksReq>,
        ) -> Result<tonic::Response<super::ProtoListTasksReply>, tonic::Status>;
        async fn get_audit_log(
            &self,
            request: tonic::Request<super::ProtoAuditLogReq>,
        ) -> Result<tonic::Response<super::ProtoAuditLogReply>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcTasksServer<T: GrpcTasks> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcTasks> GrpcTasksServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcTasksServer<T>
    where
        T: GrpcTasks,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/raft.GrpcTasks/CreateTask" => {
                    #[allow(non_camel_case_types)]
                    struct CreateTaskSvc<T: GrpcTasks>(pub Arc<T>);
                    impl<T: GrpcTasks> tonic::server::UnaryService<super::ProtoCreateTaskReq> for CreateTaskSvc<T> {
                        type Response = super::ProtoTaskResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoCreateTaskReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).create_task(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = CreateTaskSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcTasks/UpdateTask" => {
                    #[allow(non_camel_case_types)]
                    struct UpdateTaskSvc<T: GrpcTasks>(pub Arc<T>);
                    impl<T: GrpcTasks> tonic::server::UnaryService<super::ProtoUpdateTaskReq> for UpdateTaskSvc<T> {
                        type Response = super::ProtoTaskResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoUpdateTaskReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).update_task(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = UpdateTaskSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcTasks/DeleteTask" => {
                    #[allow(non_camel_case_types)]
                    struct DeleteTaskSvc<T: GrpcTasks>(pub Arc<T>);
                    impl<T: GrpcTasks> tonic::server::UnaryService<super::ProtoDeleteTaskReq> for DeleteTaskSvc<T> {
                        type Response = super::ProtoDeleteTaskResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoDeleteTaskReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).delete_task(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = DeleteTaskSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcTasks/GetTask" => {
                    #[allow(non_camel_case_types)]
                    struct GetTaskSvc<T: GrpcTasks>(pub Arc<T>);
                    impl<T: GrpcTasks> tonic::server::UnaryService<super::ProtoGetTaskReq> for GetTaskSvc<T> {
                        type Response = super::ProtoTaskResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetTaskReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_task(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetTaskSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcTasks/ListTasks" => {
                    #[allow(non_camel_case_types)]
                    struct ListTasksSvc<T: GrpcTasks>(pub Arc<T>);
                    impl<T: GrpcTasks> tonic::server::UnaryService<super::ProtoListTasksReq> for ListTasksSvc<T> {
                        type Response = super::ProtoListTasksReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoListTasksReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).list_tasks(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ListTasksSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/raft.GrpcTasks/GetAuditLog" => {
                    #[allow(non_camel_case_types)]
                    struct GetAuditLogSvc<T: GrpcTasks>(pub Arc<T>);
                    impl<T: GrpcTasks> tonic::server::UnaryService<super::ProtoAuditLogReq> for GetAuditLogSvc<T> {
                        type Response = super::ProtoAuditLogReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoAuditLogReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_audit_log(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetAuditLogSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcTasks> Clone for GrpcTasksServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcTasks> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcTasks> tonic::transport::NamedService for GrpcTasksServer<T> {
        const NAME: &'static str = "raft.GrpcTasks";
    }
}
