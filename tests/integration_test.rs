use bytes::Bytes;
use replinode::{NewTask, RaftClient, RaftMemberInfo, RaftOptions, Role, TaskError, TaskPriority, TaskStatus, TaskUpdate};
use slog::Drain;
use std::collections::BTreeMap;
use std::error::Error;
use std::net::Ipv4Addr;
use tokio::time::{Duration, Instant};

#[tokio::test]
async fn grpc_cluster_replicates_tasks() -> Result<(), Box<dyn Error>> {
    let clients = start_cluster(3, 47310).await?;

    let leader = &clients[&1];
    wait_until(move || async move { leader.node.status().await.map(|s| s.role == Role::Leader).unwrap_or(false) }).await;

    let task = leader
        .tasks
        .create_task(NewTask {
            title: "Write the runbook".into(),
            priority: Some(TaskPriority::High),
            ..NewTask::default()
        })
        .await?;
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.created_by_node, 1);
    assert_eq!(task.log_index, Some(0));

    let key = format!("task:{}", task.id);
    let task_id = task.id.as_str();
    for id in 2..=3 {
        let follower = &clients[&id];
        wait_until(move || async move {
            follower
                .node
                .status()
                .await
                .map(|s| s.commit_index == Some(0))
                .unwrap_or(false)
        })
        .await;

        let value = follower.node.replicated_value(key.clone()).await?.expect("task entry replicated");
        let replicated: serde_json::Value = serde_json::from_slice(&value)?;
        assert_eq!(replicated["title"], "Write the runbook");

        wait_until(move || async move { follower.tasks.get_task(task_id).is_ok() }).await;
    }

    let updated = leader
        .tasks
        .update_task(
            &task.id,
            TaskUpdate {
                status: Some(TaskStatus::Completed),
                ..TaskUpdate::default()
            },
        )
        .await?;
    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(leader.tasks.audit_log(10)?.len(), 2);

    match clients[&2].tasks.create_task(NewTask {
        title: "from a follower".into(),
        ..NewTask::default()
    })
    .await
    {
        Err(TaskError::NotLeader { leader_hint }) => assert_eq!(leader_hint.map(|l| l.as_u64()), Some(1)),
        other => panic!("Expected a leader redirect, got {:?}", other.map(|t| t.id)),
    }

    for (_, client) in clients {
        client.shutdown().await;
    }
    Ok(())
}

#[tokio::test]
async fn grpc_cluster_survives_a_stopped_follower() -> Result<(), Box<dyn Error>> {
    let clients = start_cluster(3, 47320).await?;

    let leader = &clients[&1];
    wait_until(move || async move { leader.node.status().await.map(|s| s.role == Role::Leader).unwrap_or(false) }).await;

    clients[&3].node.stop().await?;
    let output = leader.node.replicate("while-stopped", Bytes::from("x")).await?;
    assert_eq!(output.acks, 2);

    clients[&3].node.start().await?;
    let follower = &clients[&3];
    wait_until(move || async move { follower.node.status().await.map(|s| s.log_length == 1).unwrap_or(false) }).await;

    for (_, client) in clients {
        client.shutdown().await;
    }
    Ok(())
}

async fn start_cluster(num_members: u64, base_port: u16) -> Result<BTreeMap<u64, RaftClient>, Box<dyn Error>> {
    let members: Vec<RaftMemberInfo> = (1..=num_members)
        .map(|id| RaftMemberInfo {
            replica_id: id,
            ip_addr: Ipv4Addr::LOCALHOST,
            raft_rpc_port: base_port + id as u16,
        })
        .collect();

    let mut clients = BTreeMap::new();
    for id in 1..=num_members {
        let client = replinode::try_create_raft_client(replinode::RaftClientConfig {
            my_replica_id: id,
            cluster_members: members.clone(),
            task_database_path: None,
            info_logger: create_root_logger_for_stdout(id),
            options: options(),
        })
        .await?;
        clients.insert(id, client);
    }

    Ok(clients)
}

fn options() -> RaftOptions {
    RaftOptions {
        heartbeat_interval: Some(Duration::from_millis(100)),
        failure_detector_interval: Some(Duration::from_millis(200)),
        election_timeout: Some(Duration::from_secs(5)),
        startup_delay: Some(Duration::from_millis(500)),
        leadership_handoff_probability: Some(0.0),
        ..RaftOptions::default()
    }
}

async fn wait_until<F, Fut>(condition: F)
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = Instant::now() + Duration::from_secs(10);
    while !condition().await {
        if Instant::now() > deadline {
            panic!("Condition not reached within 10s");
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

fn create_root_logger_for_stdout(replica_id: u64) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = slog::LevelFilter::new(drain, slog::Level::Info).fuse();

    slog::Logger::root(drain, slog::o!("Test" => replica_id))
}
