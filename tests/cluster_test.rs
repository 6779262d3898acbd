mod common;

use bytes::Bytes;
use common::{fast_options, wait_for_status, Cluster};
use replinode::{NewTask, ReplicateError, Role, TaskError, TaskService, TaskStatus, TaskStore, TaskUpdate, Term};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;
use tokio::time::Duration;

const SLOW_ELECTION: Duration = Duration::from_secs(3);

#[tokio::test]
async fn bootstrap_leader_replicates_to_every_node() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(3, fast_options(SLOW_ELECTION)).await;

    let leader_status = cluster.wait_for_leader(1).await;
    assert_eq!(leader_status.term, Term::new(1));

    let output = cluster.node(1).replicate("greeting", Bytes::from("hello")).await?;
    assert_eq!(output.index, 0);
    assert_eq!(output.acks, 3);

    for id in 1..=3 {
        let status = cluster
            .wait_for_status(id, |s| s.log_length == 1 && s.commit_index == Some(0))
            .await;
        assert_eq!(status.leader_id.map(|l| l.as_u64()), Some(1));
        assert_eq!(
            cluster.node(id).replicated_value("greeting").await?,
            Some(Bytes::from("hello"))
        );
    }

    let replication = cluster.node(1).replication_status(0).await?;
    assert!(replication.values().all(|acked| *acked));

    Ok(())
}

#[tokio::test]
async fn followers_redirect_writes_to_leader() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(3, fast_options(SLOW_ELECTION)).await;
    cluster.wait_for_leader(1).await;
    cluster
        .wait_for_status(2, |s| s.leader_id.map(|l| l.as_u64()) == Some(1))
        .await;

    let result = cluster.node(2).replicate("k", Bytes::from("v")).await;
    match result {
        Err(ReplicateError::NotLeader { leader_hint }) => {
            assert_eq!(leader_hint.map(|l| l.as_u64()), Some(1));
        }
        other => panic!("Expected a leader redirect, got {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn isolated_leader_cannot_commit() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(3, fast_options(SLOW_ELECTION)).await;
    cluster.wait_for_leader(1).await;

    cluster.network.isolate(replinode::ReplicaId::new(1));
    let result = cluster.node(1).replicate("k", Bytes::from("v")).await;

    match result {
        Err(ReplicateError::QuorumNotReached { index, acks, required }) => {
            assert_eq!(index, 0);
            assert_eq!(acks, 1);
            assert_eq!(required, 2);
        }
        other => panic!("Expected quorum failure, got {:?}", other),
    }

    let status = cluster.node(1).status().await?;
    assert_eq!(status.log_length, 1);
    assert_eq!(status.commit_index, None);

    Ok(())
}

#[tokio::test]
async fn isolated_follower_catches_up_after_heal() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(3, fast_options(SLOW_ELECTION)).await;
    cluster.wait_for_leader(1).await;

    cluster.network.isolate(replinode::ReplicaId::new(3));
    for i in 0..3u8 {
        let output = cluster.node(1).replicate(format!("k{}", i), Bytes::from(vec![i])).await?;
        assert_eq!(output.acks, 2);
    }
    assert_eq!(cluster.node(3).status().await?.log_length, 0);

    cluster.network.heal();

    let status = cluster
        .wait_for_status(3, |s| s.log_length == 3 && s.commit_index == Some(2))
        .await;
    assert_eq!(status.role, Role::Follower);

    let keys: Vec<String> = cluster.node(3).log().await?.into_iter().map(|e| e.key).collect();
    assert_eq!(keys, vec!["k0", "k1", "k2"]);

    Ok(())
}

#[tokio::test]
async fn stopped_follower_catches_up_when_restarted() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(3, fast_options(SLOW_ELECTION)).await;
    cluster.wait_for_leader(1).await;

    let stopped = cluster.node(2).toggle(replinode::ReplicaId::new(2)).await?;
    assert!(!stopped.running);

    let output = cluster.node(1).replicate("a", Bytes::from("1")).await?;
    assert_eq!(output.acks, 2);
    let output = cluster.node(1).replicate("b", Bytes::from("2")).await?;
    assert_eq!(output.acks, 2);

    let restarted = cluster.node(2).toggle(replinode::ReplicaId::new(2)).await?;
    assert!(restarted.running);
    assert_eq!(restarted.role, Role::Follower);

    cluster
        .wait_for_status(2, |s| s.log_length == 2 && s.commit_index == Some(1))
        .await;

    let replication = cluster.node(1).replication_status(1).await?;
    assert_eq!(replication.get(&replinode::ReplicaId::new(2)), Some(&true));

    Ok(())
}

#[tokio::test]
async fn followers_take_over_when_leader_stops() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(3, fast_options(Duration::from_millis(500))).await;
    cluster.wait_for_leader(1).await;
    cluster.node(1).replicate("before", Bytes::from("failover")).await?;

    cluster.node(1).stop().await?;

    let mut new_leader = None;
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while new_leader.is_none() {
        for id in 2..=3 {
            let status = cluster.node(id).status().await?;
            if status.role == Role::Leader {
                new_leader = Some((id, status));
            }
        }
        assert!(tokio::time::Instant::now() < deadline, "No follower took over");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let (id, status) = new_leader.unwrap();
    assert!(status.term > Term::new(1));
    assert_eq!(status.leader_id.map(|l| l.as_u64()), Some(id));
    assert_eq!(status.log_length, 1);

    Ok(())
}

#[tokio::test]
async fn status_listener_follows_state_changes() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(3, fast_options(SLOW_ELECTION)).await;
    cluster.wait_for_leader(1).await;

    let mut listener = cluster.node(1).status_listener().await?;
    let initial = listener.next_status().await.unwrap();
    assert_eq!(initial.role, Role::Leader);

    cluster.node(1).stop().await?;

    let stopped = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let status = listener.next_status().await.unwrap();
            if !status.running {
                return status;
            }
        }
    })
    .await?;
    assert_eq!(stopped.node_id.as_u64(), 1);

    let events = cluster.node(1).recent_events(replinode::DEFAULT_EVENTS_LIMIT).await?;
    assert!(events.iter().any(|e| e.kind.event_type() == "node_stopped"));

    wait_for_status(cluster.node(2), |s| s.role == Role::Follower).await;
    Ok(())
}

async fn task_services(cluster: &Cluster) -> BTreeMap<u64, TaskService> {
    let mut services = BTreeMap::new();
    for (id, node) in cluster.nodes.iter() {
        let store = Arc::new(TaskStore::open(":memory:").unwrap());
        let service = TaskService::new(common::create_root_logger_for_stdout(*id), node.clone(), store)
            .await
            .unwrap();
        services.insert(*id, service);
    }
    services
}

async fn wait_for_task(tasks: &TaskService, id: &str) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while tasks.get_task(id).is_err() {
        assert!(tokio::time::Instant::now() < deadline, "Task {} never reached this node", id);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn tasks_survive_leader_failover() -> Result<(), Box<dyn Error>> {
    let cluster = Cluster::start(3, fast_options(Duration::from_millis(500))).await;
    let services = task_services(&cluster).await;
    cluster.wait_for_leader(1).await;

    let task = services[&1]
        .create_task(NewTask {
            title: "outlive the leader".into(),
            ..NewTask::default()
        })
        .await?;
    for id in 2..=3 {
        wait_for_task(&services[&id], &task.id).await;
    }

    cluster.node(1).stop().await?;

    // Whichever follower wins takes the update. Retry while leadership settles.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    let (new_leader, updated) = loop {
        assert!(tokio::time::Instant::now() < deadline, "No new leader accepted the update");
        let mut accepted = None;
        for id in 2..=3 {
            let update = TaskUpdate {
                status: Some(TaskStatus::Completed),
                ..TaskUpdate::default()
            };
            match services[&id].update_task(&task.id, update).await {
                Ok(updated) => {
                    accepted = Some((id, updated));
                    break;
                }
                Err(TaskError::NotLeader { .. }) | Err(TaskError::Replication(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        if let Some(accepted) = accepted {
            break accepted;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    };

    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(updated.title, "outlive the leader");
    let listed = services[&new_leader].list_tasks()?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, TaskStatus::Completed);
    assert_eq!(listed[0].log_index, Some(0));

    Ok(())
}
