use crate::actor::{Callback, WeakActorClient};
use crate::replica::acks::ReplicationAcks;
use crate::replica::event_history::{EventHistory, EventKind, NodeEvent, StateChangeReason};
use crate::replica::local_log::{LocalLog, LogEntry, PositionalAppend};
use crate::replica::local_state::{Term, VolatileLocalState};
use crate::replica::peer_calls::{PeerCalls, RpcTimeouts};
use crate::replica::peers::{ClusterMembership, ReplicaId};
use crate::replica::replica_api::{
    AppendEntriesReply, AppendEntriesRequest, CatchUpReply, CatchUpReplyFromPeer, CatchUpRequest,
    ClusterSnapshot, CommitReply, CommitRequest, HeartbeatReply, HeartbeatReplyFromPeer, HeartbeatRequest,
    LeaderInfo, NodeStatus, PromoteReply, PromoteRequest, ReplicateAcksFromPeers, ReplicateError,
    ReplicateInput, ReplicateOutput, ReplicatedEntry, Role, RpcHandlerError, TimerTick, ToggleError,
};
use crate::replica::subscribers::{SubscriberId, Subscribers, Subscription};
use crate::replica::timers::{self, Clock, RealClock, RunStopCheck, RunStopper};
use crate::transport::PeerTransport;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub(crate) struct ReplicaOptions {
    pub(crate) heartbeat_interval: Duration,
    pub(crate) failure_detector_interval: Duration,
    pub(crate) election_timeout: Duration,
    pub(crate) startup_delay: Duration,
    pub(crate) candidate_promotion_delay: Duration,
    pub(crate) leadership_handoff_probability: f64,
    pub(crate) bootstrap_leader: ReplicaId,
    pub(crate) event_history_capacity: usize,
    pub(crate) rpc_timeouts: RpcTimeouts,
}

pub(crate) struct ReplicaConfig<C: Clock> {
    pub(crate) logger: slog::Logger,
    pub(crate) cluster: ClusterMembership,
    pub(crate) transport: Arc<dyn PeerTransport>,
    pub(crate) actor_client: WeakActorClient,
    pub(crate) options: ReplicaOptions,
    pub(crate) clock: C,
    pub(crate) rng: StdRng,
}

/// Held only while the node is running. Dropping it ends every timer task of this run.
struct RunningState {
    _stopper: RunStopper,
    stop_check: RunStopCheck,
}

pub(crate) struct Replica<C: Clock = RealClock> {
    logger: slog::Logger,
    my_replica_id: ReplicaId,
    cluster: ClusterMembership,
    local_state: VolatileLocalState,
    role: Role,
    leader_id: Option<ReplicaId>,
    local_log: LocalLog,
    acks: ReplicationAcks,
    events: EventHistory,
    subscribers: Subscribers,
    last_heartbeat: Instant,
    last_heartbeat_at: DateTime<Utc>,
    running: Option<RunningState>,
    peer_calls: PeerCalls,
    actor_client: WeakActorClient,
    options: ReplicaOptions,
    clock: C,
    rng: StdRng,
}

impl<C: Clock> Replica<C> {
    /// Created stopped. `start()` brings it up as a follower.
    pub(crate) fn new(config: ReplicaConfig<C>) -> Self {
        let my_replica_id = config.cluster.my_replica_id();
        let logger = config.logger;
        let peer_calls = PeerCalls::new(
            logger.clone(),
            config.transport,
            config.options.rpc_timeouts,
            config.actor_client.clone(),
        );

        Replica {
            my_replica_id,
            cluster: config.cluster,
            local_state: VolatileLocalState::new(my_replica_id),
            role: Role::Stopped,
            leader_id: None,
            local_log: LocalLog::new(),
            acks: ReplicationAcks::new(),
            events: EventHistory::new(config.options.event_history_capacity),
            subscribers: Subscribers::new(logger.clone()),
            last_heartbeat: config.clock.now(),
            last_heartbeat_at: Utc::now(),
            running: None,
            peer_calls,
            actor_client: config.actor_client,
            options: config.options,
            clock: config.clock,
            rng: config.rng,
            logger,
        }
    }

    // ------- Lifecycle -------

    pub(crate) fn start(&mut self) -> NodeStatus {
        if self.running.is_some() {
            return self.status();
        }

        let (stopper, stop_check) = RunStopper::new();
        timers::spawn_ticker(
            self.clock.clone(),
            self.options.failure_detector_interval,
            TimerTick::FailureDetector,
            self.actor_client.clone(),
            stop_check.clone(),
        );
        timers::spawn_ticker(
            self.clock.clone(),
            self.options.heartbeat_interval,
            TimerTick::Heartbeat,
            self.actor_client.clone(),
            stop_check.clone(),
        );
        if self.my_replica_id == self.options.bootstrap_leader {
            timers::spawn_delay(
                self.clock.clone(),
                self.options.startup_delay,
                TimerTick::Bootstrap,
                self.actor_client.clone(),
                stop_check.clone(),
            );
        }
        self.running = Some(RunningState {
            _stopper: stopper,
            stop_check,
        });

        self.role = Role::Follower;
        self.refresh_heartbeat();
        slog::info!(self.logger, "Node started at term {:?}", self.local_state.current_term());
        self.record_event(EventKind::NodeStarted);
        self.notify_subscribers();

        self.status()
    }

    pub(crate) fn stop(&mut self) -> NodeStatus {
        if self.running.take().is_none() {
            return self.status();
        }

        let old_role = self.role;
        self.role = Role::Stopped;
        slog::info!(self.logger, "Node stopped. Was {}", old_role);
        self.record_event(EventKind::NodeStopped { old_role });
        self.notify_subscribers();

        self.status()
    }

    pub(crate) fn toggle(&mut self, target: ReplicaId) -> Result<NodeStatus, ToggleError> {
        if target != self.my_replica_id {
            return Err(ToggleError::NotThisNode {
                requested: target,
                this_node: self.my_replica_id,
            });
        }

        if self.is_running() {
            Ok(self.stop())
        } else {
            Ok(self.start())
        }
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }

    // ------- Client writes -------

    pub(crate) fn handle_replicate(
        &mut self,
        input: ReplicateInput,
        callback: Callback<ReplicateOutput, ReplicateError>,
    ) {
        if !self.is_running() || self.role != Role::Leader {
            callback.send(Err(ReplicateError::NotLeader {
                leader_hint: self.leader_id.filter(|id| *id != self.my_replica_id),
            }));
            return;
        }

        let term = self.local_state.current_term();
        let entry = self.local_log.append_new(term, input.key, input.value, Utc::now());
        self.acks.track_new_entry(entry.index, self.my_replica_id);
        self.record_event(EventKind::LogAppend {
            key: entry.key.clone(),
            index: entry.index,
        });

        let request = AppendEntriesRequest {
            leader_id: self.my_replica_id,
            term,
            entry,
        };
        self.peer_calls.replicate(self.cluster.peer_ids(), request, callback);
    }

    // The quorum decision uses the acks gathered for this entry, even if our role changed while
    // the calls were in flight.
    pub(crate) fn handle_replicate_acks_from_peers(&mut self, input: ReplicateAcksFromPeers) {
        let ReplicateAcksFromPeers {
            index,
            term,
            acked_by,
            callback,
        } = input;

        for peer in acked_by {
            self.acks.record(index, peer);
        }

        let acks = self.acks.ack_count(index);
        let required = self.cluster.quorum();
        if acks < required {
            slog::warn!(self.logger, "Entry {} not committed: {} of {} acks", index, acks, required);
            callback.send(Err(ReplicateError::QuorumNotReached { index, acks, required }));
            return;
        }

        if self.local_log.commit_to(index) {
            slog::info!(self.logger, "Committed entry {} with {} acks", index, acks);
            self.record_event(EventKind::LogCommit { index, acks });
            if self.is_running() {
                self.peer_calls.notify_commit(self.cluster.peer_ids(), index);
            }
            self.notify_subscribers();
        }

        callback.send(Ok(ReplicateOutput { index, term, acks }));
    }

    // ------- Inbound peer RPCs -------

    pub(crate) fn handle_append_entries(
        &mut self,
        request: AppendEntriesRequest,
    ) -> Result<AppendEntriesReply, RpcHandlerError> {
        self.ensure_running()?;

        if request.term >= self.local_state.current_term() {
            self.accept_authority(request.term, request.leader_id);
        } else {
            slog::info!(
                self.logger,
                "AppendEntries from {:?} carries stale term {:?}",
                request.leader_id,
                request.term
            );
        }

        let index = request.entry.index;
        let success = match self.local_log.append_at_position(request.entry) {
            PositionalAppend::AlreadyPresent => true,
            PositionalAppend::Appended => {
                self.record_event(EventKind::LogReplicated {
                    index,
                    from_leader: request.leader_id,
                });
                self.notify_subscribers();
                true
            }
            PositionalAppend::Gap { log_length } => {
                slog::info!(
                    self.logger,
                    "Refusing entry {} from {:?}, log length is {}",
                    index,
                    request.leader_id,
                    log_length
                );
                false
            }
        };

        Ok(AppendEntriesReply {
            success,
            node_id: self.my_replica_id,
            term: self.local_state.current_term(),
        })
    }

    pub(crate) fn handle_heartbeat(&mut self, request: HeartbeatRequest) -> Result<HeartbeatReply, RpcHandlerError> {
        self.ensure_running()?;

        let accepted = request.term >= self.local_state.current_term();
        if accepted {
            self.accept_authority(request.term, request.leader_id);
        }

        if self.local_log.commit_to_leader(request.leader_commit) {
            self.notify_subscribers();
        }

        Ok(HeartbeatReply {
            success: accepted,
            node_id: self.my_replica_id,
            log_length: self.local_log.len(),
        })
    }

    pub(crate) fn handle_commit(&mut self, request: CommitRequest) -> Result<CommitReply, RpcHandlerError> {
        self.ensure_running()?;

        if self.local_log.commit_to(request.commit_index) {
            self.notify_subscribers();
        }

        Ok(CommitReply { success: true })
    }

    pub(crate) fn handle_catch_up(&mut self, request: CatchUpRequest) -> Result<CatchUpReply, RpcHandlerError> {
        self.ensure_running()?;

        if request.term >= self.local_state.current_term() {
            self.accept_authority(request.term, request.leader_id);
        }

        let appended = self.local_log.extend_from_position(request.entries);
        let committed = self.local_log.commit_to_leader(request.leader_commit);
        if appended > 0 {
            slog::info!(
                self.logger,
                "Caught up {} entries from {:?}",
                appended,
                request.leader_id
            );
            self.record_event(EventKind::LogCatchUp {
                entries_received: appended,
                from_leader: request.leader_id,
                new_log_length: self.local_log.len(),
            });
        }
        if appended > 0 || committed {
            self.notify_subscribers();
        }

        Ok(CatchUpReply {
            success: true,
            node_id: self.my_replica_id,
            log_length: self.local_log.len(),
        })
    }

    pub(crate) fn handle_promote(&mut self, request: PromoteRequest) -> Result<PromoteReply, RpcHandlerError> {
        self.ensure_running()?;

        let success = request.term >= self.local_state.current_term() && self.role != Role::Leader;
        if success {
            self.local_state.store_term_if_increased(request.term);
            slog::info!(
                self.logger,
                "Promoted to leader by {:?} at term {:?}",
                request.previous_leader,
                request.term
            );
            self.assume_leadership(StateChangeReason::PromotedBy(request.previous_leader));
        }

        Ok(PromoteReply {
            success,
            node_id: self.my_replica_id,
        })
    }

    fn ensure_running(&self) -> Result<(), RpcHandlerError> {
        if self.is_running() {
            Ok(())
        } else {
            Err(RpcHandlerError::NodeStopped)
        }
    }

    /// Caller has checked `term >= current term`.
    fn accept_authority(&mut self, term: Term, leader_id: ReplicaId) {
        self.local_state.store_term_if_increased(term);
        self.leader_id = Some(leader_id);
        self.refresh_heartbeat();

        if self.role != Role::Follower {
            self.transition_role(Role::Follower, StateChangeReason::FollowLeader(leader_id));
        }
    }

    // ------- Leader-side replies -------

    pub(crate) fn handle_heartbeat_reply_from_peer(&mut self, input: HeartbeatReplyFromPeer) {
        if !self.is_running() || self.role != Role::Leader || input.sent_term != self.local_state.current_term() {
            return;
        }

        let follower_length = input.reply.log_length;
        if follower_length >= self.local_log.len() {
            return;
        }

        let entries = self.local_log.entries_from(follower_length);
        slog::info!(
            self.logger,
            "Peer {:?} is behind ({} < {}). Sending {} entries.",
            input.peer_id,
            follower_length,
            self.local_log.len(),
            entries.len()
        );
        self.peer_calls.catch_up(
            input.peer_id,
            CatchUpRequest {
                leader_id: self.my_replica_id,
                term: self.local_state.current_term(),
                entries,
                leader_commit: self.local_log.commit_index(),
            },
        );
    }

    pub(crate) fn handle_catch_up_reply_from_peer(&mut self, input: CatchUpReplyFromPeer) {
        if !input.reply.success {
            return;
        }
        for index in input.sent_indices {
            if index < input.reply.log_length {
                self.acks.record(index, input.peer_id);
            }
        }
    }

    // ------- Timers -------

    pub(crate) fn handle_timer_tick(&mut self, tick: TimerTick) {
        if !self.is_running() {
            return;
        }

        match tick {
            TimerTick::FailureDetector => self.check_failure_detector(),
            TimerTick::Heartbeat => {
                if self.role == Role::Leader {
                    self.send_heartbeats();
                }
            }
            TimerTick::Bootstrap => {
                if self.role != Role::Leader {
                    slog::info!(self.logger, "Startup delay elapsed. Taking leadership as bootstrap node.");
                    self.become_leader();
                }
            }
            TimerTick::CandidatePromotion { term } => {
                if self.role == Role::Candidate && self.local_state.current_term() == term {
                    self.become_leader();
                }
            }
        }
    }

    fn check_failure_detector(&mut self) {
        match self.role {
            Role::Follower => {
                let elapsed = self.clock.now().saturating_duration_since(self.last_heartbeat);
                if elapsed > self.options.election_timeout {
                    slog::info!(self.logger, "No heartbeat for {:?}. Starting election.", elapsed);
                    self.start_candidacy();
                }
            }
            Role::Leader => {
                if self.rng.gen_bool(self.options.leadership_handoff_probability) {
                    self.hand_off_leadership();
                }
            }
            Role::Candidate | Role::Stopped => {}
        }
    }

    // No votes are requested. A candidate that is not interrupted by a heartbeat within the
    // promotion delay takes leadership on its own, so two leaders can coexist until one hears a
    // higher term.
    fn start_candidacy(&mut self) {
        let stop_check = match self.running.as_ref() {
            Some(running) => running.stop_check.clone(),
            None => return,
        };

        let term = self.local_state.increment_term_and_vote_for_self();
        self.transition_role(Role::Candidate, StateChangeReason::ElectionTimeout);
        timers::spawn_delay(
            self.clock.clone(),
            self.options.candidate_promotion_delay,
            TimerTick::CandidatePromotion { term },
            self.actor_client.clone(),
            stop_check,
        );
    }

    fn hand_off_leadership(&mut self) {
        let term = self.local_state.increment_term();
        let members = self.cluster.member_ids();
        let chosen = members[self.rng.gen_range(0..members.len())];

        if chosen == self.my_replica_id {
            slog::info!(self.logger, "Leadership handoff re-elected me at term {:?}", term);
            self.transition_role(Role::Leader, StateChangeReason::Reelected);
            return;
        }

        slog::info!(self.logger, "Handing leadership to {:?} at term {:?}", chosen, term);
        self.leader_id = Some(chosen);
        self.refresh_heartbeat();
        self.transition_role(Role::Follower, StateChangeReason::FollowLeader(chosen));
        self.peer_calls.promote(chosen, term, self.my_replica_id);
    }

    /// Take leadership without an election, in a new term.
    fn become_leader(&mut self) {
        self.local_state.increment_term_and_vote_for_self();
        self.assume_leadership(StateChangeReason::BecameLeader);
    }

    fn assume_leadership(&mut self, reason: StateChangeReason) {
        self.leader_id = Some(self.my_replica_id);
        self.transition_role(Role::Leader, reason);
        self.send_heartbeats();
    }

    fn send_heartbeats(&mut self) {
        self.refresh_heartbeat();
        let request = HeartbeatRequest {
            leader_id: self.my_replica_id,
            term: self.local_state.current_term(),
            leader_commit: self.local_log.commit_index(),
            leader_log_length: self.local_log.len(),
        };
        self.peer_calls.broadcast_heartbeats(self.cluster.peer_ids(), request);
    }

    fn refresh_heartbeat(&mut self) {
        self.last_heartbeat = self.clock.now();
        self.last_heartbeat_at = Utc::now();
    }

    fn transition_role(&mut self, new_role: Role, reason: StateChangeReason) {
        let old_role = self.role;
        self.role = new_role;
        slog::info!(
            self.logger,
            "{} -> {} at term {:?} ({:?})",
            old_role,
            new_role,
            self.local_state.current_term(),
            reason
        );
        self.record_event(EventKind::StateChange {
            old_role,
            new_role,
            reason,
        });
        self.notify_subscribers();
    }

    fn record_event(&mut self, kind: EventKind) {
        self.events.push(NodeEvent {
            timestamp: Utc::now(),
            node_id: self.my_replica_id,
            term: self.local_state.current_term(),
            kind,
        });
    }

    fn notify_subscribers(&self) {
        self.subscribers.broadcast(&self.status());
    }

    // ------- Observability -------

    pub(crate) fn status(&self) -> NodeStatus {
        let (term, voted_for) = self.local_state.voted_for_current_term();
        NodeStatus {
            node_id: self.my_replica_id,
            role: self.role,
            term,
            voted_for,
            log_length: self.local_log.len(),
            commit_index: self.local_log.commit_index(),
            last_heartbeat: self.last_heartbeat_at,
            leader_id: self.leader_id,
            running: self.is_running(),
        }
    }

    pub(crate) fn leader_info(&self) -> LeaderInfo {
        LeaderInfo {
            leader_id: self.leader_id,
            this_node_id: self.my_replica_id,
            is_leader: self.role == Role::Leader,
        }
    }

    pub(crate) fn recent_events(&self, limit: usize) -> Vec<NodeEvent> {
        self.events.recent(limit)
    }

    pub(crate) fn log_entries(&self) -> Vec<LogEntry> {
        self.local_log.entries().to_vec()
    }

    pub(crate) fn log_with_replication(&self) -> Vec<ReplicatedEntry> {
        let members = self.cluster.member_ids();
        self.local_log
            .entries()
            .iter()
            .map(|entry| ReplicatedEntry {
                entry: entry.clone(),
                replication: self.acks.status(entry.index, &members),
            })
            .collect()
    }

    pub(crate) fn replication_status(&self, index: u64) -> BTreeMap<ReplicaId, bool> {
        self.acks.status(index, &self.cluster.member_ids())
    }

    pub(crate) fn cluster_snapshot(&self) -> ClusterSnapshot {
        ClusterSnapshot {
            this_node: self.status(),
            cluster_nodes: self.cluster.member_ids(),
            leader_id: self.leader_id,
            term: self.local_state.current_term(),
        }
    }

    pub(crate) fn latest_value(&self, key: &str) -> Option<LogEntry> {
        self.local_log.latest_for_key(key).cloned()
    }

    pub(crate) fn subscribe(&mut self, subscription: Subscription) -> SubscriberId {
        self.subscribers.subscribe(subscription.0)
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
