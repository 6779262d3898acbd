use crate::actor::WeakActorClient;
use crate::replica::replica_api::TimerTick;
use crate::replica::timers::stop_signal::RunStopCheck;
use crate::replica::timers::time::Clock;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Send `tick` to the actor once, after `delay`, unless the run has stopped by then.
pub(crate) fn spawn_delay<C: Clock>(
    mut clock: C,
    delay: Duration,
    tick: TimerTick,
    actor_client: WeakActorClient,
    stop_check: RunStopCheck,
) -> JoinHandle<()> {
    let deadline = clock.now() + delay;
    tokio::task::spawn(async move {
        clock.sleep_until(deadline).await;
        if !stop_check.should_stop() {
            let _ = actor_client.timer_tick(tick).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorClient;
    use crate::replica::timers::stop_signal::RunStopper;
    use crate::replica::timers::test_utils::TestUtilActor;
    use crate::replica::timers::time;
    use crate::replica::Term;

    #[tokio::test]
    async fn fires_once_after_delay() {
        let delay = Duration::from_millis(500);
        let (strong_actor_client, rx) = ActorClient::new(10);
        let mut actor = TestUtilActor::new(rx);
        let (mock_clock, mut controller) = time::mocked_clock();
        let (_stopper, stop_check) = RunStopper::new();
        let tick = TimerTick::CandidatePromotion { term: Term::new(4) };

        let join_handle = spawn_delay(mock_clock, delay, tick.clone(), strong_actor_client.weak(), stop_check);

        controller.advance(delay / 2);
        actor.assert_no_event().await;

        controller.advance(delay / 2);
        actor.assert_timer_tick(tick).await;
        join_handle.await.unwrap();
        actor.assert_no_event().await;
    }

    #[tokio::test]
    async fn stopped_run_suppresses_delay() {
        let delay = Duration::from_millis(500);
        let (strong_actor_client, rx) = ActorClient::new(10);
        let mut actor = TestUtilActor::new(rx);
        let (mock_clock, mut controller) = time::mocked_clock();
        let (stopper, stop_check) = RunStopper::new();

        let join_handle = spawn_delay(
            mock_clock,
            delay,
            TimerTick::Bootstrap,
            strong_actor_client.weak(),
            stop_check,
        );

        drop(stopper);
        controller.advance(delay);
        join_handle.await.unwrap();
        actor.assert_no_event().await;
    }
}
