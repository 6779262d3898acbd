use crate::actor::WeakActorClient;
use crate::replica::replica_api::TimerTick;
use crate::replica::timers::stop_signal::RunStopCheck;
use crate::replica::timers::time::Clock;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

/// Spawn a task that sends `tick` to the actor every `interval` until the run stops or the actor
/// goes away.
pub(crate) fn spawn_ticker<C: Clock>(
    clock: C,
    interval: Duration,
    tick: TimerTick,
    actor_client: WeakActorClient,
    stop_check: RunStopCheck,
) -> JoinHandle<()> {
    let task = TickerTask::new(clock, interval, tick, actor_client, stop_check);
    tokio::task::spawn(task.run())
}

pub(crate) struct TickerTask<C: Clock> {
    clock: C,
    interval: Duration,
    next_wake: Instant,
    tick: TimerTick,
    actor_client: WeakActorClient,
    stop_check: RunStopCheck,
}

impl<C: Clock> TickerTask<C> {
    pub(crate) fn new(
        clock: C,
        interval: Duration,
        tick: TimerTick,
        actor_client: WeakActorClient,
        stop_check: RunStopCheck,
    ) -> Self {
        let next_wake = clock.now() + interval;
        TickerTask {
            clock,
            interval,
            next_wake,
            tick,
            actor_client,
            stop_check,
        }
    }

    pub(crate) async fn run(mut self) {
        loop {
            self.clock.sleep_until(self.next_wake).await;

            if self.stop_check.should_stop() {
                return;
            }
            if self.actor_client.timer_tick(self.tick.clone()).await.is_err() {
                return;
            }

            // Measured from after delivery, so a large clock jump yields one tick, not a burst.
            self.next_wake = self.clock.now() + self.interval;
        }
    }
}
