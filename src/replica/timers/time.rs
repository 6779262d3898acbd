#[cfg(test)]
use tokio::sync::watch;
#[cfg(test)]
use tokio::time::Duration;
use tokio::time::Instant;

#[async_trait::async_trait]
pub(crate) trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    async fn sleep_until(&mut self, deadline: Instant);
}

#[derive(Copy, Clone)]
pub(crate) struct RealClock;

#[async_trait::async_trait]
impl Clock for RealClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now()
    }

    async fn sleep_until(&mut self, deadline: Instant) {
        tokio::time::sleep_until(deadline).await;
    }
}

#[cfg(test)]
pub(crate) fn mocked_clock() -> (MockClock, MockClockController) {
    let now = Instant::now();
    let (tx, rx) = watch::channel(now);
    let sleeper = MockClock { current_time: rx };
    let controller = MockClockController { current_time: tx };

    (sleeper, controller)
}

#[cfg(test)]
#[derive(Clone)]
pub(crate) struct MockClock {
    current_time: watch::Receiver<Instant>,
}

#[cfg(test)]
#[async_trait::async_trait]
impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self.current_time.borrow()
    }

    async fn sleep_until(&mut self, deadline: Instant) {
        loop {
            if *self.current_time.borrow() >= deadline {
                return;
            }

            if self.current_time.changed().await.is_err() {
                // Controller dropped, time will never advance again.
                futures::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
pub(crate) struct MockClockController {
    current_time: watch::Sender<Instant>,
}

#[cfg(test)]
impl MockClockController {
    /// Sleepers wake once `now` reaches their deadline. Several deadlines passed in one step
    /// all fire, but in no particular interleaving with other tasks.
    pub(crate) fn advance(&mut self, duration: Duration) {
        let new_now = *self.current_time.borrow() + duration;
        let _ = self.current_time.send(new_now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn sleeper_wakes_only_after_deadline() {
        let (mut clock, mut controller) = mocked_clock();
        let deadline = clock.now() + Duration::from_secs(5);
        let (tx, mut rx) = oneshot::channel();

        tokio::spawn(async move {
            clock.sleep_until(deadline).await;
            let _ = tx.send(());
        });

        controller.advance(Duration::from_secs(4));
        tokio::time::timeout(Duration::from_millis(50), &mut rx)
            .await
            .expect_err("Woke before the deadline");

        controller.advance(Duration::from_secs(1));
        tokio::time::timeout(Duration::from_secs(1), rx)
            .await
            .expect("Did not wake at the deadline")
            .unwrap();
    }

    #[tokio::test]
    async fn now_follows_controller() {
        let (clock, mut controller) = mocked_clock();
        let start = clock.now();

        controller.advance(Duration::from_millis(1500));

        assert_eq!(clock.now() - start, Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn sleeper_parks_when_controller_is_dropped() {
        let (mut clock, controller) = mocked_clock();
        let deadline = clock.now() + Duration::from_secs(1);
        drop(controller);

        tokio::time::timeout(Duration::from_millis(50), clock.sleep_until(deadline))
            .await
            .expect_err("Time advanced without a controller");
    }
}
