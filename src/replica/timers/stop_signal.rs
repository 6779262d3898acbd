use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Held by the replica for as long as the node is running. Dropping it tells every timer task
/// spawned during this run to exit.
pub(crate) struct RunStopper {
    stop_signal: Arc<AtomicBool>,
}

#[derive(Clone)]
pub(crate) struct RunStopCheck {
    stop_signal: Arc<AtomicBool>,
}

impl Drop for RunStopper {
    fn drop(&mut self) {
        self.stop_signal.store(true, Ordering::Release);
    }
}

impl RunStopCheck {
    pub(crate) fn should_stop(&self) -> bool {
        self.stop_signal.load(Ordering::Acquire)
    }
}

impl RunStopper {
    pub(crate) fn new() -> (RunStopper, RunStopCheck) {
        let stop_signal = Arc::new(AtomicBool::new(false));

        let stopper = RunStopper {
            stop_signal: stop_signal.clone(),
        };
        let stop_check = RunStopCheck { stop_signal };

        (stopper, stop_check)
    }
}
