mod delay;
mod stop_signal;
#[cfg(test)]
mod test_utils;
mod ticker;
mod time;

pub(crate) use delay::spawn_delay;
pub(crate) use stop_signal::{RunStopCheck, RunStopper};
pub(crate) use ticker::spawn_ticker;
pub(crate) use time::Clock;
#[cfg(test)]
pub(crate) use time::{mocked_clock, MockClockController};
pub(crate) use time::RealClock;
