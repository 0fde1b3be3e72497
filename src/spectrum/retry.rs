use std::time::{Duration, Instant};
use log::{debug, info};
use crate::backend::DeviceBackend;
/// Blind periodic spectrum re-request, gated by the connection flag.
///
/// Nothing tracks outstanding requests; duplicates in flight are fine. The
/// gate is checked only when `tick` runs.
#[derive(Debug)]
pub struct RetryScheduler {
    interval: Duration,
    connected: bool,
    last_request: Option<Instant>,
}
impl RetryScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            connected: false,
            last_request: None,
        }
    }
    /// Feeds a connection-state notification. The false -> true edge issues one
    /// request immediately and restarts the interval.
    pub fn set_connected(&mut self, connected: bool, now: Instant, backend: &mut dyn DeviceBackend) {
        let was = self.connected;
        self.connected = connected;
        if connected && !was {
            info!("backend connected, requesting spectrum");
            backend.request_spectrum();
            self.last_request = Some(now);
        } else if !connected && was {
            info!("backend disconnected, spectrum retries stopped");
            self.last_request = None;
        }
    }
    /// Issues a request if connected and a full interval has elapsed.
    /// Returns whether it fired.
    pub fn tick(&mut self, now: Instant, backend: &mut dyn DeviceBackend) -> bool {
        if !self.connected {
            return false;
        }
        let due = match self.last_request {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if due {
            debug!("retry tick: re-requesting spectrum");
            backend.request_spectrum();
            self.last_request = Some(now);
        }
        due
    }
    /// Time left until the next tick would fire, if connected.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        if !self.connected {
            return None;
        }
        Some(match self.last_request {
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        })
    }
}
