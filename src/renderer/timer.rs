use std::time::{Duration, Instant};

/// Monotonic clock driving the host loop.
pub trait Timer {
    /// Time elapsed since the timer was created.
    fn now(&self) -> Duration;

    /// Wait until `deadline` has been reached.
    fn sleep_until(&mut self, deadline: Duration);
}

/// Wall clock timer.
#[derive(Debug, Clone)]
pub struct NativeTimer {
    origin: Instant,
}

impl NativeTimer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for NativeTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for NativeTimer {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep_until(&mut self, deadline: Duration) {
        let now = self.now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}

/// Simulated clock that jumps straight to each deadline.
///
/// Scene timing becomes independent of the machine, while render cost is
/// still measured with the wall clock by the display.
#[derive(Debug, Clone, Default)]
pub struct VirtualTimer {
    now: Duration,
}

impl VirtualTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Timer for VirtualTimer {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep_until(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}
