use std::cell::Cell;

/// Host hook that arranges for the next frame callback.
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl<F: Fn()> FrameScheduler for F {
    fn request_frame(&self) {
        self()
    }
}

/// Scheduler that only counts requests; the caller drives frames itself.
#[derive(Debug, Default)]
pub struct FrameRequests {
    pending: Cell<u64>,
}

impl FrameRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> u64 {
        self.pending.get()
    }

    /// Consume one request; false if none was outstanding.
    pub fn take(&self) -> bool {
        match self.pending.get() {
            0 => false,
            n => {
                self.pending.set(n - 1);
                true
            }
        }
    }
}

impl FrameScheduler for FrameRequests {
    fn request_frame(&self) {
        self.pending.set(self.pending.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_consumes_requests() {
        let requests = FrameRequests::new();
        assert!(!requests.take());
        requests.request_frame();
        requests.request_frame();
        assert_eq!(requests.pending(), 2);
        assert!(requests.take());
        assert!(requests.take());
        assert!(!requests.take());
    }

    #[test]
    fn closures_schedule() {
        let hits = Cell::new(0);
        let scheduler = || hits.set(hits.get() + 1);
        scheduler.request_frame();
        scheduler.request_frame();
        assert_eq!(hits.get(), 2);
    }
}
