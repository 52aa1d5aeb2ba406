//! Millisecond stopwatch behind the per-step perf stats.

/// Current time in milliseconds. `Date.now()` in the browser; natively, time
/// since the first call in this process.
fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::sync::OnceLock;
        use std::time::Instant;

        static EPOCH: OnceLock<Instant> = OnceLock::new();
        EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PerfTimer {
    started_ms: f64,
}

impl PerfTimer {
    /// A running timer while perf metrics are on; `None` costs no clock read.
    pub(crate) fn start_if(enabled: bool) -> Option<Self> {
        enabled.then(|| PerfTimer { started_ms: now_ms() })
    }

    /// Milliseconds since the timer started. `Date.now()` can step back, so
    /// this is clamped at zero.
    pub(crate) fn elapsed_ms(&self) -> f64 {
        (now_ms() - self.started_ms).max(0.0)
    }

    pub(crate) fn add_to(self, total_ms: &mut f64) {
        *total_ms += self.elapsed_ms();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_timer_is_absent() {
        assert!(PerfTimer::start_if(false).is_none());
    }

    #[test]
    fn elapsed_time_accumulates() {
        let timer = PerfTimer::start_if(true).unwrap();
        let mut total = 1.5;
        timer.add_to(&mut total);
        assert!(total >= 1.5);
        assert!(timer.elapsed_ms() >= total - 1.5);
    }
}
