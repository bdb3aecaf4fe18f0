// Clock Port (for testability)

/// Wall-clock interface (allows fixed time in tests)
pub trait Clock: Send + Sync {
    /// Current time in nanoseconds since the Unix epoch
    fn now_nanos(&self) -> i64;
}

/// System clock (production)
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        let now = chrono::Utc::now();
        // Outside the ~1677..2262 range nanos overflow; fall back to micro precision
        now.timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().wrapping_mul(1000))
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// Clock frozen at a fixed instant
    pub struct FixedClock(pub i64);

    impl Clock for FixedClock {
        fn now_nanos(&self) -> i64 {
            self.0
        }
    }
}
