//! Burst control for repetitive log records
//!
//! Within each counting window (`tick`), the first `initial` records sharing
//! a level and message are kept; after that only every `thereafter`-th one
//! is. A hot loop that logs the same line cannot flood the output, but a
//! persistent condition still shows up once per `thereafter` occurrences.
//!
//! # Example
//!
//! ```
//! use rust_log_facade::{LogLevel, LogSampler, SamplingConfig};
//!
//! let sampler = LogSampler::new(SamplingConfig::default());
//! let kept = (0..250)
//!     .filter(|_| sampler.should_sample(LogLevel::Info, "retrying"))
//!     .count();
//! assert_eq!(kept, 101);
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters per level; messages hash into these slots.
const COUNTERS_PER_LEVEL: usize = 4096;
const LEVEL_COUNT: usize = 5;

/// Configuration for burst control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Length of one counting window
    pub tick: Duration,

    /// Records per window kept unconditionally
    pub initial: u64,

    /// After `initial`, keep every `thereafter`-th record (0 drops the rest)
    pub thereafter: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            initial: 100,
            thereafter: 100,
        }
    }
}

impl SamplingConfig {
    pub fn new(tick: Duration, initial: u64, thereafter: u64) -> Self {
        Self {
            tick,
            initial,
            thereafter,
        }
    }

    /// Check the policy can be turned into a sampler
    pub fn validate(&self) -> Result<()> {
        if self.tick.is_zero() {
            return Err(LoggerError::encoder_build(
                "sampling tick must be a positive duration",
            ));
        }
        Ok(())
    }
}

/// One window counter, shared by every message hashing to its slot
#[derive(Debug, Default)]
struct Counter {
    /// Sampler-relative nanos at which the window expires
    reset_at: AtomicU64,
    count: AtomicU64,
}

impl Counter {
    /// Count one record at `now`, starting a new window if the last expired
    fn inc_check_reset(&self, now: u64, tick: u64) -> u64 {
        let reset_after = self.reset_at.load(Ordering::Acquire);
        if reset_after > now {
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }

        self.count.store(1, Ordering::Release);
        let new_reset_after = now.saturating_add(tick);
        if self
            .reset_at
            .compare_exchange(reset_after, new_reset_after, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // Another thread opened the window first
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }
        1
    }
}

/// Per-level, per-message counting sampler
///
/// Thread-safe: counters are atomics, no lock is taken on the hot path.
/// Dropped records are counted by the owning logger's `LoggerMetrics`.
pub struct LogSampler {
    config: SamplingConfig,
    tick_nanos: u64,
    start: Instant,
    counters: Vec<Counter>,
}

impl LogSampler {
    pub fn new(config: SamplingConfig) -> Self {
        let tick_nanos = u64::try_from(config.tick.as_nanos()).unwrap_or(u64::MAX);
        let counters = (0..LEVEL_COUNT * COUNTERS_PER_LEVEL)
            .map(|_| Counter::default())
            .collect();
        Self {
            config,
            tick_nanos,
            start: Instant::now(),
            counters,
        }
    }

    /// Decide whether a record with this level and message is kept
    pub fn should_sample(&self, level: LogLevel, message: &str) -> bool {
        let now = u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.check_at(level, message, now)
    }

    fn check_at(&self, level: LogLevel, message: &str, now: u64) -> bool {
        let slot = level.as_index() * COUNTERS_PER_LEVEL
            + (fnv1a(message) as usize % COUNTERS_PER_LEVEL);
        let n = self.counters[slot].inc_check_reset(now, self.tick_nanos);
        n <= self.config.initial
            || (self.config.thereafter > 0
                && (n - self.config.initial) % self.config.thereafter == 0)
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }
}

impl std::fmt::Debug for LogSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSampler")
            .field("config", &self.config)
            .finish()
    }
}

/// 32-bit FNV-1a
fn fnv1a(s: &str) -> u32 {
    const OFFSET: u32 = 2_166_136_261;
    const PRIME: u32 = 16_777_619;
    s.bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u32::from(byte)).wrapping_mul(PRIME))
}
