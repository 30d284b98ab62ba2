//! The record loop: generate, emit, wait, repeat.
use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::record::RecordGenerator;
use crate::sink::Sink;
use rand::Rng;
use std::time::Duration;

/// Random pause between consecutive records.
///
/// A pause is `unit * n` where `n` is drawn uniformly from `lower..=upper`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    lower: u32,
    upper: u32,
    unit: Duration,
}

impl Default for Interval {
    /// Two, three or four seconds, so records are always between 2 and 5
    /// seconds apart.
    fn default() -> Self {
        Interval {
            lower: 2,
            upper: 4,
            unit: Duration::from_secs(1),
        }
    }
}

impl Interval {
    /// Pauses of `lower..=upper` multiples of `unit`. The bounds are swapped
    /// if given in the wrong order.
    pub fn new(lower: u32, upper: u32, unit: Duration) -> Self {
        Interval {
            lower: lower.min(upper),
            upper: lower.max(upper),
            unit,
        }
    }

    /// Shortest possible pause.
    pub fn min(&self) -> Duration {
        self.unit * self.lower
    }

    /// Longest possible pause.
    pub fn max(&self) -> Duration {
        self.unit * self.upper
    }

    /// Draw a pause from `rng`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        self.unit * rng.random_range(self.lower..=self.upper)
    }
}

/// Drives a [`Sink`] with freshly generated records until cancelled, until
/// the optional record budget is spent, or until the sink fails.
#[derive(Debug)]
pub struct Emitter<S, R> {
    sink: S,
    records: RecordGenerator<R>,
    interval: Interval,
    max_records: Option<u64>,
    cancel: CancellationToken,
}

impl<S: Sink, R: Rng> Emitter<S, R> {
    /// Emit to `sink` using `rng` for every random choice.
    pub fn new(sink: S, rng: R) -> Self {
        Emitter {
            sink,
            records: RecordGenerator::new(rng),
            interval: Interval::default(),
            max_records: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Override the pause between records.
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Stop after `max_records` records. `None` runs until cancelled.
    pub fn with_max_records(mut self, max_records: Option<u64>) -> Self {
        self.max_records = max_records;
        self
    }

    /// Stop when `cancel` is cancelled, including in the middle of a pause.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle that stops this emitter.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the loop and shut the sink down. Returns the number of records
    /// emitted.
    ///
    /// The first emit failure ends the run: the sink is shut down on a best
    /// effort basis and the emit error is returned.
    pub fn run(mut self) -> Result<u64> {
        let mut emitted = 0u64;

        while !self.cancel.is_cancelled() {
            let record = self.records.next_record();
            if let Err(err) = self.sink.emit(&record) {
                tracing::error!(name: "Emitter.EmitFailed", emitted = emitted, error = %err);
                if let Err(close_err) = self.sink.shutdown() {
                    tracing::warn!(name: "Emitter.ShutdownFailed", error = %close_err);
                }
                return Err(err);
            }
            emitted += 1;
            tracing::trace!(
                name: "Emitter.RecordEmitted",
                level = record.level.as_str(),
                body = record.message
            );

            if self.max_records.is_some_and(|max| emitted >= max) {
                break;
            }

            let pause = self.interval.sample(self.records.rng_mut());
            if self.cancel.wait_timeout(pause) {
                break;
            }
        }

        tracing::info!(name: "Emitter.Stopped", emitted = emitted, cancelled = self.cancel.is_cancelled());
        self.sink.shutdown()?;
        Ok(emitted)
    }
}
