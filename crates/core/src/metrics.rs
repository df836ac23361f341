//! Metrics collection for cipher runs.
//!
//! This module records what a pipeline did to a message:
//! - Which cipher ran and in which direction
//! - Stream length before and after every stage
//! - Characters dropped while preparing the text
//! - Timing information
//!
//! # Design
//!
//! Metrics are a plain struct updated explicitly as each stage finishes.
//! Nothing is recorded unless the caller asks for a traced run, so the
//! regular `encrypt`/`decrypt` paths carry no overhead.
//!
//! # Thread Safety
//!
//! `PipelineMetrics` is NOT thread-safe. Runs are single-threaded; collect
//! one value per run.

use crate::keystream::Direction;
use std::time::{Duration, Instant};

/// Length of the stream around one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    /// Stage label, e.g. `columnar(key)`
    pub stage: String,

    /// Items entering the stage
    pub input_len: usize,

    /// Items leaving the stage
    pub output_len: usize,
}

/// Metrics for one encrypt or decrypt run.
#[derive(Debug, Clone)]
pub struct PipelineMetrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Identity ===
    /// Cipher name
    pub cipher: String,

    /// Encrypt or decrypt
    pub direction: Direction,

    // === Text ===
    /// Characters in the caller's input
    pub raw_chars: usize,

    /// Characters dropped by text preparation
    pub skipped_chars: usize,

    /// Symbols entering the first stage
    pub input_symbols: usize,

    /// Symbols leaving the last stage
    pub output_symbols: usize,

    // === Stages ===
    /// One record per stage, in execution order
    pub stages: Vec<StageRecord>,

    // === Keystream ===
    /// Key window after the last keystream step (chain addition)
    pub final_key: Option<Vec<u32>>,
}

impl PipelineMetrics {
    /// Create new metrics with start time set to now.
    pub fn new(cipher: &str, direction: Direction) -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            cipher: cipher.to_string(),
            direction,
            raw_chars: 0,
            skipped_chars: 0,
            input_symbols: 0,
            output_symbols: 0,
            stages: Vec::new(),
            final_key: None,
        }
    }

    /// Record one finished stage.
    pub fn record(&mut self, stage: String, input_len: usize, output_len: usize) {
        if self.stages.is_empty() {
            self.input_symbols = input_len;
        }
        self.output_symbols = output_len;
        self.stages.push(StageRecord {
            stage,
            input_len,
            output_len,
        });
    }

    /// Record text preparation: `raw` characters given, `kept` processed.
    pub fn record_text(&mut self, raw: usize, kept: usize) {
        self.raw_chars = raw;
        self.skipped_chars = raw.saturating_sub(kept);
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Output length over input length.
    ///
    /// Returns 0.0 if nothing was processed.
    pub fn expansion_ratio(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.output_symbols as f64 / self.input_symbols as f64
        }
    }

    /// Share of input characters dropped by text preparation.
    pub fn skip_rate(&self) -> f64 {
        if self.raw_chars == 0 {
            0.0
        } else {
            self.skipped_chars as f64 / self.raw_chars as f64
        }
    }

    /// Symbols processed per second.
    pub fn throughput(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_symbols as f64 / duration_secs
        }
    }

    /// Human-readable multi-line summary.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "=== {} ({}) ===\nDuration: {} us\nSymbols: {} -> {} ({:.2}x)\n",
            self.cipher,
            self.direction,
            self.duration().as_micros(),
            self.input_symbols,
            self.output_symbols,
            self.expansion_ratio(),
        );
        if self.skipped_chars > 0 {
            out.push_str(&format!(
                "Skipped: {} of {} characters\n",
                self.skipped_chars, self.raw_chars
            ));
        }
        for (i, record) in self.stages.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {}: {} -> {}\n",
                i + 1,
                record.stage,
                record.input_len,
                record.output_len
            ));
        }
        out
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        let mut out = format!(
            "cipher={}\n\
             direction={}\n\
             duration_us={}\n\
             raw_chars={}\n\
             skipped_chars={}\n\
             input_symbols={}\n\
             output_symbols={}\n\
             expansion_ratio={:.4}\n\
             stages={}\n",
            self.cipher,
            self.direction,
            self.duration().as_micros(),
            self.raw_chars,
            self.skipped_chars,
            self.input_symbols,
            self.output_symbols,
            self.expansion_ratio(),
            self.stages.len(),
        );
        for (i, record) in self.stages.iter().enumerate() {
            out.push_str(&format!(
                "stage.{}={}:{}:{}\n",
                i, record.stage, record.input_len, record.output_len
            ));
        }
        if let Some(key) = &self.final_key {
            let digits: Vec<String> = key.iter().map(|k| k.to_string()).collect();
            out.push_str(&format!("final_key={}\n", digits.join(",")));
        }
        out
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new("unnamed", Direction::Encrypt)
    }
}
