//! Loop detection over recent conversation history.
//!
//! An agent that keeps producing the same answer is stalled, not progressing.
//! The detector looks at the trailing window of the conversation, restricts
//! it to attributed agent messages from the most recent producer, and applies
//! three rules in order: exact trimmed match, whitespace-collapsed match, and
//! a near-duplicate rule for long answers that differ only by cosmetic drift.
//!
//! This is a heuristic, not semantic equality: paraphrased repeats slip
//! through, and that's accepted. Same-producer restriction, recency
//! windowing, and the prefix requirement keep false positives rare.

use switchboard_config::LoopDetectionConfig;
use switchboard_core::Message;
use tracing::debug;

/// Tunable loop-detection policy.
#[derive(Debug, Clone)]
pub struct LoopPolicy {
    /// How many trailing messages to inspect.
    pub window: usize,
    /// Minimum trimmed length (chars) before the near-duplicate rule applies.
    pub min_long_len: usize,
    /// Prefix length (chars) compared by the near-duplicate rule.
    pub prefix_len: usize,
    /// Relative length difference below which near-duplicates count as a loop.
    pub max_len_ratio: f64,
}

impl Default for LoopPolicy {
    fn default() -> Self {
        Self {
            window: 8,
            min_long_len: 50,
            prefix_len: 150,
            max_len_ratio: 0.05,
        }
    }
}

impl From<&LoopDetectionConfig> for LoopPolicy {
    fn from(config: &LoopDetectionConfig) -> Self {
        Self {
            window: config.window,
            min_long_len: config.min_long_len,
            prefix_len: config.prefix_len,
            max_len_ratio: config.max_len_ratio,
        }
    }
}

/// Detects repetitive stalls in a conversation.
#[derive(Debug, Clone, Default)]
pub struct LoopDetector {
    policy: LoopPolicy,
}

impl LoopDetector {
    pub fn new(policy: LoopPolicy) -> Self {
        Self { policy }
    }

    /// Whether the most recent producer is repeating itself.
    ///
    /// The window is recomputed from scratch on every call — the conversation
    /// is append-only, so there is nothing worth caching across turns.
    pub fn is_loop(&self, history: &[Message]) -> bool {
        let window_start = history.len().saturating_sub(self.policy.window);
        let qualifying: Vec<&Message> = history[window_start..]
            .iter()
            .filter(|m| m.is_attributed_agent())
            .collect();

        if qualifying.len() < 2 {
            return false;
        }

        // Only compare the most recent producer against itself.
        let Some(last) = qualifying.last() else {
            return false;
        };
        let same_producer: Vec<&&Message> = qualifying
            .iter()
            .filter(|m| m.producer == last.producer)
            .collect();

        if same_producer.len() < 2 {
            return false;
        }

        let a = same_producer[same_producer.len() - 2].content.trim();
        let b = same_producer[same_producer.len() - 1].content.trim();

        if a == b {
            debug!(producer = ?last.producer, "loop: identical trimmed content");
            return true;
        }

        if collapse_whitespace(a) == collapse_whitespace(b) {
            debug!(producer = ?last.producer, "loop: identical after whitespace collapse");
            return true;
        }

        if self.is_near_duplicate(a, b) {
            debug!(producer = ?last.producer, "loop: near-duplicate long answers");
            return true;
        }

        false
    }

    /// Near-duplicate rule: both answers long, identical prefix, and lengths
    /// within the configured ratio. Catches cosmetic formatting drift around
    /// otherwise-repeated long answers.
    fn is_near_duplicate(&self, a: &str, b: &str) -> bool {
        let len_a = a.chars().count();
        let len_b = b.chars().count();

        if len_a <= self.policy.min_long_len || len_b <= self.policy.min_long_len {
            return false;
        }

        // Char-wise prefix comparison; byte slicing could split a code point.
        if !a
            .chars()
            .take(self.policy.prefix_len)
            .eq(b.chars().take(self.policy.prefix_len))
        {
            return false;
        }

        let max_len = len_a.max(len_b);
        if max_len == 0 {
            return false;
        }

        let ratio = (len_a as f64 - len_b as f64).abs() / max_len as f64;
        ratio < self.policy.max_len_ratio
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
