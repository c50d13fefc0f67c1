//! Simulated generation engine
//!
//! Latency model from the source system: a flat base per mode plus one
//! millisecond per 300 bytes of context.

use std::time::Duration;
use tokio::time::sleep;

/// Base generation latency in cheap mode, milliseconds
const CHEAP_BASE_MS: u64 = 12;

/// Base generation latency in normal mode, milliseconds
const NORMAL_BASE_MS: u64 = 20;

/// Bytes of context per extra millisecond of generation latency
const BYTES_PER_MS: usize = 300;

/// Produce an answer grounded in the assembled context
///
/// Sleeps for the simulated generation time, then returns a stable answer
/// string that reports how much context it was grounded in.
pub async fn generate(question: &str, context: &str, cheap_mode: bool) -> String {
    let base = if cheap_mode { CHEAP_BASE_MS } else { NORMAL_BASE_MS };
    let extra = (context.len() / BYTES_PER_MS) as u64;
    sleep(Duration::from_millis(base + extra)).await;

    format!(
        "Answer: {}\n(grounded in {} bytes of context)",
        question,
        context.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_answer_reports_context_size() {
        let answer = generate("what is rag latency?", "some context", false).await;
        assert!(answer.starts_with("Answer: what is rag latency?"));
        assert!(answer.contains("12 bytes of context"));
    }

    #[tokio::test]
    async fn test_mode_sets_base_latency() {
        let start = Instant::now();
        generate("q", "", true).await;
        assert!(start.elapsed() >= Duration::from_millis(12));

        let start = Instant::now();
        generate("q", "", false).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_longer_context_costs_more() {
        let long_context = "x".repeat(3000);

        let start = Instant::now();
        generate("q", &long_context, true).await;
        let with_context = start.elapsed();

        // 3000 bytes adds 10ms on top of the 12ms base
        assert!(with_context >= Duration::from_millis(22));
    }
}
