//! Per-request orchestration over the two caches
//!
//! A request runs seven strictly ordered phases with a single concurrency
//! fork: on a retrieval-cache miss, the ranked-candidate computation runs in
//! a background task while the orchestrating task performs a short draft
//! step, then joins. The background task is pure (it touches neither cache),
//! so cache mutation stays confined to the orchestrating task and no lock is
//! needed under the one-request-at-a-time driving model.

use crate::cache::{CacheStats, DocId, LruCache};
use crate::config::ServeConfig;
use crate::context::assemble_context;
use crate::error::Result;
use crate::generation::generate;
use crate::retrieval::{rank_documents, ANN_LATENCY};
use crate::tuner::Knobs;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info};

/// Token budget for context assembly in cheap mode
const CHEAP_TOKEN_BUDGET: u32 = 220;

/// Token budget for context assembly in normal mode
const NORMAL_TOKEN_BUDGET: u32 = 320;

/// Draft-step overlap delay in cheap mode
const CHEAP_DRAFT: Duration = Duration::from_millis(2);

/// Draft-step overlap delay in normal mode
const NORMAL_DRAFT: Duration = Duration::from_millis(3);

/// Per-phase wall-clock timings for one served request
#[derive(Debug, Clone, Serialize)]
pub struct Timings {
    /// Time spent blocked on the retrieval join (~0 on a cache hit)
    pub retrieval_ms: f64,

    /// Time spent assembling the context string
    pub context_ms: f64,

    /// Time spent in the generation step
    pub gen_ms: f64,

    /// End-to-end time from lookup to answer
    pub e2e_ms: f64,

    /// Whether the retrieval cache already held this query
    pub cache_hit: bool,
}

/// One served request: the answer plus what produced it
#[derive(Debug, Clone)]
pub struct Served {
    /// Generated answer text
    pub answer: String,

    /// Document ids the context was assembled from
    pub doc_ids: Vec<DocId>,

    /// Per-phase timings
    pub timings: Timings,
}

/// Request-serving pipeline owning both caches
///
/// Both caches live for the life of the pipeline and are shared across
/// requests; all mutation happens on the task driving `serve`.
pub struct Pipeline {
    config: ServeConfig,
    retrieval_cache: LruCache<String, Vec<DocId>>,
    fragment_cache: LruCache<DocId, String>,
}

impl Pipeline {
    /// Create a pipeline from a validated configuration
    pub fn new(config: ServeConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "Initializing pipeline (retrieval cache: {} entries, fragment cache: {} entries)",
            config.retrieval_cache_entries, config.fragment_cache_entries
        );

        Ok(Self {
            retrieval_cache: LruCache::new(config.retrieval_cache_entries),
            fragment_cache: LruCache::new(config.fragment_cache_entries),
            config,
        })
    }

    /// The configuration this pipeline was built from
    pub fn config(&self) -> &ServeConfig {
        &self.config
    }

    /// Retrieval cache counters
    pub fn retrieval_cache_stats(&self) -> CacheStats {
        self.retrieval_cache.stats()
    }

    /// Fragment cache counters
    pub fn fragment_cache_stats(&self) -> CacheStats {
        self.fragment_cache.stats()
    }

    /// Serve one request with the given knobs
    ///
    /// On a retrieval-cache miss the candidate ranking runs in a spawned
    /// task, overlapped with the draft step here; a fault in that task
    /// surfaces as [`crate::error::RagError::RetrievalTask`] and aborts the
    /// request rather than being papered over with an empty result.
    pub async fn serve(&mut self, question: &str, knobs: &Knobs) -> Result<Served> {
        let request_start = Instant::now();

        let mut doc_ids = Vec::new();
        let mut cache_hit = false;
        if let Some(cached) = self.retrieval_cache.get(question) {
            debug!("Retrieval cache hit: {}", question);
            doc_ids = cached;
            cache_hit = true;
        }

        let retrieval_task = if cache_hit {
            None
        } else {
            debug!("Retrieval cache miss: {}", question);
            let query = question.to_string();
            let top_k = knobs.top_k;
            Some(tokio::spawn(async move {
                sleep(ANN_LATENCY).await;
                rank_documents(&query, top_k)
            }))
        };

        // Draft step overlapping the retrieval task; its output feeds nothing
        sleep(if knobs.cheap_mode { CHEAP_DRAFT } else { NORMAL_DRAFT }).await;

        let join_start = Instant::now();
        if let Some(handle) = retrieval_task {
            doc_ids = handle.await?;
            self.retrieval_cache.put(question.to_string(), doc_ids.clone());
        }
        let retrieval_ms = join_start.elapsed().as_secs_f64() * 1000.0;

        let context_start = Instant::now();
        let token_budget = if knobs.cheap_mode {
            CHEAP_TOKEN_BUDGET
        } else {
            NORMAL_TOKEN_BUDGET
        };
        let context = assemble_context(&doc_ids, &mut self.fragment_cache, token_budget);
        let context_ms = context_start.elapsed().as_secs_f64() * 1000.0;

        let gen_start = Instant::now();
        let answer = generate(question, &context, knobs.cheap_mode).await;
        let gen_ms = gen_start.elapsed().as_secs_f64() * 1000.0;

        let e2e_ms = request_start.elapsed().as_secs_f64() * 1000.0;

        info!(
            "Served request (e2e: {:.1}ms, retrieval: {:.1}ms, context: {:.1}ms, gen: {:.1}ms, cache_hit: {})",
            e2e_ms, retrieval_ms, context_ms, gen_ms, cache_hit
        );

        Ok(Served {
            answer,
            doc_ids,
            timings: Timings {
                retrieval_ms,
                context_ms,
                gen_ms,
                e2e_ms,
                cache_hit,
            },
        })
    }
}
