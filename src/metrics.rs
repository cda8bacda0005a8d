use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;
use crate::models::Usage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Analyze,
    Rewrite,
    Refine
}

impl Task {

    pub fn as_str(&self) -> &'static str {

        match self {
            Task::Analyze => "analyze",
            Task::Rewrite => "rewrite",
            Task::Refine => "refine"
        }

    }

}

/// Process-lifetime counters. Every request is counted, including rejected ones.
#[derive(Debug, Default)]
pub struct Metrics {
    pub analyze_requests: AtomicU64,
    pub rewrite_requests: AtomicU64,
    pub refine_requests: AtomicU64,
    pub failures: AtomicU64,
    pub unparsed_analyses: AtomicU64,
    pub prompt_tokens: AtomicU64,
    pub completion_tokens: AtomicU64,
    pub total_tokens: AtomicU64
}

impl Metrics {

    pub fn new() -> Self {

        Self::default()

    }

    pub fn record_request(&self, task: Task) {

        let counter = match task {
            Task::Analyze => &self.analyze_requests,
            Task::Rewrite => &self.rewrite_requests,
            Task::Refine => &self.refine_requests
        };
        counter.fetch_add(1, Ordering::Relaxed);

    }

    pub fn record_usage(&self, usage: Usage) {

        self.prompt_tokens.fetch_add(usage.prompt_tokens, Ordering::Relaxed);
        self.completion_tokens.fetch_add(usage.completion_tokens, Ordering::Relaxed);
        self.total_tokens.fetch_add(usage.total_tokens, Ordering::Relaxed);

    }

    pub fn record_failure(&self) {

        self.failures.fetch_add(1, Ordering::Relaxed);

    }

    pub fn record_unparsed(&self) {

        self.unparsed_analyses.fetch_add(1, Ordering::Relaxed);

    }

    pub fn snapshot(&self) -> MetricsSnapshot {

        MetricsSnapshot {
            analyze_requests: self.analyze_requests.load(Ordering::Relaxed),
            rewrite_requests: self.rewrite_requests.load(Ordering::Relaxed),
            refine_requests: self.refine_requests.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            unparsed_analyses: self.unparsed_analyses.load(Ordering::Relaxed),
            usage: Usage::new(
                self.prompt_tokens.load(Ordering::Relaxed),
                self.completion_tokens.load(Ordering::Relaxed),
                self.total_tokens.load(Ordering::Relaxed)
            )
        }

    }

}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub analyze_requests: u64,
    pub rewrite_requests: u64,
    pub refine_requests: u64,
    pub failures: u64,
    pub unparsed_analyses: u64,
    pub usage: Usage
}
