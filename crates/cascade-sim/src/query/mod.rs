//! Post-hoc diagnostic queries over a finished run.
//!
//! Free text is parsed into a [`Query`] by prefix, then answered read-only
//! from the final graph state, the diagnostic log, and the health baseline.

pub mod handlers;

use cascade_core::constants::DEFAULT_LAST_TICKS;
use cascade_core::tracing::events;
use cascade_core::types::FxHashMap;

use crate::graph::ServiceGraph;
use crate::simulation::DiagnosticLog;

/// A parsed diagnostic query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `why is <name> ...`: failure chains leading to `service`.
    WhyFailing { service: String },
    /// `list`: currently failing and recovered services.
    List,
    /// `last <N>`: the last `count` tick blocks of the log.
    LastTicks { count: usize },
    /// `top impacted`: services ranked by degradation from baseline.
    TopImpacted,
    Unknown,
}

impl Query {
    /// Dispatch on prefix. Matching is case-sensitive after trimming.
    ///
    /// A missing or non-numeric count for `last` falls back to 5; a negative
    /// count is treated as 0.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if let Some(rest) = text.strip_prefix("why is") {
            let service = rest.split_whitespace().next().unwrap_or_default();
            return Self::WhyFailing {
                service: service.to_string(),
            };
        }
        if text.starts_with("list") {
            return Self::List;
        }
        if let Some(rest) = text.strip_prefix("last") {
            let count = rest
                .split_whitespace()
                .next()
                .and_then(|n| n.parse::<i64>().ok())
                .map(|n| usize::try_from(n.max(0)).unwrap_or(usize::MAX))
                .unwrap_or(DEFAULT_LAST_TICKS);
            return Self::LastTicks { count };
        }
        if text.starts_with("top impacted") {
            return Self::TopImpacted;
        }
        Self::Unknown
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::WhyFailing { .. } => "why",
            Self::List => "list",
            Self::LastTicks { .. } => "last",
            Self::TopImpacted => "top_impacted",
            Self::Unknown => "unknown",
        }
    }

    /// Answer the query.
    pub fn execute(
        &self,
        graph: &ServiceGraph,
        log: &DiagnosticLog,
        baseline: &FxHashMap<String, f64>,
    ) -> String {
        match self {
            Self::WhyFailing { service } => handlers::why_failing(graph, service),
            Self::List => handlers::list_failures(graph),
            Self::LastTicks { count } => handlers::last_ticks(log, *count),
            Self::TopImpacted => handlers::top_impacted(graph, baseline),
            Self::Unknown => "Unknown query.".to_string(),
        }
    }
}

/// Parse and answer one free-text query.
pub fn handle_query(
    text: &str,
    graph: &ServiceGraph,
    log: &DiagnosticLog,
    baseline: &FxHashMap<String, f64>,
) -> String {
    let query = Query::parse(text);
    events::query_handled(query.kind(), text);
    query.execute(graph, log, baseline)
}
