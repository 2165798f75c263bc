//! Query routing: classification of a question into an answer shape

use serde::{Deserialize, Serialize};

/// The answer shape a query is routed to.
///
/// Computed once per request; gates both the rewrite step and the
/// generation mode, and is never recomputed mid-pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    /// Enumerable set of items; blocking generation replayed as a stream
    List,
    /// Procedural, step-ordered explanation; genuinely incremental stream
    Detail,
    /// Any other question shape; incremental stream
    Basic,
}

impl RouteType {
    /// Label used in prompts and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
            Self::Basic => "basic",
        }
    }

    /// Parse a classifier label.
    ///
    /// Tolerates surrounding prose ("The route is: list") by scanning for
    /// the first known label in the lowercased text.
    pub fn from_label(label: &str) -> Option<Self> {
        let lowered = label.trim().to_lowercase();
        match lowered.as_str() {
            "list" => return Some(Self::List),
            "detail" => return Some(Self::Detail),
            "basic" => return Some(Self::Basic),
            _ => {}
        }

        let positions = [
            (lowered.find("list"), Self::List),
            (lowered.find("detail"), Self::Detail),
            (lowered.find("basic"), Self::Basic),
        ];
        positions
            .into_iter()
            .filter_map(|(pos, route)| pos.map(|p| (p, route)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, route)| route)
    }

    /// Deterministic keyword fallback used when the classifier produces no
    /// usable label. Always returns a route; defaults to `Basic`.
    pub fn detect(query: &str) -> Self {
        const LIST_MARKERS: &[&str] = &[
            "what dishes",
            "which dishes",
            "what recipes",
            "what can i make",
            "what can i cook",
            "recommend",
            "suggest",
            "list",
            "options",
        ];
        const DETAIL_MARKERS: &[&str] = &[
            "how to",
            "how do i",
            "how should i",
            "step by step",
            "step-by-step",
            "steps",
            "instructions",
            "procedure",
            "walk me through",
        ];

        let lowered = query.to_lowercase();

        if LIST_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            return Self::List;
        }
        if DETAIL_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            return Self::Detail;
        }
        Self::Basic
    }
}
