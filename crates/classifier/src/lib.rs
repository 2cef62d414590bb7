//! # Difficulty Classifier
//!
//! Deterministic difficulty tiers for tracked work items.
//!
//! ## Architecture
//!
//! ```text
//! IssueRecord
//!     │
//!     ├──> LabelMatcher (normalize + bidirectional containment)
//!     │      └─ Easy / Hard / Neutral
//!     │
//!     ├──> Factor scorers (piecewise linear, 0-100)
//!     │      ├─ label      (40%)
//!     │      ├─ discussion (30%)
//!     │      └─ length     (30%)
//!     │
//!     ├──> Aggregator
//!     │      └─ weighted sum → round → tier
//!     │
//!     └──> Explainer
//!            └─ "Easy: low discussion, concise scope"
//! ```
//!
//! Every function here is pure: no I/O, no clock, no shared state.

mod aggregate;
mod classifier;
mod explain;
mod factors;
mod labels;

pub use aggregate::{aggregate, Aggregate, DISCUSSION_WEIGHT, LABEL_WEIGHT, LENGTH_WEIGHT};
pub use classifier::{assess, calculate_difficulty, classify_all, Assessment};
pub use explain::explain;
pub use factors::{discussion_score, label_score, length_score, FactorScores};
pub use labels::{classify_labels, normalize_label, LabelSignal, EASY_LABELS, HARD_LABELS};

pub use difficulty_protocol::{DifficultyLevel, DifficultyResult, IssueRecord};
