//! ReplyNet: reference edges from discussion threads
//!
//! Reads the comment tables of a repository (issue, pull request and commit
//! comments) and extracts who addressed whom: explicit `@mentions`, `>`
//! quoted replies, and implicit contextual replies to the previous comment.
//!
//! # Architecture
//!
//! ## Model
//! - `model/` - Login (interned), Actor, CommentRow, Comment, Thread, Reference
//! - `segment.rs` - ThreadSegmenter: comment tables → ordered threads
//!
//! ## Scanner
//! - `mention.rs` - MentionDetector: `@handle` extraction
//! - `quote.rs` - QuoteDetector: quote openers, window extraction, source lookup
//! - `contextual.rs` - ContextualReplyDetector: adjacency replies and suppression
//! - `validate.rs` - ReferenceValidator: participation rules
//! - `pass.rs` - ThreadScanner: one pass per thread
//!
//! ## Output
//! - `consolidate.rs` - raw and weighted reference tables
//! - `report.rs` - per-kind counters and summary text
//! - `diagnostics.rs` - invalid references, unsourced quotes, rows without position
//! - `graph.rs` - ReferenceGraph over weighted edges
//! - `project.rs` - ProjectAnalyzer: the whole pipeline for one repository
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { ReferenceEngine } from 'replynet';
//!
//! await init();
//!
//! const engine = new ReferenceEngine({ collect_invalid: true });
//! const analysis = engine.analyze({
//!   owner: 'd3',
//!   repo: 'd3',
//!   tables: [{ kind: 'issue', rows: [
//!     { thread_id: 1, author: 'alice', body: 'crash', comment_id: 1, created_at: '2015-07-01T09:00:00Z' },
//!     { thread_id: 1, author: 'bob', body: '@alice which browser?', comment_id: 2, created_at: '2015-07-01T09:05:00Z' },
//!   ]}],
//! });
//!
//! console.log(analysis.table.rows);  // bob -> alice, mention
//! console.log(engine.summary());
//! ```

pub mod config;
pub mod consolidate;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod model;
pub mod project;
pub mod report;
pub mod scanner;
pub mod segment;
pub mod wasm;

pub use config::AnalysisConfig;
pub use consolidate::{ReferenceConsolidator, ReferenceRecord, ReferenceTable, WeightedEdge};
pub use diagnostics::{Diagnostics, InvalidReference, InvalidSummary, MissingPosition, UnsourcedQuote};
pub use error::{AnalysisError, MalformedThreadError, Result};
pub use graph::{GraphEdge, ReferenceGraph};
pub use model::*;
pub use project::{Project, ProjectAnalysis, ProjectAnalyzer};
pub use report::{KindCounts, ReferenceCounts, Report, ThreadKindStats};
pub use scanner::*;
pub use segment::{CommentTable, Segmented, ThreadSegmenter};
pub use wasm::ReferenceEngine;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn version() -> String {
    format!("replynet v{}", env!("CARGO_PKG_VERSION"))
}
