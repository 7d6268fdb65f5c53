//! Project analysis: every comment table of one owner/repository
//!
//! Segments each table, scans every thread against the project-wide
//! participant set, merges the per-thread outcomes, and consolidates the
//! result into one reference table.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AnalysisConfig;
use crate::consolidate::{ReferenceConsolidator, ReferenceTable};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::graph::ReferenceGraph;
use crate::model::{ParticipantSet, Reference, Thread};
use crate::report::Report;
use crate::scanner::{ThreadOutcome, ThreadScanner};
use crate::segment::{CommentTable, ThreadSegmenter};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Project {
    pub owner: String,
    pub repo: String,
    #[serde(default)]
    pub tables: Vec<CommentTable>,
}

impl Project {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            tables: Vec::new(),
        }
    }

    pub fn with_table(mut self, table: CommentTable) -> Self {
        self.tables.push(table);
        self
    }

    pub fn name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[derive(Serialize, Debug)]
pub struct ProjectAnalysis {
    /// Consolidated output, raw or weighted per config
    pub table: ReferenceTable,
    /// Every valid reference, in thread order
    #[serde(skip)]
    pub references: Vec<Reference>,
    pub participants: ParticipantSet,
    pub report: Report,
    pub diagnostics: Diagnostics,
}

impl ProjectAnalysis {
    /// Participant graph over the weighted edges, silent participants included
    pub fn graph(&self) -> ReferenceGraph {
        ReferenceGraph::from_edges(&ReferenceConsolidator::weighted(&self.references))
            .with_participants(&self.participants)
    }
}

pub struct ProjectAnalyzer {
    config: AnalysisConfig,
    segmenter: ThreadSegmenter,
    scanner: ThreadScanner,
}

impl Default for ProjectAnalyzer {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
            segmenter: ThreadSegmenter::new(),
            scanner: ThreadScanner::default(),
        }
    }
}

impl ProjectAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let scanner = ThreadScanner::new(&config);
        Ok(Self {
            config,
            segmenter: ThreadSegmenter::new(),
            scanner,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, project: &Project) -> Result<ProjectAnalysis> {
        let started = instant::Instant::now();
        let mut report = Report::for_project(project.name());
        let mut diagnostics = Diagnostics::new();

        let mut threads: Vec<Thread> = Vec::new();
        for table in &project.tables {
            let segmented = self.segmenter.segment(table)?;
            report.rows_without_position += segmented.missing_position.len();
            if self.config.collect_missing_position {
                diagnostics.missing_position.extend(segmented.missing_position);
            }
            threads.extend(segmented.threads);
        }

        let mut participants = ParticipantSet::new();
        for thread in &threads {
            participants.union_with(thread.participants());
        }
        report.participants = participants.len();

        let mut per_thread = Vec::with_capacity(threads.len());
        for thread in &threads {
            let ThreadOutcome {
                references,
                report: thread_report,
                diagnostics: thread_diagnostics,
            } = self.scanner.scan(thread, &participants);
            report.merge(&thread_report);
            diagnostics.merge(thread_diagnostics);
            per_thread.push(references);
        }

        let references = ReferenceConsolidator::project(per_thread);
        let table = ReferenceConsolidator::table(&references, self.config.weighted);
        report.elapsed_us = started.elapsed().as_micros() as u64;

        info!(
            project = %project.name(),
            threads = report.threads(),
            comments = report.comments(),
            references = references.len(),
            elapsed_us = report.elapsed_us,
            "analyzed project"
        );
        if self.config.log_summary {
            info!("\n{}", report);
            if self.config.collect_invalid {
                info!("\n{}", diagnostics.invalid_summary());
            }
        }

        Ok(ProjectAnalysis {
            table,
            references,
            participants,
            report,
            diagnostics,
        })
    }

    /// JSON in, JSON out: a serialized `Project` to a serialized `ProjectAnalysis`
    pub fn analyze_json(&self, project_json: &str) -> Result<String> {
        let project: Project = serde_json::from_str(project_json)?;
        let analysis = self.analyze(&project)?;
        Ok(serde_json::to_string(&analysis)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidate::ReferenceTable;
    use crate::error::AnalysisError;
    use crate::model::{CommentRow, Login, RefKind, ThreadKind};
    use chrono::{TimeZone, Utc};

    fn row(thread: &str, id: u64, author: &str, body: &str) -> CommentRow {
        let ts = Utc.with_ymd_and_hms(2015, 7, 1, 9, 0, 0).unwrap();
        CommentRow::new(thread, id, author, body, ts)
    }

    fn sample_project() -> Project {
        Project::new("d3", "d3")
            .with_table(CommentTable::new(
                ThreadKind::PullRequest,
                vec![
                    row("10", 1, "alice", "typo here").at_position(4),
                    row("10", 2, "bob", "fixed").at_position(4),
                    row("10", 3, "carol", "use a const").at_position(9),
                    row("10", 4, "alice", "@carol agreed").at_position(9),
                ],
            ))
            .with_table(CommentTable::new(
                ThreadKind::Issue,
                vec![
                    row("7", 11, "dave", "crash on load"),
                    row("7", 12, "alice", "@dave which browser?"),
                    row("7", 13, "dave", "> which browser?\r\nfirefox, @bob saw it too"),
                ],
            ))
            .with_table(CommentTable::empty(ThreadKind::Commit))
    }

    #[test]
    fn test_analyze_collects_all_tables() {
        let analysis = ProjectAnalyzer::default().analyze(&sample_project()).unwrap();

        assert_eq!(analysis.report.threads(), 3);
        assert_eq!(analysis.report.comments(), 7);
        assert_eq!(analysis.report.participants, 4);
        assert_eq!(analysis.participants.len(), 4);
        assert_eq!(analysis.report.project.as_deref(), Some("d3/d3"));
    }

    #[test]
    fn test_references_follow_thread_order() {
        let analysis = ProjectAnalyzer::default().analyze(&sample_project()).unwrap();

        let ids: Vec<u64> = analysis.references.iter().map(|r| r.comment_id()).collect();
        // position 4, position 9, then the issue thread
        assert_eq!(ids, vec![2, 4, 12, 13, 13]);
        let ReferenceTable::Raw(rows) = &analysis.table else {
            panic!("expected raw table");
        };
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].thread_type, ThreadKind::PullRequest);
    }

    #[test]
    fn test_mention_of_participant_from_other_thread_is_valid() {
        let analysis = ProjectAnalyzer::default().analyze(&sample_project()).unwrap();

        // bob never posted in issue 7 but did in pull request 10
        assert!(analysis.references.iter().any(|r| {
            r.comment_id() == 13 && r.kind() == RefKind::Mention && r.addressee_login().map(|l| l.as_str()) == Some("bob")
        }));
    }

    #[test]
    fn test_graph_covers_every_participant() {
        let analysis = ProjectAnalyzer::default().analyze(&sample_project()).unwrap();
        let graph = analysis.graph();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.weight(Login::new("dave"), Login::new("alice"), RefKind::Quote), 1);
        assert_eq!(graph.in_degree(Login::new("carol")), 1);
    }

    #[test]
    fn test_weighted_mode() {
        let config = AnalysisConfig { weighted: true, ..AnalysisConfig::default() };
        let project = Project::new("o", "r").with_table(CommentTable::new(
            ThreadKind::Issue,
            vec![row("1", 1, "alice", "a"), row("1", 2, "bob", "b"), row("2", 3, "alice", "c"), row("2", 4, "bob", "d")],
        ));
        let analysis = ProjectAnalyzer::new(config).unwrap().analyze(&project).unwrap();

        let ReferenceTable::Weighted(edges) = &analysis.table else {
            panic!("expected weighted table");
        };
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].weight, 2);
        assert_eq!(edges[0].comment_ids.len(), 2);
        assert_eq!(edges[0].ref_type, RefKind::ContextualReply);
    }

    #[test]
    fn test_missing_positions_reported() {
        let project = Project::new("o", "r").with_table(CommentTable::new(
            ThreadKind::Commit,
            vec![row("sha1", 1, "alice", "a"), row("sha1", 2, "bob", "b")],
        ));
        let analysis = ProjectAnalyzer::new(AnalysisConfig::diagnostic()).unwrap().analyze(&project).unwrap();

        assert_eq!(analysis.report.rows_without_position, 2);
        assert_eq!(analysis.diagnostics.missing_position.len(), 2);
        assert_eq!(analysis.report.threads(), 1);
    }

    #[test]
    fn test_malformed_row_aborts_analysis() {
        let project = Project::new("o", "r")
            .with_table(CommentTable::new(ThreadKind::Issue, vec![row("1", 1, "", "orphan")]));
        let err = ProjectAnalyzer::default().analyze(&project).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedComment { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig { contextual_party_threshold: 0, ..AnalysisConfig::default() };
        assert!(ProjectAnalyzer::new(config).is_err());
    }

    #[test]
    fn test_analyze_json_round_trip() {
        let input = serde_json::json!({
            "owner": "Homebrew",
            "repo": "brew",
            "tables": [{
                "kind": "issue",
                "rows": [
                    {"thread_id": 1, "author": "Alice", "body": "hello", "comment_id": 1, "created_at": "2016-01-01T00:00:00Z"},
                    {"thread_id": 1, "author": "bob", "body": "@alice hi", "comment_id": 2, "created_at": "2016-01-01T00:05:00Z"}
                ]
            }]
        });
        let output = ProjectAnalyzer::default().analyze_json(&input.to_string()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["table"]["mode"], "raw");
        assert_eq!(value["table"]["rows"].as_array().unwrap().len(), 1);
        assert_eq!(value["table"]["rows"][0]["addressee"], "alice");
        assert_eq!(value["participants"], serde_json::json!(["alice", "bob"]));
    }
}
