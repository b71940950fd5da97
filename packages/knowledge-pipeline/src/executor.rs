//! Fallback execution across an ordered candidate list.
//!
//! Candidates are attempted strictly sequentially, one attempt each — the
//! first non-empty result wins, and only one paid platform run is in flight
//! at a time. The decision logic is a pure state machine ([`FallbackState`] +
//! [`advance`]); the driver [`run_with_fallback`] owns the effects: the
//! pre-attempt compliance re-check, the awaited platform call, and audit
//! reporting.

use chrono::Utc;
use tracing::{info, warn};

use crate::compliance::is_banned;
use crate::traits::{AuditSink, ScraperRunner};
use crate::types::{AttemptStatus, AuditEntry, CatalogEntry, RunLimits, ScrapedRecord};

/// Reason reported when the candidate list yields no attempts at all.
const NO_CANDIDATES_REASON: &str = "no scraper candidates were attempted";

/// Outcome of a single candidate attempt, as seen by the state machine.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// Run completed with a non-empty payload.
    Success(Vec<ScrapedRecord>),
    /// Run completed but returned no records. Treated as a failure.
    Empty,
    /// Run failed outright (timeout, platform error, bad input).
    Failed(String),
    /// Candidate was banned at attempt time and skipped. Not a failure.
    SkippedBanned,
}

/// State of the fallback loop.
#[derive(Debug)]
pub enum FallbackState {
    /// Attempting the candidate at `index`; failures observed so far.
    Trying { index: usize, errors: Vec<String> },
    /// A candidate produced data. Terminal.
    Succeeded {
        scraper_id: String,
        records: Vec<ScrapedRecord>,
        errors: Vec<String>,
    },
    /// Every candidate was consumed without success. Terminal.
    Exhausted { errors: Vec<String> },
}

impl FallbackState {
    /// Fresh state at the head of the candidate list.
    pub fn start() -> Self {
        FallbackState::Trying {
            index: 0,
            errors: Vec::new(),
        }
    }
}

/// Pure transition function for the fallback loop. Terminal states absorb
/// further outcomes unchanged; `total` is the candidate count and decides
/// when the list is exhausted.
pub fn advance(
    state: FallbackState,
    scraper_id: &str,
    outcome: AttemptOutcome,
    total: usize,
) -> FallbackState {
    let (index, mut errors) = match state {
        FallbackState::Trying { index, errors } => (index, errors),
        terminal => return terminal,
    };

    match outcome {
        AttemptOutcome::Success(records) => FallbackState::Succeeded {
            scraper_id: scraper_id.to_string(),
            records,
            errors,
        },
        AttemptOutcome::Empty => {
            errors.push(format!("no data returned from {scraper_id}"));
            try_next(index + 1, errors, total)
        }
        AttemptOutcome::Failed(reason) => {
            errors.push(format!("{scraper_id}: {reason}"));
            try_next(index + 1, errors, total)
        }
        AttemptOutcome::SkippedBanned => try_next(index + 1, errors, total),
    }
}

fn try_next(index: usize, errors: Vec<String>, total: usize) -> FallbackState {
    if index >= total {
        FallbackState::Exhausted { errors }
    } else {
        FallbackState::Trying { index, errors }
    }
}

/// Terminal outcome of a fallback run.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub success: bool,
    /// Scraped payload; empty unless `success`.
    pub records: Vec<ScrapedRecord>,
    /// Identifier of the candidate that produced the data.
    pub scraper_used: Option<String>,
    /// Failure reasons observed before success or exhaustion, in order.
    pub errors: Vec<String>,
}

/// Attempt each candidate in order until one returns data.
///
/// Every candidate is re-checked against the compliance filter immediately
/// before execution: catalog data may have changed between selection and
/// execution, so the selection-time guarantee is not trusted here. A banned
/// candidate is skipped and audited, but does not fail the operation.
///
/// Each attempt — skip, failure, empty result, or success — is reported to
/// the audit sink. Candidates get exactly one attempt; the order is never
/// reshuffled.
pub async fn run_with_fallback<R: ScraperRunner>(
    runner: &R,
    audit: &dyn AuditSink,
    candidates: &[CatalogEntry],
    target: &str,
    limits: &RunLimits,
) -> ExecutionResult {
    let total = candidates.len();
    let mut state = FallbackState::start();

    for (i, candidate) in candidates.iter().enumerate() {
        info!(
            attempt = i + 1,
            total,
            scraper = %candidate.id,
            "attempting scraper"
        );

        let outcome = if is_banned(candidate) {
            warn!(scraper = %candidate.id, "candidate banned at attempt time, skipping");
            AttemptOutcome::SkippedBanned
        } else {
            match runner.run(&candidate.id, target, limits).await {
                Ok(records) if records.is_empty() => {
                    warn!(scraper = %candidate.id, "no data returned");
                    AttemptOutcome::Empty
                }
                Ok(records) => AttemptOutcome::Success(records),
                Err(err) => {
                    warn!(scraper = %candidate.id, error = %err, "scraper failed");
                    AttemptOutcome::Failed(err.to_string())
                }
            }
        };

        audit.record(&audit_entry(&candidate.id, &outcome));
        state = advance(state, &candidate.id, outcome, total);

        if let FallbackState::Succeeded { scraper_id, records, .. } = &state {
            info!(scraper = %scraper_id, records = records.len(), "scraper succeeded");
            break;
        }
    }

    into_result(state)
}

fn audit_entry(scraper_id: &str, outcome: &AttemptOutcome) -> AuditEntry {
    let (status, detail) = match outcome {
        AttemptOutcome::Success(records) => {
            (AttemptStatus::Succeeded, format!("{} records", records.len()))
        }
        AttemptOutcome::Empty => (AttemptStatus::Empty, "no data returned".to_string()),
        AttemptOutcome::Failed(reason) => (AttemptStatus::Failed, reason.clone()),
        AttemptOutcome::SkippedBanned => (
            AttemptStatus::SkippedBanned,
            "banned at attempt time".to_string(),
        ),
    };
    AuditEntry {
        scraper_id: scraper_id.to_string(),
        status,
        detail,
        at: Utc::now(),
    }
}

fn into_result(state: FallbackState) -> ExecutionResult {
    match state {
        FallbackState::Succeeded {
            scraper_id,
            records,
            errors,
        } => ExecutionResult {
            success: true,
            records,
            scraper_used: Some(scraper_id),
            errors,
        },
        FallbackState::Exhausted { mut errors } => {
            if errors.is_empty() {
                errors.push(NO_CANDIDATES_REASON.to_string());
            }
            ExecutionResult {
                success: false,
                records: Vec::new(),
                scraper_used: None,
                errors,
            }
        }
        // The loop never ran: empty candidate list.
        FallbackState::Trying { .. } => ExecutionResult {
            success: false,
            records: Vec::new(),
            scraper_used: None,
            errors: vec![NO_CANDIDATES_REASON.to_string()],
        },
    }
}

/// Audit sink that writes attempts to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAudit;

impl AuditSink for TracingAudit {
    fn record(&self, entry: &AuditEntry) {
        info!(
            scraper = %entry.scraper_id,
            status = %entry.status,
            detail = %entry.detail,
            "scraper attempt audited"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockRunner, RecordingAudit};
    use serde_json::json;

    fn candidates(ids: &[&str]) -> Vec<CatalogEntry> {
        ids.iter().map(|id| CatalogEntry::new(*id)).collect()
    }

    fn records(n: usize) -> Vec<ScrapedRecord> {
        (0..n)
            .map(|i| json!({"url": format!("https://example.com/{i}"), "html": "<p>hi</p>"}))
            .collect()
    }

    #[tokio::test]
    async fn falls_back_until_a_candidate_returns_data() {
        let runner = MockRunner::new()
            .with_failure("a", "timeout")
            .with_empty("b")
            .with_records("c", records(5));
        let audit = RecordingAudit::new();

        let result = run_with_fallback(
            &runner,
            &audit,
            &candidates(&["a", "b", "c"]),
            "https://example.com",
            &RunLimits::default(),
        )
        .await;

        assert!(result.success);
        assert_eq!(result.scraper_used.as_deref(), Some("c"));
        assert_eq!(result.records.len(), 5);
        assert_eq!(result.errors, vec!["a: timeout", "no data returned from b"]);
        assert_eq!(runner.calls(), vec!["a", "b", "c"]);

        let statuses: Vec<AttemptStatus> = audit.entries().iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![AttemptStatus::Failed, AttemptStatus::Empty, AttemptStatus::Succeeded]
        );
    }

    #[tokio::test]
    async fn exhaustion_records_one_reason_per_candidate() {
        let runner = MockRunner::new()
            .with_failure("a", "http 500")
            .with_empty("b")
            .with_failure("c", "timed out");
        let audit = RecordingAudit::new();

        let result = run_with_fallback(
            &runner,
            &audit,
            &candidates(&["a", "b", "c"]),
            "https://example.com",
            &RunLimits::default(),
        )
        .await;

        assert!(!result.success);
        assert!(result.scraper_used.is_none());
        assert_eq!(result.errors.len(), 3);
    }

    #[tokio::test]
    async fn empty_candidate_list_yields_a_single_generic_reason() {
        let runner = MockRunner::new();
        let audit = RecordingAudit::new();

        let result =
            run_with_fallback(&runner, &audit, &[], "https://example.com", &RunLimits::default())
                .await;

        assert!(!result.success);
        assert_eq!(result.errors, vec![NO_CANDIDATES_REASON]);
        assert!(audit.entries().is_empty());
    }

    #[tokio::test]
    async fn stops_at_the_first_success() {
        let runner = MockRunner::new().with_records("a", records(1));
        let audit = RecordingAudit::new();

        let result = run_with_fallback(
            &runner,
            &audit,
            &candidates(&["a", "b"]),
            "https://example.com",
            &RunLimits::default(),
        )
        .await;

        assert!(result.success);
        assert_eq!(runner.calls(), vec!["a"]);
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn banned_candidate_is_skipped_without_invoking_the_platform() {
        let runner = MockRunner::new().with_records("vendor/web-scraper", records(2));
        let audit = RecordingAudit::new();

        let result = run_with_fallback(
            &runner,
            &audit,
            &candidates(&["vendor/instagram-scraper", "vendor/web-scraper"]),
            "https://example.com",
            &RunLimits::default(),
        )
        .await;

        assert!(result.success);
        assert_eq!(result.scraper_used.as_deref(), Some("vendor/web-scraper"));
        // The banned candidate never reached the platform and is not a failure.
        assert_eq!(runner.calls(), vec!["vendor/web-scraper"]);
        assert!(result.errors.is_empty());
        assert_eq!(audit.entries()[0].status, AttemptStatus::SkippedBanned);
    }

    #[tokio::test]
    async fn all_candidates_banned_exhausts_with_a_generic_reason() {
        let runner = MockRunner::new();
        let audit = RecordingAudit::new();

        let result = run_with_fallback(
            &runner,
            &audit,
            &candidates(&["vendor/instagram-scraper", "vendor/amazon-scraper"]),
            "https://example.com",
            &RunLimits::default(),
        )
        .await;

        assert!(!result.success);
        assert_eq!(result.errors, vec![NO_CANDIDATES_REASON]);
        assert!(runner.calls().is_empty());
        assert_eq!(audit.entries().len(), 2);
    }

    #[test]
    fn transition_success_is_terminal() {
        let state = advance(FallbackState::start(), "a", AttemptOutcome::Success(records(1)), 3);
        assert!(matches!(state, FallbackState::Succeeded { .. }));

        // Terminal states absorb further outcomes.
        let state = advance(state, "b", AttemptOutcome::Failed("late".into()), 3);
        assert!(matches!(state, FallbackState::Succeeded { .. }));
    }

    #[test]
    fn transition_failures_accumulate_in_order() {
        let state = advance(FallbackState::start(), "a", AttemptOutcome::Failed("x".into()), 3);
        let state = advance(state, "b", AttemptOutcome::Empty, 3);
        match &state {
            FallbackState::Trying { index, errors } => {
                assert_eq!(*index, 2);
                assert_eq!(errors, &vec!["a: x".to_string(), "no data returned from b".to_string()]);
            }
            other => panic!("expected Trying, got {other:?}"),
        }
    }

    #[test]
    fn transition_exhausts_past_the_last_candidate() {
        let state = advance(FallbackState::start(), "a", AttemptOutcome::Failed("x".into()), 1);
        assert!(matches!(state, FallbackState::Exhausted { .. }));
    }

    #[test]
    fn skip_advances_without_recording_a_failure() {
        let state = advance(FallbackState::start(), "a", AttemptOutcome::SkippedBanned, 2);
        match state {
            FallbackState::Trying { index, errors } => {
                assert_eq!(index, 1);
                assert!(errors.is_empty());
            }
            other => panic!("expected Trying, got {other:?}"),
        }
    }
}
