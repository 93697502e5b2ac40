//! Sequential and parallel batch execution.

use std::thread;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::PayCalculator;
use crate::config::BatchRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{BatchFailure, BatchReport, BatchSummary, PayPath, PayPeriod, PayResult};
use crate::source::{RecordSource, SubjectSource};

/// Runs one calculation path over every active subject.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use crew_pay_engine::batch::BatchRunner;
/// use crew_pay_engine::calculation::LegacyCalculator;
/// use crew_pay_engine::models::PayPeriod;
/// use crew_pay_engine::source::InMemoryRoster;
///
/// let roster = InMemoryRoster::from_json(r#"{
///     "subjects": [
///         {"id": "AVL1000", "first_name": "Sarah", "last_name": "Jones", "hourly_rate": "50"}
///     ]
/// }"#)?;
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
/// )?;
///
/// let runner = BatchRunner::new(LegacyCalculator::default());
/// let report = runner.run(&period, &roster, &roster, false)?;
/// assert_eq!(report.summary.processed, 1);
/// # Ok::<(), crew_pay_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner<C> {
    calculator: C,
    rules: BatchRules,
}

impl<C: PayCalculator> BatchRunner<C> {
    /// Creates a runner with the default throttle delay.
    pub fn new(calculator: C) -> Self {
        Self::with_rules(calculator, BatchRules::default())
    }

    /// Creates a runner with explicit batch settings.
    pub fn with_rules(calculator: C, rules: BatchRules) -> Self {
        Self { calculator, rules }
    }

    /// Returns the calculator the runner drives.
    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    /// Returns the batch settings.
    pub fn rules(&self) -> &BatchRules {
        &self.rules
    }

    /// Processes every active subject one after another, in source order.
    ///
    /// When `throttle` is set, the runner sleeps for the configured delay after
    /// each successfully processed subject; failed subjects are not followed by
    /// a pause. A failing subject is recorded in the report and does not stop
    /// the run.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`](crate::error::EngineError::InvalidPeriod)
    /// before processing anything if the period ends before it starts.
    pub fn run<S, R>(
        &self,
        period: &PayPeriod,
        subjects: &S,
        records: &R,
        throttle: bool,
    ) -> EngineResult<BatchReport>
    where
        S: SubjectSource + ?Sized,
        R: RecordSource + ?Sized,
    {
        period.validate()?;

        let start_time = Instant::now();
        let subject_ids = subjects.active_subject_ids();
        let mut tally = BatchTally::start(self.calculator.path(), subject_ids.len(), throttle);
        let delay = Duration::from_millis(self.rules.throttle_delay_ms);

        for subject_id in subject_ids {
            let outcome = self
                .calculator
                .calculate_for(&subject_id, period, subjects, records);
            let processed = tally.record(subject_id, outcome);

            if throttle && processed {
                thread::sleep(delay);
            }
        }

        Ok(tally.finish(start_time.elapsed()))
    }

    /// Processes every active subject concurrently.
    ///
    /// Results and failures are still reported in source order, so the report
    /// matches a sequential run apart from timings and the run id. No throttle
    /// is applied.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`](crate::error::EngineError::InvalidPeriod)
    /// before processing anything if the period ends before it starts.
    pub fn run_parallel<S, R>(
        &self,
        period: &PayPeriod,
        subjects: &S,
        records: &R,
    ) -> EngineResult<BatchReport>
    where
        C: Sync,
        S: SubjectSource + Sync + ?Sized,
        R: RecordSource + Sync + ?Sized,
    {
        period.validate()?;

        let start_time = Instant::now();
        let subject_ids = subjects.active_subject_ids();
        let mut tally = BatchTally::start(self.calculator.path(), subject_ids.len(), false);

        let outcomes: Vec<EngineResult<PayResult>> = subject_ids
            .par_iter()
            .map(|subject_id| {
                self.calculator
                    .calculate_for(subject_id, period, subjects, records)
            })
            .collect();

        for (subject_id, outcome) in subject_ids.into_iter().zip(outcomes) {
            tally.record(subject_id, outcome);
        }

        Ok(tally.finish(start_time.elapsed()))
    }
}

/// Running counters for one batch run.
struct BatchTally {
    run_id: Uuid,
    path: PayPath,
    total_subjects: usize,
    total_pay: Decimal,
    results: Vec<PayResult>,
    failures: Vec<BatchFailure>,
}

impl BatchTally {
    fn start(path: PayPath, total_subjects: usize, throttle: bool) -> Self {
        let run_id = Uuid::new_v4();
        info!(
            run_id = %run_id,
            path = %path,
            total_subjects,
            throttle,
            "Batch run started"
        );
        Self {
            run_id,
            path,
            total_subjects,
            total_pay: Decimal::ZERO,
            results: Vec::with_capacity(total_subjects),
            failures: Vec::new(),
        }
    }

    /// Returns true if the subject counted as processed.
    fn record(&mut self, subject_id: String, outcome: EngineResult<PayResult>) -> bool {
        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                self.fail(subject_id, err);
                return false;
            }
        };

        match self.total_pay.checked_add(result.gross_pay) {
            Some(total_pay) => {
                self.total_pay = total_pay;
                self.results.push(result);
                true
            }
            None => {
                let err = EngineError::AmountOverflow {
                    subject_id: subject_id.clone(),
                    rule: "total_pay".to_string(),
                };
                self.fail(subject_id, err);
                false
            }
        }
    }

    fn fail(&mut self, subject_id: String, err: EngineError) {
        warn!(
            run_id = %self.run_id,
            subject_id = %subject_id,
            kind = err.kind(),
            error = %err,
            "Subject failed"
        );
        self.failures.push(BatchFailure {
            subject_id,
            kind: err.kind().to_string(),
            message: err.to_string(),
        });
    }

    fn finish(self, elapsed: Duration) -> BatchReport {
        let processing_time_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        let summary = BatchSummary {
            run_id: self.run_id,
            path: self.path,
            total_subjects: self.total_subjects,
            processed: self.results.len(),
            errors: self.failures.len(),
            total_pay: self.total_pay,
            processing_time_us,
            average_time_per_subject_us: processing_time_us / self.results.len().max(1) as u64,
        };
        info!(
            run_id = %summary.run_id,
            processed = summary.processed,
            errors = summary.errors,
            total_pay = %summary.total_pay,
            duration_us = summary.processing_time_us,
            "Batch run finished"
        );
        BatchReport {
            summary,
            results: self.results,
            failures: self.failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{IntelligentCalculator, LegacyCalculator};
    use crate::error::EngineError;
    use crate::models::{DutyRecord, FlightAttributes, Subject, SubjectStatus};
    use crate::source::InMemoryRoster;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_subject(id: &str, rate: &str, status: SubjectStatus) -> Subject {
        Subject {
            id: id.to_string(),
            first_name: "Crew".to_string(),
            last_name: id.to_string(),
            position: "First Officer".to_string(),
            base: "BUR".to_string(),
            hourly_rate: dec(rate),
            status,
        }
    }

    fn make_record(subject_id: &str, credit: &str, red_eye: bool) -> DutyRecord {
        DutyRecord {
            id: format!("dr_{}", subject_id),
            subject_id: subject_id.to_string(),
            position: "First Officer".to_string(),
            flight: Some(FlightAttributes {
                red_eye,
                ..FlightAttributes::default()
            }),
            duty_start: NaiveDateTime::parse_from_str("2026-03-10 21:00:00", "%Y-%m-%d %H:%M:%S")
                .ok(),
            duty_end: None,
            credit_hours: Some(dec(credit)),
        }
    }

    fn make_period() -> PayPeriod {
        PayPeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        }
    }

    fn make_roster() -> InMemoryRoster {
        InMemoryRoster::new(
            vec![
                make_subject("AVL1000", "50", SubjectStatus::Active),
                make_subject("AVL1001", "60", SubjectStatus::Inactive),
                make_subject("AVL1002", "60", SubjectStatus::Active),
            ],
            vec![make_record("AVL1002", "80", true)],
        )
    }

    /// Reports an id the roster cannot resolve between two real subjects.
    struct GappyRoster {
        roster: InMemoryRoster,
    }

    impl SubjectSource for GappyRoster {
        fn subject(&self, id: &str) -> Option<Subject> {
            self.roster.subject(id)
        }

        fn active_subject_ids(&self) -> Vec<String> {
            vec![
                "AVL1000".to_string(),
                "AVL1999".to_string(),
                "AVL1002".to_string(),
            ]
        }
    }

    impl RecordSource for GappyRoster {
        fn records_for(&self, subject_id: &str, period: &PayPeriod) -> Vec<DutyRecord> {
            self.roster.records_for(subject_id, period)
        }
    }

    fn no_delay() -> BatchRules {
        BatchRules {
            throttle_delay_ms: 0,
        }
    }

    /// BR-001: only active subjects are processed, in source order
    #[test]
    fn test_run_processes_active_subjects_in_order() {
        let roster = make_roster();
        let report = BatchRunner::new(LegacyCalculator::default())
            .run(&make_period(), &roster, &roster, false)
            .unwrap();

        assert_eq!(report.summary.total_subjects, 2);
        assert_eq!(report.summary.processed, 2);
        assert_eq!(report.summary.errors, 0);
        assert_eq!(report.summary.path, PayPath::Legacy);
        let ids: Vec<&str> = report.results.iter().map(|r| r.subject_id.as_str()).collect();
        assert_eq!(ids, vec!["AVL1000", "AVL1002"]);
        assert_eq!(report.summary.total_pay, dec("3750") + dec("5500"));
    }

    /// BR-002: a missing subject is tallied and the run continues
    #[test]
    fn test_missing_subject_does_not_abort_run() {
        let source = GappyRoster {
            roster: make_roster(),
        };
        let report = BatchRunner::with_rules(LegacyCalculator::default(), no_delay())
            .run(&make_period(), &source, &source, true)
            .unwrap();

        assert_eq!(report.summary.total_subjects, 3);
        assert_eq!(report.summary.processed, 2);
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.total_pay, dec("9250"));
        assert_eq!(report.failures[0].subject_id, "AVL1999");
        assert_eq!(report.failures[0].kind, "subject_not_found");
        assert_eq!(report.failures[0].message, "Subject not found: AVL1999");
    }

    #[test]
    fn test_invalid_period_rejected_before_processing() {
        let roster = make_roster();
        let period = PayPeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        };
        let runner = BatchRunner::new(LegacyCalculator::default());

        assert!(matches!(
            runner.run(&period, &roster, &roster, false),
            Err(EngineError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            runner.run_parallel(&period, &roster, &roster),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_throttle_inserts_delay_per_subject() {
        let roster = make_roster();
        let runner = BatchRunner::with_rules(
            LegacyCalculator::default(),
            BatchRules {
                throttle_delay_ms: 5,
            },
        );

        let report = runner.run(&make_period(), &roster, &roster, true).unwrap();
        assert!(report.summary.processing_time_us >= 10_000);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let source = GappyRoster {
            roster: make_roster(),
        };
        let runner = BatchRunner::new(IntelligentCalculator::default());

        let sequential = runner.run(&make_period(), &source, &source, false).unwrap();
        let parallel = runner.run_parallel(&make_period(), &source, &source).unwrap();

        assert_eq!(parallel.summary.path, PayPath::Intelligent);
        assert_eq!(parallel.summary.processed, sequential.summary.processed);
        assert_eq!(parallel.summary.errors, sequential.summary.errors);
        assert_eq!(parallel.summary.total_pay, sequential.summary.total_pay);
        assert_eq!(parallel.failures, sequential.failures);
        let gross = |report: &BatchReport| -> Vec<(String, Decimal)> {
            report
                .results
                .iter()
                .map(|r| (r.subject_id.clone(), r.gross_pay))
                .collect()
        };
        assert_eq!(gross(&parallel), gross(&sequential));
        assert_ne!(parallel.summary.run_id, sequential.summary.run_id);
    }

    #[test]
    fn test_empty_source_yields_empty_report() {
        let roster = InMemoryRoster::default();
        let report = BatchRunner::new(LegacyCalculator::default())
            .run(&make_period(), &roster, &roster, true)
            .unwrap();

        assert_eq!(report.summary.total_subjects, 0);
        assert_eq!(report.summary.total_pay, Decimal::ZERO);
        assert_eq!(
            report.summary.average_time_per_subject_us,
            report.summary.processing_time_us
        );
    }

    #[test]
    fn test_average_time_divides_by_processed() {
        let roster = make_roster();
        let report = BatchRunner::new(LegacyCalculator::default())
            .run(&make_period(), &roster, &roster, false)
            .unwrap();

        assert_eq!(
            report.summary.average_time_per_subject_us,
            report.summary.processing_time_us / 2
        );
    }

    /// Reports one active subject that cannot be resolved.
    struct MissingOnlyRoster;

    impl SubjectSource for MissingOnlyRoster {
        fn subject(&self, _id: &str) -> Option<Subject> {
            None
        }

        fn active_subject_ids(&self) -> Vec<String> {
            vec!["AVL1999".to_string()]
        }
    }

    impl RecordSource for MissingOnlyRoster {
        fn records_for(&self, _subject_id: &str, _period: &PayPeriod) -> Vec<DutyRecord> {
            Vec::new()
        }
    }

    #[test]
    fn test_throttle_skips_failed_subjects() {
        let runner = BatchRunner::with_rules(
            LegacyCalculator::default(),
            BatchRules {
                throttle_delay_ms: 2_000,
            },
        );

        let source = MissingOnlyRoster;
        let report = runner.run(&make_period(), &source, &source, true).unwrap();

        assert_eq!(report.summary.errors, 1);
        assert!(report.summary.processing_time_us < 2_000_000);
    }

    #[test]
    fn test_total_pay_overflow_fails_subject() {
        let rate = "600000000000000000000000000";
        let roster = InMemoryRoster::new(
            vec![
                make_subject("AVL1000", rate, SubjectStatus::Active),
                make_subject("AVL1002", rate, SubjectStatus::Active),
            ],
            Vec::new(),
        );

        let report = BatchRunner::new(LegacyCalculator::default())
            .run(&make_period(), &roster, &roster, false)
            .unwrap();

        assert_eq!(report.summary.processed, 1);
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.total_pay, dec("45000000000000000000000000000"));
        assert_eq!(report.failures[0].subject_id, "AVL1002");
        assert_eq!(report.failures[0].kind, "amount_overflow");
    }
}
