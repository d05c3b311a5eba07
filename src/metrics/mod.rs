//! Per-operation counters for calls against the phonebook directory.
//!
//! Each of the four directory operations keeps its own call, failure, 404 and
//! latency counters. A 404 on delete is the common "someone else already
//! removed it" case, so it is counted apart from other failures.

use crate::error::{PhonebookApiError, PhonebookApiResult};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One of the directory's REST operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::List,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    /// HTTP method the operation is sent with.
    pub fn method(self) -> &'static str {
        match self {
            Operation::List => "GET",
            Operation::Create => "POST",
            Operation::Update => "PUT",
            Operation::Delete => "DELETE",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
struct OperationCounters {
    calls: AtomicU64,
    failures: AtomicU64,
    not_found: AtomicU64,
    elapsed_ms: AtomicU64,
}

/// Shared, cloneable counters. Clones record into the same totals.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    operations: Arc<[OperationCounters; 4]>,
    persons_fetched: Arc<AtomicU64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished call and how it ended.
    pub fn record<T>(
        &self,
        operation: Operation,
        elapsed: Duration,
        result: &PhonebookApiResult<T>,
    ) {
        let counters = &self.operations[operation.slot()];
        counters.calls.fetch_add(1, Ordering::Relaxed);
        counters
            .elapsed_ms
            .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);

        match result {
            Ok(_) => {}
            Err(PhonebookApiError::NotFound(_)) => {
                counters.failures.fetch_add(1, Ordering::Relaxed);
                counters.not_found.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                counters.failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn record_persons_fetched(&self, count: usize) {
        self.persons_fetched
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn calls(&self, operation: Operation) -> u64 {
        self.operations[operation.slot()].calls.load(Ordering::Relaxed)
    }

    pub fn failures(&self, operation: Operation) -> u64 {
        self.operations[operation.slot()]
            .failures
            .load(Ordering::Relaxed)
    }

    /// Calls answered with 404. For deletes: records already gone on the server.
    pub fn not_found(&self, operation: Operation) -> u64 {
        self.operations[operation.slot()]
            .not_found
            .load(Ordering::Relaxed)
    }

    pub fn total_calls(&self) -> u64 {
        Operation::ALL.iter().map(|&op| self.calls(op)).sum()
    }

    pub fn total_failures(&self) -> u64 {
        Operation::ALL.iter().map(|&op| self.failures(op)).sum()
    }

    pub fn persons_fetched(&self) -> u64 {
        self.persons_fetched.load(Ordering::Relaxed)
    }

    pub fn summary(&self) -> MetricsSummary {
        let operations = Operation::ALL
            .iter()
            .map(|&operation| {
                let counters = &self.operations[operation.slot()];
                let calls = counters.calls.load(Ordering::Relaxed);
                let elapsed_ms = counters.elapsed_ms.load(Ordering::Relaxed);
                OperationStats {
                    operation,
                    calls,
                    failures: counters.failures.load(Ordering::Relaxed),
                    not_found: counters.not_found.load(Ordering::Relaxed),
                    avg_ms: if calls == 0 {
                        0.0
                    } else {
                        elapsed_ms as f64 / calls as f64
                    },
                }
            })
            .collect();

        MetricsSummary {
            operations,
            persons_fetched: self.persons_fetched(),
        }
    }
}

/// Snapshot of one operation's counters.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationStats {
    pub operation: Operation,
    pub calls: u64,
    pub failures: u64,
    pub not_found: u64,
    pub avg_ms: f64,
}

/// Snapshot of all counters, in `Operation::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub operations: Vec<OperationStats>,
    pub persons_fetched: u64,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stats in &self.operations {
            write!(
                f,
                "{}: {} calls, {} failed ({} not found), {:.1} ms avg; ",
                stats.operation, stats.calls, stats.failures, stats.not_found, stats.avg_ms
            )?;
        }
        write!(f, "persons fetched: {}", self.persons_fetched)
    }
}

/// Measures one directory call from send to response.
pub struct OperationTimer {
    operation: Operation,
    start: Instant,
    metrics: Metrics,
}

impl OperationTimer {
    pub fn start(operation: Operation, metrics: Metrics) -> Self {
        Self {
            operation,
            start: Instant::now(),
            metrics,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn finish<T>(self, result: &PhonebookApiResult<T>) {
        self.metrics
            .record(self.operation, self.start.elapsed(), result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok() -> PhonebookApiResult<()> {
        Ok(())
    }

    #[test]
    fn test_operations_are_counted_separately() {
        let metrics = Metrics::new();
        metrics.record(Operation::List, Duration::from_millis(20), &ok());
        metrics.record(Operation::Create, Duration::from_millis(40), &ok());
        metrics.record(Operation::Create, Duration::from_millis(60), &ok());

        assert_eq!(metrics.calls(Operation::List), 1);
        assert_eq!(metrics.calls(Operation::Create), 2);
        assert_eq!(metrics.calls(Operation::Delete), 0);
        assert_eq!(metrics.total_calls(), 3);
    }

    #[test]
    fn test_delete_404_counts_as_not_found() {
        let metrics = Metrics::new();
        let gone: PhonebookApiResult<()> = Err(PhonebookApiError::NotFound(None));
        let refused: PhonebookApiResult<()> = Err(PhonebookApiError::ApiError {
            status: 500,
            message: None,
        });

        metrics.record(Operation::Delete, Duration::ZERO, &gone);
        metrics.record(Operation::Delete, Duration::ZERO, &refused);

        assert_eq!(metrics.failures(Operation::Delete), 2);
        assert_eq!(metrics.not_found(Operation::Delete), 1);
        assert_eq!(metrics.total_failures(), 2);
    }

    #[test]
    fn test_summary_averages_per_operation() {
        let metrics = Metrics::new();
        metrics.record(Operation::Update, Duration::from_millis(100), &ok());
        metrics.record(Operation::Update, Duration::from_millis(200), &ok());
        metrics.record_persons_fetched(3);

        let summary = metrics.summary();
        let update = &summary.operations[2];
        assert_eq!(update.operation, Operation::Update);
        assert_eq!(update.calls, 2);
        assert_eq!(update.avg_ms, 150.0);
        assert_eq!(summary.operations[0].avg_ms, 0.0);
        assert_eq!(summary.persons_fetched, 3);

        let text = summary.to_string();
        assert!(text.contains("update: 2 calls, 0 failed (0 not found), 150.0 ms avg"));
        assert!(text.ends_with("persons fetched: 3"));
    }

    #[test]
    fn test_timer_records_into_shared_metrics() {
        let metrics = Metrics::new();
        let timer = OperationTimer::start(Operation::Delete, metrics.clone());
        assert_eq!(timer.operation().method(), "DELETE");
        timer.finish::<()>(&Err(PhonebookApiError::Timeout));

        assert_eq!(metrics.calls(Operation::Delete), 1);
        assert_eq!(metrics.failures(Operation::Delete), 1);
        assert_eq!(metrics.not_found(Operation::Delete), 0);
    }
}
