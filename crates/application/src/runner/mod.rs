//! Test runner.
//!
//! Executes registered descriptors one at a time, in order, against the
//! transport. The runner is an explicit state machine:
//!
//! ```text
//! Idle ─advance─▶ Running ─advance─▶ … ─▶ Completed
//!                    │                  ╲
//!                 break: true            ─▶ Failed
//!                    ▼
//!          AwaitingConfirmation ─resume(true)─▶ Running
//!                    └──────────resume(false)─▶ Aborted
//! ```
//!
//! [`TestRunner::run`] drives the machine to a terminal state, asking the
//! operator at every breakpoint. Callers that need finer control can call
//! [`TestRunner::advance`] and [`TestRunner::resume`] themselves.

mod prepare;

pub use prepare::{DEFAULT_BASE_PATH, RunnerSettings, prepare_request};

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use sequent_domain::{
    ContextStore, PreparedRequest, RunError, RunOutcome, RunState, RunSummary, TestDescriptor,
    TestFailure, TestRecord, TestResponse, TestStatus,
};

use crate::error::{ApplicationError, ApplicationResult};
use crate::extractor::extract;
use crate::matcher::ExpectationMatcher;
use crate::ports::{
    Clock, Diagnostics, HttpTransport, OperatorPrompt, Reporter, SilentReporter, TransportError,
};

/// Result of one [`TestRunner::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The descriptor at this index was skipped.
    Skipped(usize),
    /// The descriptor at this index passed.
    Passed(usize),
    /// The descriptor at this index passed and asks for confirmation before
    /// the run continues.
    Breakpoint(usize),
    /// The run reached a terminal state.
    Finished(RunOutcome),
}

/// Sequential executor for a list of descriptors.
pub struct TestRunner {
    descriptors: Vec<TestDescriptor>,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    reporter: Arc<dyn Reporter>,
    matcher: ExpectationMatcher,
    settings: RunnerSettings,
    context: ContextStore,
    state: RunState,
    cursor: usize,
    summary: RunSummary,
}

impl TestRunner {
    /// Creates an idle runner over `descriptors`.
    #[must_use]
    pub fn new(
        descriptors: Vec<TestDescriptor>,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
        settings: RunnerSettings,
    ) -> Self {
        Self {
            descriptors,
            transport,
            clock,
            reporter: Arc::new(SilentReporter),
            matcher: ExpectationMatcher::new(),
            settings,
            context: ContextStore::new(),
            state: RunState::Idle,
            cursor: 0,
            summary: RunSummary::default(),
        }
    }

    /// Sets the progress reporter (builder pattern).
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Seeds the context store (builder pattern).
    #[must_use]
    pub fn with_context(mut self, context: ContextStore) -> Self {
        self.context = context;
        self
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Context store as it stands.
    #[must_use]
    pub const fn context(&self) -> &ContextStore {
        &self.context
    }

    /// Records accumulated so far. Empty once the outcome was delivered.
    #[must_use]
    pub const fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Executes exactly one descriptor.
    ///
    /// # Errors
    /// Returns [`ApplicationError::InvalidTransition`] when called while
    /// awaiting confirmation or after the run finished.
    pub async fn advance(&mut self) -> ApplicationResult<Step> {
        match self.state {
            RunState::Idle => {
                info!(total = self.descriptors.len(), "run started");
                self.reporter.run_started(self.descriptors.len());
                self.state = RunState::Running;
            }
            RunState::Running => {}
            RunState::AwaitingConfirmation { index } => {
                return Err(ApplicationError::InvalidTransition(format!(
                    "awaiting confirmation after test {index}"
                )));
            }
            RunState::Completed | RunState::Aborted | RunState::Failed => {
                return Err(ApplicationError::InvalidTransition(
                    "run already finished".to_string(),
                ));
            }
        }

        let index = self.cursor;
        let Some(descriptor) = self.descriptors.get(index).cloned() else {
            let summary = std::mem::take(&mut self.summary);
            return Ok(Step::Finished(self.finish(RunOutcome::Completed(summary))));
        };

        self.reporter.test_started(index, &descriptor.title);

        if descriptor.skip {
            debug!(index, title = %descriptor.title, "test skipped");
            self.reporter.test_skipped(index, &descriptor.title);
            self.summary
                .records
                .push(TestRecord::skipped(index, descriptor.title));
            self.cursor += 1;
            return Ok(Step::Skipped(index));
        }

        let mut record = TestRecord {
            index,
            title: descriptor.title.clone(),
            status: TestStatus::Passed,
            started_at: None,
            duration: None,
        };

        let result = self.execute(&descriptor, &mut record).await;
        self.cursor += 1;

        match result {
            Ok(()) => {
                self.reporter.test_passed(
                    index,
                    &descriptor.title,
                    record.duration.unwrap_or_default(),
                );
                self.summary.records.push(record);

                if descriptor.breakpoint {
                    self.state = RunState::AwaitingConfirmation { index };
                    return Ok(Step::Breakpoint(index));
                }
                Ok(Step::Passed(index))
            }
            Err(failure) => {
                warn!(index, title = %descriptor.title, kind = failure.kind(), "test failed");
                record.status = TestStatus::Failed;
                self.summary.records.push(record);

                let summary = std::mem::take(&mut self.summary);
                let error = RunError::Test {
                    index,
                    title: descriptor.title,
                    failure,
                };
                Ok(Step::Finished(
                    self.finish(RunOutcome::Failed { summary, error }),
                ))
            }
        }
    }

    /// Answers a breakpoint.
    ///
    /// Returns the `Aborted` outcome when `proceed` is false and `None` when
    /// the run continues.
    ///
    /// # Errors
    /// Returns [`ApplicationError::InvalidTransition`] unless the runner is
    /// awaiting confirmation.
    pub fn resume(&mut self, proceed: bool) -> ApplicationResult<Option<RunOutcome>> {
        let RunState::AwaitingConfirmation { index } = self.state else {
            return Err(ApplicationError::InvalidTransition(format!(
                "resume called in state {:?}",
                self.state
            )));
        };

        if proceed {
            debug!(after = index, "operator continued");
            self.state = RunState::Running;
            return Ok(None);
        }

        info!(after = index, "operator aborted the run");
        let summary = std::mem::take(&mut self.summary);
        Ok(Some(
            self.finish(RunOutcome::Aborted {
                summary,
                after: index,
            }),
        ))
    }

    /// Runs every remaining descriptor and returns the outcome.
    ///
    /// Breakpoints are answered through `prompt`; an unreadable answer aborts.
    ///
    /// # Errors
    /// Returns [`ApplicationError::InvalidTransition`] if the run already
    /// finished.
    pub async fn run(&mut self, prompt: &dyn OperatorPrompt) -> ApplicationResult<RunOutcome> {
        loop {
            match self.advance().await? {
                Step::Skipped(_) | Step::Passed(_) => {}
                Step::Breakpoint(index) => {
                    let title = self
                        .descriptors
                        .get(index)
                        .map_or("", |d| d.title.as_str());
                    let question = format!("Breakpoint after [{index}] {title}. Continue?");
                    let proceed = prompt.confirm(&question).await.unwrap_or_else(|e| {
                        warn!(error = %e, "operator prompt failed, aborting");
                        false
                    });
                    if let Some(outcome) = self.resume(proceed)? {
                        return Ok(outcome);
                    }
                }
                Step::Finished(outcome) => return Ok(outcome),
            }
        }
    }

    async fn execute(
        &mut self,
        descriptor: &TestDescriptor,
        record: &mut TestRecord,
    ) -> Result<(), TestFailure> {
        let request = prepare_request(descriptor, &self.context, &self.settings)?;
        debug!(method = %request.method, url = %request.url, "dispatching request");

        record.started_at = Some(self.clock.now());
        let timer = Instant::now();
        let result = self.transport.send(&request).await;
        let elapsed = timer.elapsed();
        record.duration = Some(elapsed);

        let mut response = match result {
            Ok(response) => response,
            Err(TransportError::Status(response))
                if response.status == descriptor.expect.status_code =>
            {
                debug!(
                    status = response.status,
                    "error status matches the expectation"
                );
                *response
            }
            Err(err) => {
                let failure = TestFailure::TransportFailure {
                    status: err.status(),
                    message: err.to_string(),
                };
                self.dump_failure(&request, err.response(), &failure);
                return Err(failure);
            }
        };
        response.duration = elapsed;

        let checks = match self
            .matcher
            .check(&response, &descriptor.expect, &self.context)
        {
            Ok(checks) => checks,
            Err(failure) => {
                self.dump_failure(&request, Some(&response), &failure);
                return Err(failure);
            }
        };

        let assignments = match extract(
            &response.body,
            &descriptor.variables,
            &mut self.context,
        ) {
            Ok(assignments) => assignments,
            Err(failure) => {
                self.dump_failure(&request, Some(&response), &failure);
                return Err(failure);
            }
        };

        // Only passing tests reach this point.
        if descriptor.debug {
            self.reporter.debug_dump(&Diagnostics {
                request: &request,
                context: &self.context,
                response: Some(&response),
            });
        }

        for check in &checks {
            self.reporter.check_passed(check);
        }
        for assignment in &assignments {
            self.reporter
                .variable_assigned(&assignment.name, &assignment.value);
        }
        Ok(())
    }

    fn dump_failure(
        &self,
        request: &PreparedRequest,
        response: Option<&TestResponse>,
        failure: &TestFailure,
    ) {
        self.reporter.failure_dump(
            &Diagnostics {
                request,
                context: &self.context,
                response,
            },
            failure,
        );
    }

    fn finish(&mut self, outcome: RunOutcome) -> RunOutcome {
        self.state = outcome.state();
        let summary = outcome.summary();
        info!(
            state = ?self.state,
            passed = summary.passed(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "run finished"
        );
        self.reporter.run_finished(&outcome);
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::PromptError;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use sequent_domain::HttpMethod;
    use serde_json::{Value, json};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Transport that replays scripted responses and records what it was sent.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<TestResponse, TransportError>>>,
        sent: Mutex<Vec<PreparedRequest>>,
    }

    impl ScriptedTransport {
        fn reply(self, status: u16, body: Value) -> Self {
            self.reply_with(status, body, &[])
        }

        fn reply_with(self, status: u16, body: Value, headers: &[(&str, &str)]) -> Self {
            let headers: HashMap<String, String> = headers
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect();
            let response = TestResponse::new(status, headers, body, Duration::from_millis(5));
            let reply = if (200..300).contains(&status) {
                Ok(response)
            } else {
                Err(TransportError::Status(Box::new(response)))
            };
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        fn fail(self, error: TransportError) -> Self {
            self.replies.lock().unwrap().push_back(Err(error));
            self
        }

        fn sent_urls(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.url.clone())
                .collect()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn send(&self, request: &PreparedRequest) -> Result<TestResponse, TransportError> {
            self.sent.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Other("no scripted reply".to_string())))
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    struct Answers(Mutex<VecDeque<Result<bool, PromptError>>>);

    impl Answers {
        fn new(answers: Vec<Result<bool, PromptError>>) -> Self {
            Self(Mutex::new(answers.into()))
        }
    }

    #[async_trait]
    impl OperatorPrompt for Answers {
        async fn confirm(&self, _question: &str) -> Result<bool, PromptError> {
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(PromptError::Closed))
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl Reporter for RecordingReporter {
        fn test_skipped(&self, index: usize, _title: &str) {
            self.push(format!("skipped {index}"));
        }

        fn variable_assigned(&self, name: &str, value: &Value) {
            self.push(format!("var {name}={value}"));
        }

        fn debug_dump(&self, _diagnostics: &Diagnostics<'_>) {
            self.push("debug".to_string());
        }

        fn failure_dump(&self, diagnostics: &Diagnostics<'_>, failure: &TestFailure) {
            self.push(format!(
                "failure {} response={}",
                failure.kind(),
                diagnostics.response.is_some()
            ));
        }

        fn run_finished(&self, outcome: &RunOutcome) {
            self.push(format!("finished {:?}", outcome.state()));
        }
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()))
    }

    fn descriptors(values: Vec<Value>) -> Vec<TestDescriptor> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    fn runner(transport: &Arc<ScriptedTransport>, values: Vec<Value>) -> TestRunner {
        TestRunner::new(
            descriptors(values),
            transport.clone(),
            clock(),
            RunnerSettings::new("http://localhost:3000"),
        )
    }

    fn always_yes() -> Answers {
        Answers::new((0..8).map(|_| Ok(true)).collect())
    }

    #[tokio::test]
    async fn test_extracted_id_feeds_next_url() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(201, json!({"id": 7, "name": "Widget"}))
                .reply(200, json!({"id": 7})),
        );
        let mut runner = runner(
            &transport,
            vec![
                json!({
                    "title": "create",
                    "method": "POST",
                    "url": "widgets/${id}",
                    "expect": {"statusCode": 201, "bodyType": "object", "properties": {"name": "string"}},
                    "variables": ["id"]
                }),
                json!({"title": "read", "url": "widgets/${id}"}),
            ],
        );

        let outcome = runner.run(&always_yes()).await.unwrap();

        assert!(matches!(outcome, RunOutcome::Completed(_)));
        assert_eq!(outcome.summary().passed(), 2);
        assert_eq!(
            transport.sent_urls(),
            vec![
                "http://localhost:3000/api/widgets/${id}",
                "http://localhost:3000/api/widgets/7"
            ]
        );
        assert_eq!(runner.context().get("id"), Some(&json!(7)));
        assert_eq!(runner.state(), RunState::Completed);
    }

    #[tokio::test]
    async fn test_expected_error_status_is_a_pass() {
        let transport = Arc::new(
            ScriptedTransport::default().reply(404, json!({"error": {"message": "not found"}})),
        );
        let mut runner = runner(
            &transport,
            vec![json!({
                "url": "widgets/999",
                "expect": {"statusCode": 404, "properties": {"error.message": "string"}},
                "variables": ["error.message:reason"]
            })],
        );

        let outcome = runner.run(&always_yes()).await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(runner.context().get("reason"), Some(&json!("not found")));
    }

    #[tokio::test]
    async fn test_unexpected_error_status_is_transport_failure() {
        let transport = Arc::new(ScriptedTransport::default().reply(500, json!("boom")));
        let reporter = Arc::new(RecordingReporter::default());
        let mut runner =
            runner(&transport, vec![json!({"url": "widgets"})]).with_reporter(reporter.clone());

        let outcome = runner.run(&always_yes()).await.unwrap();

        match outcome.error() {
            Some(RunError::Test { index, failure, .. }) => {
                assert_eq!(*index, 0);
                assert!(matches!(
                    failure,
                    TestFailure::TransportFailure {
                        status: Some(500),
                        ..
                    }
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            reporter.events(),
            vec!["failure TransportFailure response=true", "finished Failed"]
        );
    }

    #[tokio::test]
    async fn test_network_error_is_transport_failure() {
        let transport = Arc::new(
            ScriptedTransport::default().fail(TransportError::Connection("refused".to_string())),
        );
        let mut runner = runner(&transport, vec![json!({"url": "widgets"})]);

        let outcome = runner.run(&always_yes()).await.unwrap();

        assert!(matches!(
            outcome.error(),
            Some(RunError::Test {
                failure: TestFailure::TransportFailure { status: None, .. },
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_missing_header_stops_the_run() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(200, json!({}))
                .reply(200, json!({})),
        );
        let mut runner = runner(
            &transport,
            vec![
                json!({"title": "traced", "url": "a", "expect": {"headers": {"x-trace": "abc"}}}),
                json!({"title": "never", "url": "b"}),
            ],
        );

        let outcome = runner.run(&always_yes()).await.unwrap();

        assert_eq!(
            outcome.error(),
            Some(&RunError::Test {
                index: 0,
                title: "traced".to_string(),
                failure: TestFailure::MissingHeader {
                    name: "x-trace".to_string()
                }
            })
        );
        assert_eq!(transport.sent_urls().len(), 1);
        assert_eq!(outcome.summary().failed(), 1);
        assert!(runner.advance().await.is_err());
    }

    #[tokio::test]
    async fn test_skipped_tests_are_not_sent() {
        let transport = Arc::new(ScriptedTransport::default().reply(200, json!([])));
        let reporter = Arc::new(RecordingReporter::default());
        let mut runner = runner(
            &transport,
            vec![
                json!({"title": "later", "url": "a", "skip": true}),
                json!({"title": "list", "url": "b", "expect": {"bodyType": "array"}}),
            ],
        )
        .with_reporter(reporter.clone());

        assert_eq!(runner.advance().await.unwrap(), Step::Skipped(0));
        assert_eq!(runner.advance().await.unwrap(), Step::Passed(1));
        let Step::Finished(outcome) = runner.advance().await.unwrap() else {
            panic!("expected the run to finish");
        };

        assert_eq!(outcome.summary().skipped(), 1);
        assert_eq!(outcome.summary().passed(), 1);
        assert_eq!(transport.sent_urls(), vec!["http://localhost:3000/api/b"]);
        assert_eq!(reporter.events(), vec!["skipped 0", "finished Completed"]);
    }

    #[tokio::test]
    async fn test_breakpoint_transitions() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(200, json!({}))
                .reply(200, json!({})),
        );
        let mut runner = runner(
            &transport,
            vec![
                json!({"title": "first", "url": "a", "break": true}),
                json!({"title": "second", "url": "b"}),
            ],
        );

        assert_eq!(runner.state(), RunState::Idle);
        assert_eq!(runner.advance().await.unwrap(), Step::Breakpoint(0));
        assert_eq!(
            runner.state(),
            RunState::AwaitingConfirmation { index: 0 }
        );
        assert!(runner.advance().await.is_err());

        assert_eq!(runner.resume(true).unwrap(), None);
        assert_eq!(runner.state(), RunState::Running);
        assert!(runner.resume(true).is_err());

        assert_eq!(runner.advance().await.unwrap(), Step::Passed(1));
        assert!(matches!(
            runner.advance().await.unwrap(),
            Step::Finished(RunOutcome::Completed(_))
        ));
    }

    #[tokio::test]
    async fn test_declined_breakpoint_aborts() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(200, json!({}))
                .reply(200, json!({})),
        );
        let mut runner = runner(
            &transport,
            vec![
                json!({"title": "first", "url": "a", "break": true}),
                json!({"title": "second", "url": "b"}),
            ],
        );

        let outcome = runner
            .run(&Answers::new(vec![Ok(false)]))
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert!(matches!(outcome, RunOutcome::Aborted { after: 0, .. }));
        assert_eq!(outcome.summary().passed(), 1);
        assert_eq!(transport.sent_urls().len(), 1);
        assert_eq!(runner.state(), RunState::Aborted);
    }

    #[tokio::test]
    async fn test_prompt_error_aborts() {
        let transport = Arc::new(ScriptedTransport::default().reply(200, json!({})));
        let mut runner = runner(
            &transport,
            vec![json!({"url": "a", "break": true}), json!({"url": "b"})],
        );

        let outcome = runner
            .run(&Answers::new(vec![Err(PromptError::Closed)]))
            .await
            .unwrap();

        assert!(matches!(outcome, RunOutcome::Aborted { .. }));
    }

    #[tokio::test]
    async fn test_missing_extraction_path_fails() {
        let transport = Arc::new(ScriptedTransport::default().reply(200, json!({"id": 1})));
        let mut runner = runner(&transport, vec![json!({"url": "a", "variables": ["token"]})]);

        let outcome = runner.run(&always_yes()).await.unwrap();

        assert!(matches!(
            outcome.error(),
            Some(RunError::Test {
                failure: TestFailure::MissingExtractionPath { .. },
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_debug_dump_happens_once_after_matching() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(200, json!({"id": 1}))
                .reply(200, json!({})),
        );
        let reporter = Arc::new(RecordingReporter::default());
        let mut runner = runner(
            &transport,
            vec![
                json!({"url": "a", "debug": true, "variables": ["id"]}),
                json!({"url": "b", "debug": true, "expect": {"statusCode": 201}}),
            ],
        )
        .with_reporter(reporter.clone());

        let _ = runner.run(&always_yes()).await.unwrap();

        assert_eq!(
            reporter.events(),
            vec![
                "debug",
                "var id=1",
                "failure StatusMismatch response=true",
                "finished Failed"
            ]
        );
    }

    #[tokio::test]
    async fn test_debug_test_failing_extraction_dumps_once() {
        let transport = Arc::new(ScriptedTransport::default().reply(200, json!({"id": 1})));
        let reporter = Arc::new(RecordingReporter::default());
        let mut runner = runner(
            &transport,
            vec![json!({"url": "a", "debug": true, "variables": ["token"]})],
        )
        .with_reporter(reporter.clone());

        let _ = runner.run(&always_yes()).await.unwrap();

        assert_eq!(
            reporter.events(),
            vec![
                "failure MissingExtractionPath response=true",
                "finished Failed"
            ]
        );
    }

    #[tokio::test]
    async fn test_records_carry_timestamp_and_method() {
        let transport = Arc::new(ScriptedTransport::default().reply(200, json!({})));
        let mut runner = runner(
            &transport,
            vec![json!({"title": "drop", "method": "DELETE", "url": "widgets/1"})],
        );

        let outcome = runner.run(&always_yes()).await.unwrap();

        let record = &outcome.summary().records[0];
        assert_eq!(record.status, TestStatus::Passed);
        assert_eq!(
            record.started_at,
            Some(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
        );
        assert!(record.duration.is_some());
        assert_eq!(
            transport.sent.lock().unwrap()[0].method,
            HttpMethod::Delete
        );
    }

    #[tokio::test]
    async fn test_empty_run_completes() {
        let transport = Arc::new(ScriptedTransport::default());
        let mut runner = runner(&transport, Vec::new());

        let outcome = runner.run(&always_yes()).await.unwrap();

        assert_eq!(outcome, RunOutcome::Completed(RunSummary::default()));
        assert!(runner.run(&always_yes()).await.is_err());
    }
}
