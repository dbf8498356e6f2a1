//! Run session use case.
//!
//! Wraps a test run in the host lifecycle: start the host, wait until it is
//! ready, run the setup hook, execute every descriptor, run the teardown hook.

use std::sync::Arc;

use tracing::{info, warn};

use sequent_domain::{ContextStore, RunError, RunOutcome, RunSummary, TestDescriptor};

use crate::error::ApplicationResult;
use crate::ports::{
    Clock, DataSource, HookStage, Host, HttpTransport, LifecycleHook, OperatorPrompt, Reporter,
    SilentReporter,
};
use crate::runner::{DEFAULT_BASE_PATH, RunnerSettings, TestRunner};

/// Input for a run session.
#[derive(Debug, Clone, Default)]
pub struct RunSessionInput {
    /// Descriptors in execution order.
    pub descriptors: Vec<TestDescriptor>,
    /// Values available to interpolation before the first test.
    pub context: ContextStore,
}

impl RunSessionInput {
    /// Input with an empty starting context.
    #[must_use]
    pub fn new(descriptors: Vec<TestDescriptor>) -> Self {
        Self {
            descriptors,
            context: ContextStore::new(),
        }
    }
}

/// Use case running descriptors against a host.
pub struct RunSession {
    host: Arc<dyn Host>,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    reporter: Arc<dyn Reporter>,
    before: Option<Arc<dyn LifecycleHook>>,
    after: Option<Arc<dyn LifecycleHook>>,
    data_source: Option<String>,
    base_path: String,
}

impl RunSession {
    /// Creates a session without hooks.
    #[must_use]
    pub fn new(
        host: Arc<dyn Host>,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            host,
            transport,
            clock,
            reporter: Arc::new(SilentReporter),
            before: None,
            after: None,
            data_source: None,
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }

    /// Sets the progress reporter (builder pattern).
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Sets the setup hook (builder pattern).
    #[must_use]
    pub fn with_before_hook(mut self, hook: Arc<dyn LifecycleHook>) -> Self {
        self.before = Some(hook);
        self
    }

    /// Sets the teardown hook (builder pattern).
    #[must_use]
    pub fn with_after_hook(mut self, hook: Arc<dyn LifecycleHook>) -> Self {
        self.after = Some(hook);
        self
    }

    /// Names the host data source handed to both hooks (builder pattern).
    #[must_use]
    pub fn with_data_source(mut self, name: impl Into<String>) -> Self {
        self.data_source = Some(name.into());
        self
    }

    /// Overrides the base path segment (builder pattern).
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Runs the session and returns its single outcome.
    ///
    /// # Errors
    /// Only runner misuse surfaces as an error; test failures and an
    /// unavailable host are reported through the outcome.
    pub async fn execute(
        &self,
        input: RunSessionInput,
        prompt: &dyn OperatorPrompt,
    ) -> ApplicationResult<RunOutcome> {
        if let Err(e) = self.start_host().await {
            warn!(error = %e, "host unavailable");
            let outcome = RunOutcome::Failed {
                summary: RunSummary::default(),
                error: RunError::HostUnavailable(e.to_string()),
            };
            self.reporter.run_finished(&outcome);
            return Ok(outcome);
        }

        let source = self
            .data_source
            .as_deref()
            .and_then(|name| self.host.data_source(name));

        self.call_hook(HookStage::Before, self.before.as_ref(), source.clone())
            .await;

        let settings = RunnerSettings::new(self.host.base_url()).with_base_path(&self.base_path);
        info!(base_url = %settings.base_url, base_path = %settings.base_path, "host ready");

        let mut runner = TestRunner::new(
            input.descriptors,
            Arc::clone(&self.transport),
            Arc::clone(&self.clock),
            settings,
        )
        .with_reporter(Arc::clone(&self.reporter))
        .with_context(input.context);

        let outcome = runner.run(prompt).await;

        self.call_hook(HookStage::After, self.after.as_ref(), source)
            .await;

        outcome
    }

    async fn start_host(&self) -> Result<(), crate::ports::HostError> {
        self.host.start().await?;
        self.host.wait_ready().await
    }

    async fn call_hook(
        &self,
        stage: HookStage,
        hook: Option<&Arc<dyn LifecycleHook>>,
        source: Option<Arc<dyn DataSource>>,
    ) {
        let Some(hook) = hook else {
            return;
        };

        if let Err(e) = hook.call(source).await {
            warn!(stage = stage.as_str(), error = %e, "lifecycle hook failed");
            self.reporter.hook_failed(stage, &e.to_string());
        }
    }
}
