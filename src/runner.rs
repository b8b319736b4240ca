//! Run orchestrator
//!
//! Sequences authentication, then groups, then routes, strictly in
//! declared order: a later route's path may depend on an earlier route's
//! captured response, so nothing here runs concurrently.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::asserts::{self, EvalOptions, OutcomeKind};
use crate::capture::RequestLog;
use crate::chain::{self, ResponseEnvelope, ResponseStore};
use crate::config::schema::{BodyFormat, GroupConfig, RouteConfig, TestPlan};
use crate::error::{AuthError, Result};
use crate::model;
use crate::transport::HttpTransport;

/// Options controlling one run.
#[derive(Debug, Clone, Copy)]
pub struct RunnerOptions {
    /// Inclusive lower bound for the model builder's `int` directive.
    pub random_min: i64,
    /// Inclusive upper bound for the model builder's `int` directive.
    pub random_max: i64,
    /// Make `found`/`notFound` leaf type checks decisive.
    pub strict_types: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        let (random_min, random_max) = model::DEFAULT_RANDOM_RANGE;
        Self {
            random_min,
            random_max,
            strict_types: false,
        }
    }
}

/// Executes a test plan: authentication, then each group's routes in
/// order, capturing envelopes and evaluating assertions as it goes.
#[derive(Debug)]
pub struct Runner {
    plan: Arc<TestPlan>,
    transport: HttpTransport,
    options: RunnerOptions,
    log: Option<RequestLog>,
    token: Option<String>,
}

impl Runner {
    /// Creates a runner for the given plan.
    #[must_use]
    pub const fn new(
        plan: Arc<TestPlan>,
        transport: HttpTransport,
        options: RunnerOptions,
        log: Option<RequestLog>,
    ) -> Self {
        Self {
            plan,
            transport,
            options,
            log,
            token: None,
        }
    }

    /// Runs the whole plan.
    ///
    /// # Errors
    ///
    /// Returns an error on authentication failure, any transport failure,
    /// or the first hard assertion failure (fail-fast: no continuation to
    /// subsequent routes or groups).
    pub async fn run(&mut self) -> Result<()> {
        if self.plan.auth.is_some() {
            self.authenticate().await?;
        }

        let plan = Arc::clone(&self.plan);
        for group in &plan.groups {
            self.run_group(group).await?;
        }

        Ok(())
    }

    /// Performs the authentication call and stores the bearer token.
    async fn authenticate(&mut self) -> Result<()> {
        let Some(auth) = &self.plan.auth else {
            return Ok(());
        };

        let url = format!("{}{}", self.plan.url, auth.path);
        let credentials = json!({
            "username": auth.username,
            "password": auth.password,
        });

        info!("authenticating against {url}");

        let response = self
            .transport
            .send(auth.method, &url, None, Some(&credentials), BodyFormat::Json)
            .await?;

        let token = response
            .json_body
            .as_ref()
            .and_then(|body| body.get(&auth.token_name))
            .and_then(token_value)
            .ok_or_else(|| AuthError::TokenNotFound {
                token_name: auth.token_name.clone(),
            })?;

        self.token = Some(token);
        Ok(())
    }

    /// Runs one group with a fresh response store, so response data never
    /// leaks across groups.
    async fn run_group(&mut self, group: &GroupConfig) -> Result<()> {
        info!("running group {}", group.name);

        let mut store = ResponseStore::new();
        let body_model = group.model.as_ref().map(|fields| {
            model::build_model(
                fields,
                &group.name,
                self.options.random_min,
                self.options.random_max,
            )
        });

        for route in &group.routes {
            self.run_route(group, route, body_model.as_ref(), &mut store)
                .await?;
        }

        Ok(())
    }

    /// Runs one route: resolve path, send, log, assert, store.
    async fn run_route(
        &self,
        group: &GroupConfig,
        route: &RouteConfig,
        body_model: Option<&serde_json::Map<String, Value>>,
        store: &mut ResponseStore,
    ) -> Result<()> {
        let template = route.path.as_deref().unwrap_or("");

        let Some(path) = chain::resolve(template, store) else {
            // Unresolvable placeholders skip the route instead of hitting
            // a degraded URL.
            warn!(
                "skipping {} {}: could not resolve path '{template}'",
                route.method, route.name
            );
            return Ok(());
        };

        let url = format!("{}{}{}", self.plan.url, group.prefix, path);
        let body = route
            .method
            .takes_body()
            .then(|| body_model.cloned().map(Value::Object))
            .flatten();

        info!("run test for {} {url}", route.method);

        let response = self
            .transport
            .send(
                route.method,
                &url,
                self.token.as_deref(),
                body.as_ref(),
                route.format,
            )
            .await?;

        let envelope = ResponseEnvelope {
            url,
            method: route.method.to_string(),
            body,
            status: response.status,
            raw_body: response.raw_body,
            response: response.json_body,
            headers: response.headers,
        };

        if let Some(log) = &self.log {
            if let Err(e) = log.record(&envelope) {
                warn!("request log write failed: {e}");
            }
        }

        if let Some(spec) = &route.asserts {
            let eval_options = EvalOptions {
                strict_types: self.options.strict_types,
            };
            match asserts::evaluate(&envelope, spec, eval_options) {
                Ok(outcomes) => {
                    for outcome in outcomes {
                        match outcome.kind {
                            OutcomeKind::Passed => info!("test success {}", outcome.description),
                            OutcomeKind::Warning => warn!("{}", outcome.description),
                        }
                    }
                }
                Err(e) => {
                    error!("{} {} - {}", route.method, route.name, e.description);
                    return Err(e.into());
                }
            }
        }

        store.put(route.name.clone(), envelope);
        Ok(())
    }
}

/// Renders the configured token field as a bearer string.
///
/// Strings are taken as-is; numeric and boolean tokens are stringified.
/// Null and container values count as absent.
fn token_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
