//! The agent: a long-lived registry of tools and result validators bound to a
//! dependency type `D` and a result type `R`, plus the synchronous dispatch
//! entry point.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::context::RunContext;
use crate::error::{AgentError, Result};
use crate::messaging::FunctionCall;
use crate::result::RunResult;
use crate::tools::{ToolBox, ToolError, ToolRegistry, ToolSchema};
use crate::validators::ValidatorBox;

/// Dynamic system prompt producer. An agent holds at most one.
pub type SystemPromptFn<D> = Arc<dyn Fn(&RunContext<D>) -> String + Send + Sync>;

pub struct Agent<D, R> {
    model: String,
    base_system_prompt: String,
    tools: ToolRegistry<D, R>,
    validators: Vec<ValidatorBox<D, R>>,
    system_prompt_fn: Option<SystemPromptFn<D>>,
}

impl<D, R> Agent<D, R> {
    pub fn new(model: impl Into<String>, base_system_prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_system_prompt: base_system_prompt.into(),
            tools: ToolRegistry::new(),
            validators: Vec::new(),
            system_prompt_fn: None,
        }
    }

    /// Register a tool under its own name and hand the same handle back.
    ///
    /// A tool already registered under that name is replaced.
    pub fn tool(&mut self, tool: ToolBox<D, R>) -> ToolBox<D, R> {
        if let Some(previous) = self.tools.register(tool.clone()) {
            tracing::warn!(tool = previous.name(), "replacing previously registered tool");
        }
        tool
    }

    /// Append a validator to the end of the chain and hand the same handle back.
    pub fn result_validator(&mut self, validator: ValidatorBox<D, R>) -> ValidatorBox<D, R> {
        self.validators.push(validator.clone());
        validator
    }

    /// Install the dynamic system prompt producer, replacing any earlier one.
    pub fn system_prompt(&mut self, prompt: SystemPromptFn<D>) -> SystemPromptFn<D> {
        self.system_prompt_fn = Some(prompt.clone());
        prompt
    }

    /// Base prompt followed by the dynamic prompt, when one is installed.
    pub fn instructions(&self, ctx: &RunContext<D>) -> String {
        match &self.system_prompt_fn {
            Some(dynamic) => {
                let extra = dynamic(ctx);
                if extra.is_empty() {
                    self.base_system_prompt.clone()
                } else if self.base_system_prompt.is_empty() {
                    extra
                } else {
                    format!("{}\n\n{}", self.base_system_prompt, extra)
                }
            }
            None => self.base_system_prompt.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_system_prompt(&self) -> &str {
        &self.base_system_prompt
    }

    pub fn deps_type(&self) -> &'static str {
        std::any::type_name::<D>()
    }

    pub fn result_type(&self) -> &'static str {
        std::any::type_name::<R>()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.names()
    }

    pub fn tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools.schemas()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.has(name)
    }

    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    pub fn has_system_prompt(&self) -> bool {
        self.system_prompt_fn.is_some()
    }

    /// Run one invocation to completion.
    ///
    /// With a function call, the named tool runs and its output becomes the
    /// candidate result; without one the candidate starts as `None`. Either
    /// way the candidate then passes through every validator in registration
    /// order. Nothing is retried here: unknown tools, tool failures and
    /// validator rejections are all returned to the caller.
    pub fn run_sync(&self, deps: D, function_call: Option<FunctionCall>) -> Result<RunResult<R>> {
        let run_id = Uuid::new_v4();
        let tool_name = function_call.as_ref().map(|c| c.name.as_str()).unwrap_or("");
        let span = tracing::debug_span!("agent_run", %run_id, model = %self.model, tool = tool_name);
        let _enter = span.enter();

        let ctx = RunContext::new(deps);

        let mut result = match function_call {
            Some(call) => Some(self.dispatch(&ctx, call)?),
            None => {
                tracing::trace!("no function call, validating empty result");
                None
            }
        };

        for validator in &self.validators {
            tracing::trace!(validator = validator.name(), "applying result validator");
            let validated = validator.validate(&ctx, result).map_err(|retry| {
                tracing::debug!(validator = validator.name(), reason = %retry, "validator requested retry");
                retry
            })?;
            result = Some(validated);
        }

        Ok(RunResult::with_run_id(result, run_id))
    }

    fn dispatch(&self, ctx: &RunContext<D>, call: FunctionCall) -> Result<R> {
        let FunctionCall { name, arguments } = call;
        let tool = self
            .tools
            .get(&name)
            .ok_or_else(|| AgentError::ToolNotFound { name: name.clone() })?;

        tracing::debug!(tool = %name, "dispatching tool");
        tool.call(ctx, arguments).map_err(|err| match err {
            ToolError::InvalidArguments(reason) => AgentError::InvalidArguments { tool: name, reason },
            ToolError::Execution(source) => AgentError::ToolExecution { tool: name, source },
        })
    }
}

impl<D, R> fmt::Debug for Agent<D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("model", &self.model)
            .field("deps_type", &self.deps_type())
            .field("result_type", &self.result_type())
            .field("tools", &self.tools.names())
            .field("validators", &self.validators.len())
            .field("system_prompt_fn", &self.system_prompt_fn.is_some())
            .finish()
    }
}
