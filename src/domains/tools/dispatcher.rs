//! Tool dispatch: resolve, validate, execute, normalise.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use super::arguments::{Arguments, check_constraints, coerce};
use super::error::ToolError;
use super::registry::ToolRegistry;
use super::result::ToolResult;
use super::schema::ToolDescriptor;

/// Resolves invocations against a read-only registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Validate a raw argument bag against the descriptor's declared parameters.
    ///
    /// Arguments not declared by the tool are ignored.
    pub fn validate(
        descriptor: &ToolDescriptor,
        raw: &Map<String, Value>,
    ) -> Result<Arguments, ToolError> {
        let mut args = Arguments::new();

        for spec in &descriptor.parameters {
            let value = match raw.get(spec.name).filter(|v| !v.is_null()) {
                Some(raw_value) => coerce(spec, raw_value)?,
                None if spec.required => return Err(ToolError::missing_parameter(spec.name)),
                None => match &spec.default {
                    Some(default) => default.clone(),
                    None => continue,
                },
            };
            check_constraints(spec, &value)?;
            args.insert(spec.name, value);
        }

        for key in raw.keys() {
            if !descriptor.parameters.iter().any(|p| p.name == key.as_str()) {
                debug!("Ignoring undeclared argument '{}' for {}", key, descriptor.name);
            }
        }

        Ok(args)
    }

    /// Run a tool and return its text, or the classified failure.
    #[instrument(skip(self, raw), fields(tool = %name))]
    pub async fn call(&self, name: &str, raw: &Map<String, Value>) -> Result<String, ToolError> {
        let descriptor = self.registry.resolve(name)?;
        let args = Self::validate(descriptor, raw)?;

        info!("Executing tool {}", name);
        match AssertUnwindSafe(descriptor.executor.execute(&args))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => Err(ToolError::executor(format!(
                "Tool '{}' failed unexpectedly: {}",
                name,
                panic_message(panic.as_ref())
            ))),
        }
    }

    /// Run a tool; every failure becomes [`ToolResult::Error`].
    pub async fn invoke(&self, name: &str, raw: &Map<String, Value>) -> ToolResult {
        match self.call(name, raw).await {
            Ok(text) => ToolResult::Text(text),
            Err(e) => {
                warn!("Tool {} failed ({:?}): {}", name, e.kind(), e);
                ToolResult::Error(e.to_string())
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
