//! Tool registry: descriptors advertised to the model plus the local
//! executors that back them.
//!
//! A malformed tool call degrades the answer, it must not abort the request:
//! argument failures are converted into human-readable result content that
//! the follow-up model call can still reason about. Each one is also logged
//! server-side so operators see the signal.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::errors::ApiError;
use crate::llm::{ToolCall, ToolCallResult, ToolDescriptor};

pub mod weather;

pub use weather::WeatherTool;

/// A local tool implementation. Soft failures (unknown city, upstream HTTP
/// error) are `Ok` content; only transport-level faults are `Err`.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, args: &Value) -> Result<String, ApiError>;
}

pub struct RegisteredTool {
    descriptor: ToolDescriptor,
    executor: Arc<dyn ToolExecutor>,
}

impl RegisteredTool {
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// Parse and validate the call's raw arguments, then execute.
    ///
    /// Parse failures and missing required parameters become result content
    /// ("fail soft into content"), never an error.
    pub async fn invoke(&self, call: &ToolCall) -> Result<ToolCallResult, ApiError> {
        let raw = if call.function.arguments.trim().is_empty() {
            "{}"
        } else {
            call.function.arguments.as_str()
        };

        let args: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    "tool `{}` received unparseable arguments: {}",
                    self.descriptor.name,
                    err
                );
                return Ok(ToolCallResult {
                    tool_call_id: call.id.clone(),
                    content: format!(
                        "Could not run tool `{}`: arguments were not valid JSON.",
                        self.descriptor.name
                    ),
                });
            }
        };

        let missing: Vec<&str> = self
            .descriptor
            .required_parameters()
            .into_iter()
            .filter(|name| args.get(name).map_or(true, Value::is_null))
            .collect();
        if !missing.is_empty() {
            tracing::warn!(
                "tool `{}` called without required arguments: {}",
                self.descriptor.name,
                missing.join(", ")
            );
            return Ok(ToolCallResult {
                tool_call_id: call.id.clone(),
                content: format!(
                    "Could not run tool `{}`: missing required argument(s): {}.",
                    self.descriptor.name,
                    missing.join(", ")
                ),
            });
        }

        let content = self.executor.execute(&args).await?;
        Ok(ToolCallResult {
            tool_call_id: call.id.clone(),
            content,
        })
    }
}

/// Holds tool descriptors and executors. Built at startup, immutable
/// afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ToolDescriptor, executor: Arc<dyn ToolExecutor>) {
        self.tools.insert(
            descriptor.name.clone(),
            RegisteredTool {
                descriptor,
                executor,
            },
        );
    }

    pub fn resolve(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .values()
            .map(|tool| tool.descriptor.clone())
            .collect()
    }

    /// Resolve-and-invoke convenience; an unknown name is a caller error
    /// here. The orchestrator resolves first so it can skip unknown names
    /// instead.
    pub async fn invoke(&self, call: &ToolCall) -> Result<ToolCallResult, ApiError> {
        let tool = self
            .resolve(&call.function.name)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown tool: {}", call.function.name)))?;
        tool.invoke(call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FunctionCall;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl ToolExecutor for EchoTool {
        async fn execute(&self, args: &Value) -> Result<String, ApiError> {
            Ok(format!("echo: {}", args["city"].as_str().unwrap_or("?")))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(
            ToolDescriptor {
                name: "echo".to_string(),
                description: "echoes the city".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": { "city": { "type": "string" } },
                    "required": ["city"],
                }),
            },
            Arc::new(EchoTool),
        );
        registry
    }

    fn call(arguments: &str) -> ToolCall {
        ToolCall {
            id: "call_1".to_string(),
            kind: "function".to_string(),
            function: FunctionCall {
                name: "echo".to_string(),
                arguments: arguments.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn valid_arguments_reach_the_executor() {
        let result = registry().invoke(&call(r#"{"city":"Berlin"}"#)).await.unwrap();
        assert_eq!(result.tool_call_id, "call_1");
        assert_eq!(result.content, "echo: Berlin");
    }

    #[tokio::test]
    async fn malformed_arguments_fail_soft_into_content() {
        let result = registry().invoke(&call("{not json")).await.unwrap();
        assert!(result.content.contains("not valid JSON"));
    }

    #[tokio::test]
    async fn missing_required_argument_fails_soft_into_content() {
        let result = registry().invoke(&call("{}")).await.unwrap();
        assert!(result.content.contains("missing required argument"));
        assert!(result.content.contains("city"));
    }

    #[tokio::test]
    async fn unknown_tool_does_not_resolve() {
        let registry = registry();
        assert!(registry.resolve("missing").is_none());

        let mut unknown = call("{}");
        unknown.function.name = "missing".to_string();
        assert!(registry.invoke(&unknown).await.is_err());
    }
}
