//! Agent system for tool-calling task execution.
//!
//! The hosted model chooses which tool to call and when; the agent only
//! dispatches those calls to the scraping and speech services and feeds the
//! results back.

pub(crate) mod runner;
pub(crate) mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
