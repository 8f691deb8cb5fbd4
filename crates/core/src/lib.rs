//! # ToolRoute Core
//!
//! Domain types, traits, and error definitions for the ToolRoute
//! intent-classification and tool-dispatch engine. This crate has no
//! framework dependencies; every other crate depends inward on it.
//!
//! - [`tool`]: the `Tool` trait, structured results, and the registry
//! - [`intent`]: the classifier's routing decision
//! - [`message`]: transcript messages and the request/response wire shapes
//! - [`error`]: error taxonomy

pub mod error;
pub mod intent;
pub mod message;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{ToolError, TurnError};
pub use intent::Intent;
pub use message::{ChatRequest, ChatResponse, Message, Role};
pub use tool::{Tool, ToolDescriptor, ToolRegistry, ToolResult};
