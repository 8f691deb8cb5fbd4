//! The single-turn dispatch engine — the heart of ToolRoute.
//!
//! Each turn follows a **Classify → Execute → Render** sequence:
//!
//! 1. **Classify** the latest user utterance through an ordered rule cascade
//! 2. **Execute** the selected tool, if any (at most one per turn)
//! 3. **Render** a reply from the tool result or a conversational template
//!
//! The caller owns the transcript; a turn only returns messages to append.

pub mod classifier;
pub mod renderer;
pub mod turn;

pub use classifier::IntentClassifier;
pub use renderer::ResponseRenderer;
pub use turn::TurnRunner;
