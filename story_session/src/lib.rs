//! # Story Session
//!
//! The moving half of the story: a reader's session over a
//! [`story_graph::StoryGraph`], the view model it exposes, and the terminal
//! front end that drives it.
//!
//! ## Core Components
//!
//! - **session**: Traversal controller with history and single-step backtracking
//! - **action**: Reader actions and the transitions they produce
//! - **view**: Serializable snapshot for any rendering surface
//! - **render** / **input**: Terminal layout and command parsing
//! - **play**: The interactive read-eval loop
//! - **config**: File and environment configuration

pub mod action;
pub mod config;
pub mod error;
pub mod input;
pub mod play;
pub mod render;
pub mod session;
pub mod view;

pub use action::*;
pub use config::*;
pub use error::*;
pub use session::*;
pub use view::*;
