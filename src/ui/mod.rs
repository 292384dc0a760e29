//! Line-oriented presentation layer for interactive chat sessions.
//!
//! - [`chat_loop`]: reads stdin, dispatches input through [`crate::commands`]
//!   and prints view changes published by [`crate::core::app::runtime`].
//! - [`renderer`]: turns successive [`crate::core::app::ChatView`] snapshots
//!   into the lines to print.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns domain logic and backend coordination.

pub mod chat_loop;
pub mod renderer;
