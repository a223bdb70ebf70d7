//! Interactive merge
//!
//! - `session`: the mutable merged buffer and its accept/undo/redo actions
//! - `history`: bounded snapshot stacks backing undo/redo
//! - `step`: scripted merge actions as accepted by the CLI

pub mod history;
pub mod session;
pub mod step;
