//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves its inputs into settings
//! 2. Calls the engine to do the work
//! 3. Formats and displays output
//!
//! Generation involves network I/O, so its handler wraps the async engine
//! in a tokio runtime.

mod completion;
mod generate;

pub use completion::completion;
pub use generate::generate;

use crate::cli::args::{Command, GenerateArgs};
use crate::engine::Context;
use anyhow::Result;

/// Dispatch to a handler.
///
/// With no subcommand the top-level flags drive a generation run.
pub fn dispatch(command: Option<Command>, args: GenerateArgs, ctx: &Context) -> Result<()> {
    match command {
        Some(Command::Completion { shell }) => completion::completion(shell),
        None => generate::generate(ctx, args),
    }
}
