//! Shell integration: command execution, the formatter pass and hooks

pub mod command_executor;
pub mod formatter;
pub mod hooks;

pub use command_executor::*;
pub use formatter::*;
pub use hooks::*;
