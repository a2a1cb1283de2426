//! Shell command-line construction
//!
//! Command lines are built as ordered sequences of [`ShellToken`]s. Each
//! token carries its own quoting policy: flag names and other literal tokens
//! are rendered verbatim, while value tokens are shell-escaped on rendering.
//! Collapsing that distinction (joining raw strings with spaces) is how
//! argument injection happens, so it is preserved all the way to the final
//! rendered string.

mod builder;
mod token;

pub use builder::CommandLineBuilder;
pub use token::{render_command_line, ShellToken};
