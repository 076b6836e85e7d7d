//! Command handlers for the CLI
//!
//! Each subcommand has its own module. Handlers take the bridge and an
//! [`OutputWriter`](crate::output::OutputWriter) so they can be driven in
//! tests without a terminal or a built native library.

mod completions;
mod describe;
mod interactive;
mod process;
mod utils;
mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use completions::handle_completions;
pub use describe::handle_describe;
pub use interactive::handle_interactive;
pub use process::handle_process;
pub use utils::open_bridge;
pub use validate::handle_validate;
