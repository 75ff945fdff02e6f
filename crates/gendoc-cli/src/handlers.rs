//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; shared loading code is in
//! [`utils`].

mod completions;
mod fields;
mod generate;
mod preview;
mod utils;

pub use completions::handle_completions;
pub use fields::handle_fields;
pub use generate::handle_generate;
pub use preview::handle_preview;
