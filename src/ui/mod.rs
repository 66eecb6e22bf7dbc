//! Terminal output for the command line.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing to the terminal
//! - [`MockUI`] capturing output in tests
//!
//! # Example
//!
//! ```
//! use rendercache::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Rendered books.tpl.php");
//! assert_eq!(ui.successes(), ["Rendered books.tpl.php"]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, CacheTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Write command output verbatim to stdout, whatever the mode.
    fn emit(&mut self, text: &str);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}
