//! Reusable widgets for the cityscope TUI.
//!
//! Both widgets implement the core [`Component`](cityscope_core::Component)
//! trait: data flows in through props, input flows out as actions built by
//! callback constructors in the props.
//!
//! - [`TextInput`]: single-line input with cursor
//! - [`SelectList`]: scrollable highlight list with optional substring
//!   emphasis

mod select_list;
mod text_input;

pub use select_list::{SelectList, SelectListProps};
pub use text_input::{TextInput, TextInputProps};
