//! View-independent UI state shared by every tab.

mod search;
mod status;

pub use search::SearchInput;
pub use status::StatusMessage;
