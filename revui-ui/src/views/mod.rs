pub mod bookmarks;
pub mod describe;
pub mod help;

pub use bookmarks::{distance_map, BookmarkCommand, BookmarkPicker, CommandKind, PickerOutcome};
pub use describe::{DescribeEditor, EditorOutcome};
pub use help::help_line;
