pub mod palette;
pub mod render;
pub mod segment;
pub mod views;

pub use palette::{paint, Palette};
pub use render::{Overlay, RowRenderer};
pub use segment::Segment;
pub use views::{
    help_line, BookmarkCommand, BookmarkPicker, CommandKind, DescribeEditor, EditorOutcome,
    PickerOutcome,
};
