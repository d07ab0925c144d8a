pub mod core;
pub mod layout;
pub mod screen;

pub use self::core::{Changeset, EdgeType, ParentLink};
pub use layout::{layout, DisplayRow};
pub use screen::{display_width, stacked, LineBuffer};
