pub mod changeset;
pub mod edge;

pub use changeset::Changeset;
pub use edge::{EdgeType, ParentLink};
