pub mod engine;
pub mod row;

pub use engine::layout;
pub use row::DisplayRow;
