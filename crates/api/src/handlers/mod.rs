pub mod categories;
pub mod generation;
