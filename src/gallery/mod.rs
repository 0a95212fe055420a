pub mod card;
pub mod grid;
pub mod style;
