pub mod encode;
pub mod grid;
