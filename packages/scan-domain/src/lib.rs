pub mod catalog;
pub mod geo;
pub mod prediction;
pub mod text;
