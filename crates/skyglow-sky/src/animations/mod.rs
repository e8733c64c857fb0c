pub mod backdrop;
pub mod meteor;
pub mod starfield;
