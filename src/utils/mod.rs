pub mod color;
pub mod sys;
