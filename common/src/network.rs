pub mod range;
pub mod reply;
pub mod target;
