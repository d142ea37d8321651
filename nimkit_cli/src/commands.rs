pub mod classify;
pub mod play;
pub mod survey;
