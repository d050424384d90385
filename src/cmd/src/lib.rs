pub mod cmd;
pub mod duration;
pub mod error;
pub mod source;
