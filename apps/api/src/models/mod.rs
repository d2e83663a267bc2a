pub mod evaluation;
pub mod progress;
pub mod question;
