pub mod progress;
pub mod resume;
pub mod user;
