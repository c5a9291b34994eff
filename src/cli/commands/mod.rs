pub mod config;
pub mod docs;
pub mod log;
pub mod patch;
pub mod scaffold;
