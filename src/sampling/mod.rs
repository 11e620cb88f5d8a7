pub mod config;
pub mod down_sample;
pub mod probe;
