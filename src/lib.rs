pub mod bank;
pub mod clock;
pub mod config;
pub mod input;
pub mod output;
pub mod quiz;
