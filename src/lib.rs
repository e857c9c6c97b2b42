pub mod config;
pub mod events;
pub mod gui;
pub mod spin;
pub mod sys;
