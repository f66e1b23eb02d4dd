//! Wiring the fold text component to a terminal event loop

pub mod app_runner;
