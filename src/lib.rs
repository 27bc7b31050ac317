pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod orchestrator;
pub mod reactive;
pub mod roster;
pub mod storage;
pub mod unit;

pub use warcalc_protocol as protocol;
// cmd and reports are binary modules (see main.rs).
