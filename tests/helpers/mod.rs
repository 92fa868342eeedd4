#![allow(dead_code)]
pub mod app;
pub mod sources;

pub use app::*;
pub use sources::*;
