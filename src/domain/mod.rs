pub mod entities;
pub mod errors;
pub mod fallback;
pub mod ports;
