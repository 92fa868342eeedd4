pub mod calendar_request;
pub mod holiday;

pub use calendar_request::*;
pub use holiday::*;
