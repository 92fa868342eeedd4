pub mod holiday_resolver;
pub mod ics_encoder;
pub mod rate_limiter;

pub use holiday_resolver::*;
pub use rate_limiter::*;
