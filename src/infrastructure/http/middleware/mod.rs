pub mod error;
pub mod rate_limit;
pub mod state;

pub use error::*;
pub use rate_limit::*;
pub use state::*;
