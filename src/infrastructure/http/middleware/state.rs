use crate::application::services::{HolidayResolver, TierRateLimiter};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<HolidayResolver>,
    pub rate_limiter: TierRateLimiter,
}

impl AppState {
    pub fn new(resolver: HolidayResolver, rate_limiter: TierRateLimiter) -> Self {
        Self {
            resolver: Arc::new(resolver),
            rate_limiter,
        }
    }
}
