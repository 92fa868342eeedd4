use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter as GovernorRateLimiter,
};
use std::{num::NonZeroU32, sync::Arc, time::Duration};

/// Subscription tier, selected per request by the `X-Subscription-Tier` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionTier {
    Free,
    Pro,
    Enterprise,
}

impl SubscriptionTier {
    /// Unknown or missing values fall back to the free tier
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("pro") => SubscriptionTier::Pro,
            Some("enterprise") => SubscriptionTier::Enterprise,
            _ => SubscriptionTier::Free,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Enterprise => "enterprise",
        }
    }
}

/// Requests per minute for each tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicies {
    pub free_per_minute: u32,
    pub pro_per_minute: u32,
    pub enterprise_per_minute: u32,
}

impl Default for RateLimitPolicies {
    fn default() -> Self {
        Self {
            free_per_minute: 10,
            pro_per_minute: 100,
            enterprise_per_minute: 1000,
        }
    }
}

impl RateLimitPolicies {
    pub fn per_minute(&self, tier: SubscriptionTier) -> u32 {
        match tier {
            SubscriptionTier::Free => self.free_per_minute,
            SubscriptionTier::Pro => self.pro_per_minute,
            SubscriptionTier::Enterprise => self.enterprise_per_minute,
        }
    }
}

/// Per-client rate limiting, one keyed limiter per subscription tier
#[derive(Clone)]
pub struct TierRateLimiter {
    free: Arc<DefaultKeyedRateLimiter<String>>,
    pro: Arc<DefaultKeyedRateLimiter<String>>,
    enterprise: Arc<DefaultKeyedRateLimiter<String>>,
    policies: RateLimitPolicies,
}

impl TierRateLimiter {
    pub fn new(policies: RateLimitPolicies) -> Self {
        Self {
            free: Arc::new(keyed_limiter(policies.free_per_minute)),
            pro: Arc::new(keyed_limiter(policies.pro_per_minute)),
            enterprise: Arc::new(keyed_limiter(policies.enterprise_per_minute)),
            policies,
        }
    }

    pub fn policies(&self) -> RateLimitPolicies {
        self.policies
    }

    fn limiter(&self, tier: SubscriptionTier) -> &DefaultKeyedRateLimiter<String> {
        match tier {
            SubscriptionTier::Free => &self.free,
            SubscriptionTier::Pro => &self.pro,
            SubscriptionTier::Enterprise => &self.enterprise,
        }
    }

    /// Check (and consume) one request for a client.
    ///
    /// Returns Err(duration) with how long to wait before retrying.
    pub fn check(&self, tier: SubscriptionTier, client: &str) -> Result<(), Duration> {
        match self.limiter(tier).check_key(&client.to_string()) {
            Ok(_) => Ok(()),
            Err(negative) => Err(negative.wait_time_from(DefaultClock::default().now())),
        }
    }

    /// Drop state for clients whose quota has fully replenished
    pub fn cleanup(&self) {
        self.free.retain_recent();
        self.pro.retain_recent();
        self.enterprise.retain_recent();
    }

    /// Number of clients currently tracked across all tiers
    pub fn tracked_clients(&self) -> usize {
        self.free.len() + self.pro.len() + self.enterprise.len()
    }
}

impl Default for TierRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitPolicies::default())
    }
}

fn keyed_limiter(per_minute: u32) -> DefaultKeyedRateLimiter<String> {
    let burst = NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN);
    GovernorRateLimiter::keyed(Quota::per_minute(burst))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policies(free: u32, pro: u32, enterprise: u32) -> RateLimitPolicies {
        RateLimitPolicies {
            free_per_minute: free,
            pro_per_minute: pro,
            enterprise_per_minute: enterprise,
        }
    }

    #[test]
    fn test_tier_from_header() {
        assert_eq!(SubscriptionTier::from_header(None), SubscriptionTier::Free);
        assert_eq!(SubscriptionTier::from_header(Some("PRO")), SubscriptionTier::Pro);
        assert_eq!(
            SubscriptionTier::from_header(Some(" enterprise ")),
            SubscriptionTier::Enterprise
        );
        assert_eq!(SubscriptionTier::from_header(Some("gold")), SubscriptionTier::Free);
    }

    #[test]
    fn test_rate_limiter_allows_within_limit() {
        let limiter = TierRateLimiter::new(policies(3, 10, 10));

        assert!(limiter.check(SubscriptionTier::Free, "client-a").is_ok());
        assert!(limiter.check(SubscriptionTier::Free, "client-a").is_ok());
        assert!(limiter.check(SubscriptionTier::Free, "client-a").is_ok());

        let wait = limiter.check(SubscriptionTier::Free, "client-a").unwrap_err();
        assert!(wait > Duration::ZERO);
    }

    #[test]
    fn test_tiers_have_independent_budgets() {
        let limiter = TierRateLimiter::new(policies(1, 3, 10));

        assert!(limiter.check(SubscriptionTier::Free, "client-a").is_ok());
        assert!(limiter.check(SubscriptionTier::Free, "client-a").is_err());

        assert!(limiter.check(SubscriptionTier::Pro, "client-a").is_ok());
        assert!(limiter.check(SubscriptionTier::Pro, "client-a").is_ok());
        assert!(limiter.check(SubscriptionTier::Pro, "client-a").is_ok());
        assert!(limiter.check(SubscriptionTier::Pro, "client-a").is_err());
    }

    #[test]
    fn test_rate_limiter_different_clients() {
        let limiter = TierRateLimiter::new(policies(1, 1, 1));

        assert!(limiter.check(SubscriptionTier::Free, "client-a").is_ok());
        assert!(limiter.check(SubscriptionTier::Free, "client-a").is_err());
        assert!(limiter.check(SubscriptionTier::Free, "client-b").is_ok());
    }

    #[test]
    fn test_zero_quota_clamped_to_one() {
        let limiter = TierRateLimiter::new(policies(0, 0, 0));
        assert!(limiter.check(SubscriptionTier::Free, "client-a").is_ok());
        assert!(limiter.check(SubscriptionTier::Free, "client-a").is_err());
    }

    #[test]
    fn test_cleanup_keeps_limited_clients() {
        let limiter = TierRateLimiter::new(policies(1, 1, 1));
        let _ = limiter.check(SubscriptionTier::Free, "client-a");
        let _ = limiter.check(SubscriptionTier::Free, "client-a");

        limiter.cleanup();

        assert_eq!(limiter.tracked_clients(), 1);
    }
}
