//! Client configuration types.

use governor::Quota;
use std::num::NonZeroU32;

/// Client-side request throttle
///
/// AbuseIPDB enforces a daily quota per key; this spreads requests out so a
/// long host list does not burn through it in a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests allowed per minute
    pub per_minute: NonZeroU32,

    /// Requests allowed back to back before throttling kicks in
    pub burst: NonZeroU32,
}

impl RateLimit {
    /// Allow `per_minute` requests per minute with no burst allowance.
    ///
    /// Returns `None` for zero.
    #[must_use]
    pub fn per_minute(per_minute: u32) -> Option<Self> {
        let per_minute = NonZeroU32::new(per_minute)?;
        Some(Self {
            per_minute,
            burst: NonZeroU32::MIN,
        })
    }

    /// The governor quota for this limit
    #[must_use]
    pub fn quota(&self) -> Quota {
        Quota::per_minute(self.per_minute).allow_burst(self.burst)
    }
}
