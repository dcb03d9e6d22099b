use std::num::NonZeroU32;
use std::sync::Arc;
use governor::{Quota, RateLimiter};
use governor::state::{NotKeyed, InMemoryState};
use governor::clock::{Clock, DefaultClock};

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

pub fn provider_limiter(requests_per_minute: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(requests_per_minute)))
}

/// Blocks the calling thread until the limiter grants a permit.
pub fn wait_for_permit(limiter: &Limiter) {
    let clock = DefaultClock::default();
    while let Err(not_until) = limiter.check() {
        let wait = not_until.wait_time_from(clock.now());
        log::debug!("Provider rate limit reached, waiting {:?}", wait);
        std::thread::sleep(wait);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permits_within_quota_do_not_block() {
        let limiter = provider_limiter(NonZeroU32::new(600).unwrap());
        let started = std::time::Instant::now();
        wait_for_permit(&limiter);
        wait_for_permit(&limiter);
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }
}
