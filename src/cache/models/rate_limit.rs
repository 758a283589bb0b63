/// 滑动窗口限流规则：`period_secs` 秒内最多 `max_count` 次
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub period_secs: u64,
    pub max_count: u64,
}

impl RateLimitRule {
    pub fn new(period_secs: u64, max_count: u64) -> Self {
        Self {
            period_secs,
            max_count,
        }
    }

    /// 窗口下界，分数小于等于该值的记录视为过期
    pub fn cutoff(&self, now_ms: i64) -> i64 {
        let window_ms = i64::try_from(self.period_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
        now_ms.saturating_sub(window_ms)
    }

    /// 键的过期时间，比窗口多一秒，防止冷数据常驻
    pub fn ttl_secs(&self) -> u64 {
        self.period_secs.saturating_add(1)
    }

    pub fn admits(&self, count: u64) -> bool {
        count < self.max_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_is_one_period_back() {
        let rule = RateLimitRule::new(10, 3);
        assert_eq!(rule.cutoff(50_000), 40_000);
        assert_eq!(rule.ttl_secs(), 11);
    }

    #[test]
    fn zero_budget_admits_nothing() {
        let rule = RateLimitRule::new(10, 0);
        assert!(!rule.admits(0));
    }

    #[test]
    fn huge_period_does_not_overflow() {
        let rule = RateLimitRule::new(u64::MAX, 1);
        assert_eq!(rule.cutoff(1_000), 1_000 - i64::MAX);
        assert_eq!(rule.ttl_secs(), u64::MAX);
    }
}
