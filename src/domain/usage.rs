//! 실행 전체의 토큰 사용량 누적기.

use std::sync::atomic::{AtomicU64, Ordering};

/// 모든 completion 호출의 토큰 사용량을 합산한다.
/// 동시에 실행되는 프롬프트 작업들이 공유한다.
#[derive(Debug, Default)]
pub struct UsageAccumulator {
    total: AtomicU64,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, tokens: u64) {
        self.total.fetch_add(tokens, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}
