//! 사이클 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 단일 사이클 실행 통계.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleStats {
    /// 조회된 거래 수
    pub trades: usize,
    /// 집계된 포지션 수
    pub positions: usize,
    /// 기록된 스냅샷 파일명
    pub snapshot: String,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CycleStats {
    /// 새 통계 객체 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 사이클 요약 로그 출력.
    pub fn log_summary(&self) {
        tracing::info!(
            trades = self.trades,
            positions = self.positions,
            snapshot = %self.snapshot,
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "사이클 완료"
        );
    }
}
