//! 시간별 순 포지션.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 특정 UTC 시각(시간 버킷 시작)에 대한 집계된 순 포지션.
///
/// 한 사이클 내에서 같은 시각으로 해석되는 모든 기간의 거래량이 합산된
/// 결과이며, 생성 이후 변경되지 않습니다. 외부로 노출되는 포지션
/// 시퀀스는 항상 `datetime` 오름차순으로 정렬되어 있어야 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyPosition {
    /// 시간 버킷 시작 시각 (UTC)
    pub datetime: DateTime<Utc>,
    /// 순 거래량
    pub volume: Decimal,
}

impl HourlyPosition {
    /// 새 포지션을 생성합니다.
    pub fn new(datetime: DateTime<Utc>, volume: Decimal) -> Self {
        Self { datetime, volume }
    }
}
