//! 시간별 포지션 집계.
//!
//! 거래 레코드를 설정된 타임존 기준의 시간별 순 포지션으로 변환하는
//! 순수 집계 로직을 제공합니다. I/O와 공유 상태가 없으며, 동일한 입력은
//! 항상 동일한 출력을 만듭니다.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use super::{HourlyPosition, PowerTrade};
use crate::error::{CoreError, CoreResult};

/// 시간별 포지션 집계기.
///
/// 타임존은 생성 시점에 한 번 해석되어 캐시됩니다. 잘못된 타임존
/// 식별자는 사이클 단위가 아니라 프로세스 시작 시점에 실패해야 합니다.
#[derive(Debug, Clone)]
pub struct PositionAggregator {
    zone: Tz,
}

impl PositionAggregator {
    /// IANA 타임존 식별자를 해석하여 집계기를 생성합니다.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidTimeZone`: 타임존 식별자를 해석할 수 없음
    pub fn new(location: &str) -> CoreResult<Self> {
        let zone = location
            .parse::<Tz>()
            .map_err(|_| CoreError::InvalidTimeZone(location.to_string()))?;
        Ok(Self { zone })
    }

    /// 해석된 타임존 반환.
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// 거래 목록을 시간별 순 포지션으로 집계합니다.
    ///
    /// 거래일의 로컬 자정을 해당 날짜의 DST 규칙에 따라 UTC 시각으로 한 번
    /// 해석한 뒤, 각 기간 `p`를 `자정 + (p - 1)시간`으로 매핑합니다. 기간
    /// 인덱스 차이만 사용하므로 거래일 중간의 DST 전환은 버킷 계산에 추가
    /// 보정을 일으키지 않습니다 (업스트림 피드의 기간 정의를 그대로 보존).
    ///
    /// 같은 시각으로 해석되는 기간들의 거래량은 합산되며, 결과는 항상
    /// 시각 오름차순으로 정렬되어 반환됩니다. 입력 순서는 결과에 영향을
    /// 주지 않습니다.
    pub fn aggregate(&self, trades: &[PowerTrade]) -> CoreResult<Vec<HourlyPosition>> {
        let mut buckets: BTreeMap<DateTime<Utc>, Decimal> = BTreeMap::new();

        for trade in trades {
            let midnight_utc = self.resolve_local_midnight(trade)?;

            for period in &trade.periods {
                let instant = midnight_utc + Duration::hours(i64::from(period.period) - 1);
                *buckets.entry(instant).or_insert(Decimal::ZERO) += period.volume;
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(datetime, volume)| HourlyPosition::new(datetime, volume))
            .collect())
    }

    /// 거래일의 로컬 자정을 UTC 시각으로 해석합니다.
    ///
    /// fall-back 전환으로 자정이 두 번 존재하면 이른 쪽을 선택하고,
    /// spring-forward 전환으로 자정이 존재하지 않으면 에러를 반환합니다.
    fn resolve_local_midnight(&self, trade: &PowerTrade) -> CoreResult<DateTime<Utc>> {
        let naive_midnight = trade.date.and_time(NaiveTime::MIN);
        match self.zone.from_local_datetime(&naive_midnight) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                Ok(dt.with_timezone(&Utc))
            }
            LocalResult::None => Err(CoreError::InvalidLocalMidnight {
                date: trade.date,
                zone: self.zone.name().to_string(),
            }),
        }
    }
}
