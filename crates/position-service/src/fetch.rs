//! 시간 한도 기반 재시도 페처.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use position_core::{PowerTrade, TradeSource};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, ServiceError};

/// 시간 한도 내에서 거래 조회를 재시도하는 페처.
///
/// 설정 외의 상태를 갖지 않습니다. 실패한 시도는 모두 로그로 보고된 뒤
/// `retry_delay` 간격으로 재시도되며, 사이클 명목 시작 시각 기준
/// `retry_limit`이 지나기 전까지만 시도합니다.
pub struct RetryingFetcher {
    source: Arc<dyn TradeSource>,
    retry_limit: Duration,
    retry_delay: Duration,
}

impl RetryingFetcher {
    /// 새 페처를 생성합니다.
    pub fn new(source: Arc<dyn TradeSource>, retry_limit: Duration, retry_delay: Duration) -> Self {
        Self {
            source,
            retry_limit,
            retry_delay,
        }
    }

    /// 지정한 거래일의 거래 목록을 조회합니다.
    ///
    /// 첫 성공 결과를 즉시 반환합니다 (빈 목록 포함). 실패 시 다음 시도가
    /// `cycle_start + retry_limit`을 넘기게 되면 `FetchTimeout`으로
    /// 종료합니다. 영구적으로 실패하는 소스에 대한 시도 횟수는 정확히
    /// `floor(retry_limit / retry_delay) + 1`회이며, 한도가 딜레이 한 번보다
    /// 짧으면 정확히 한 번만 시도합니다.
    ///
    /// 재시도 대기 중 취소가 관측되면 추가 시도 없이 `Cancelled`로
    /// 중단합니다.
    pub async fn fetch(
        &self,
        trade_date: NaiveDate,
        cycle_start: DateTime<Utc>,
        shutdown: &CancellationToken,
    ) -> Result<Vec<PowerTrade>> {
        // 사이클 시작 이후 이미 흐른 시간을 한도에서 차감
        let elapsed = (Utc::now() - cycle_start).to_std().unwrap_or_default();
        let budget = self.retry_limit.saturating_sub(elapsed);
        let deadline = Instant::now() + budget;

        loop {
            match self.source.get_trades(trade_date).await {
                Ok(trades) => return Ok(trades),
                Err(e) => {
                    tracing::warn!(
                        source = self.source.source_name(),
                        trade_date = %trade_date,
                        retry_delay_ms = self.retry_delay.as_millis() as u64,
                        error = %e,
                        "거래 조회 실패, 재시도 대기"
                    );
                }
            }

            // 다음 시도가 시간 한도를 넘기면 즉시 타임아웃
            if Instant::now() + self.retry_delay > deadline {
                return Err(ServiceError::FetchTimeout {
                    trade_date,
                    cycle_start,
                });
            }

            tokio::select! {
                _ = tokio::time::sleep(self.retry_delay) => {}
                _ = shutdown.cancelled() => return Err(ServiceError::Cancelled),
            }
        }
    }
}
