//! 포지션 수집 스케줄러.
//!
//! fetch → aggregate → persist 사이클을 고정 주기로 반복하는 최상위
//! 제어 루프입니다. 사이클 내부의 모든 실패는 루프 경계에서 흡수되어
//! 로그로 보고되고, 루프와 프로세스는 계속 실행됩니다. 한 번에 사이클
//! 하나만 실행되며 파이프라인이 겹치지 않습니다.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Days, Duration as ChronoDuration, Utc};
use position_core::PositionAggregator;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, ServiceError};
use crate::fetch::RetryingFetcher;
use crate::snapshot::{snapshot_file_name, SnapshotSink};
use crate::stats::CycleStats;

/// 포지션 수집 스케줄러.
pub struct PositionScheduler {
    fetcher: RetryingFetcher,
    aggregator: PositionAggregator,
    sink: Arc<dyn SnapshotSink>,
    interval: Duration,
}

impl PositionScheduler {
    /// 새 스케줄러를 생성합니다.
    pub fn new(
        fetcher: RetryingFetcher,
        aggregator: PositionAggregator,
        sink: Arc<dyn SnapshotSink>,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            aggregator,
            sink,
            interval,
        }
    }

    /// 스케줄러 메인 루프.
    ///
    /// 진입 시각을 첫 사이클의 명목 시작 시각으로 삼고, 사이클마다
    /// `cycle_start += interval`로 다음 명목 시작 시각을 계산합니다.
    /// 남은 시간이 있으면 그만큼 대기하고, 사이클이 주기를 초과했으면
    /// 즉시 다음 사이클을 시작합니다 (고정 주기 그리드로 자가 보정,
    /// 처리 시간 누적에 의한 드리프트 없음).
    ///
    /// 취소가 관측되면 진행 중인 대기를 즉시 중단하고 새 사이클 없이
    /// 종료합니다.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut cycle_start = Utc::now();

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            match self.run_cycle(cycle_start, &shutdown).await {
                Ok(stats) => stats.log_summary(),
                Err(ServiceError::Cancelled) => break,
                Err(e) => {
                    // 사이클 실패는 흡수하고 다음 사이클로 진행
                    tracing::error!(
                        cycle_start = %cycle_start,
                        error = %e,
                        "사이클 실패"
                    );
                }
            }

            cycle_start += ChronoDuration::milliseconds(self.interval.as_millis() as i64);
            let remaining = (cycle_start - Utc::now()).to_std().unwrap_or_default();
            if !remaining.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(remaining) => {}
                    _ = shutdown.cancelled() => break,
                }
            }
        }

        tracing::info!("스케줄러 종료");
    }

    /// 스케줄을 기다리지 않고 사이클 하나를 즉시 실행합니다.
    pub async fn run_once(&self, shutdown: &CancellationToken) -> Result<CycleStats> {
        self.run_cycle(Utc::now(), shutdown).await
    }

    /// 단일 사이클 실행: fetch → aggregate → persist.
    async fn run_cycle(
        &self,
        cycle_start: DateTime<Utc>,
        shutdown: &CancellationToken,
    ) -> Result<CycleStats> {
        let started = Instant::now();
        let mut stats = CycleStats::new();

        // 거래일은 항상 사이클 명목 시작일의 하루 뒤
        let trade_date = cycle_start
            .date_naive()
            .checked_add_days(Days::new(1))
            .ok_or_else(|| ServiceError::Config("trade date out of range".to_string()))?;

        tracing::debug!(
            trade_date = %trade_date,
            cycle_start = %cycle_start,
            "사이클 시작"
        );

        // 1. 거래 조회 (시간 한도 내 재시도)
        let trades = self.fetcher.fetch(trade_date, cycle_start, shutdown).await?;
        stats.trades = trades.len();

        // 2. 시간별 포지션 집계
        let positions = self.aggregator.aggregate(&trades)?;
        stats.positions = positions.len();

        // 3. 스냅샷 기록
        let name = snapshot_file_name(trade_date, cycle_start);
        let path = self.sink.write(&name, &positions).await?;
        tracing::info!(path = %path.display(), "스냅샷 저장 완료");

        stats.snapshot = name;
        stats.elapsed = started.elapsed();
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use position_core::{HourlyPosition, PowerTrade, SourceError, TradeSource};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// 항상 실패하는 테스트 소스.
    struct FailingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TradeSource for FailingSource {
        async fn get_trades(
            &self,
            _date: NaiveDate,
        ) -> std::result::Result<Vec<PowerTrade>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SourceError::Network("connection refused".to_string()))
        }

        fn source_name(&self) -> &str {
            "failing-source"
        }
    }

    /// 항상 빈 거래 목록을 반환하는 테스트 소스.
    struct EmptySource;

    #[async_trait]
    impl TradeSource for EmptySource {
        async fn get_trades(
            &self,
            _date: NaiveDate,
        ) -> std::result::Result<Vec<PowerTrade>, SourceError> {
            Ok(Vec::new())
        }

        fn source_name(&self) -> &str {
            "empty-source"
        }
    }

    /// 기록된 스냅샷 이름을 저장하는 테스트 싱크.
    #[derive(Default)]
    struct RecordingSink {
        writes: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn write_count(&self) -> usize {
            self.writes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SnapshotSink for RecordingSink {
        async fn write(&self, name: &str, _positions: &[HourlyPosition]) -> Result<PathBuf> {
            self.writes.lock().unwrap().push(name.to_string());
            Ok(PathBuf::from(name))
        }
    }

    fn scheduler_with(
        source: Arc<dyn TradeSource>,
        sink: Arc<dyn SnapshotSink>,
        retry_limit: Duration,
        interval: Duration,
    ) -> PositionScheduler {
        let fetcher = RetryingFetcher::new(source, retry_limit, Duration::from_secs(1));
        let aggregator = PositionAggregator::new("Europe/Berlin").unwrap();
        PositionScheduler::new(fetcher, aggregator, sink, interval)
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_cycle_does_not_stop_subsequent_cycles() {
        let source = Arc::new(FailingSource {
            calls: AtomicUsize::new(0),
        });
        let sink = Arc::new(RecordingSink::default());
        let scheduler = scheduler_with(
            source.clone(),
            sink.clone(),
            Duration::ZERO,
            Duration::from_secs(60),
        );

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(scheduler.run(shutdown.clone()));

        // 실패한 사이클 이후에도 다음 틱에서 새 사이클이 시작되어야 한다
        for _ in 0..10 {
            if source.calls.load(Ordering::SeqCst) >= 3 {
                break;
            }
            tokio::time::sleep(Duration::from_secs(61)).await;
        }
        shutdown.cancel();
        handle.await.unwrap();

        assert!(source.calls.load(Ordering::SeqCst) >= 3);
        assert_eq!(sink.write_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_before_next_cycle() {
        let sink = Arc::new(RecordingSink::default());
        let scheduler = scheduler_with(
            Arc::new(EmptySource),
            sink.clone(),
            Duration::from_secs(1),
            Duration::from_secs(3600),
        );

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(scheduler.run(shutdown.clone()));

        // 첫 사이클 완료 대기
        for _ in 0..100 {
            if sink.write_count() >= 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(sink.write_count(), 1);

        // 사이클 간 대기 중 취소 → 새 사이클 없이 즉시 종료
        shutdown.cancel();
        handle.await.unwrap();
        assert_eq!(sink.write_count(), 1);
    }

    #[tokio::test]
    async fn test_run_once_writes_named_snapshot() {
        let sink = Arc::new(RecordingSink::default());
        let scheduler = scheduler_with(
            Arc::new(EmptySource),
            sink.clone(),
            Duration::from_secs(1),
            Duration::from_secs(60),
        );

        let stats = scheduler
            .run_once(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(stats.trades, 0);
        assert_eq!(stats.positions, 0);
        assert!(stats.snapshot.starts_with("Position_"));
        assert!(stats.snapshot.ends_with(".csv"));
        assert_eq!(sink.write_count(), 1);
    }
}
