//! 서비스 에러 타입.

use chrono::{DateTime, NaiveDate, Utc};
use position_core::CoreError;
use thiserror::Error;

/// 서비스 에러.
///
/// `Config`를 제외한 모든 에러는 사이클 단위로 스케줄러 경계에서
/// 흡수되며 프로세스를 중단시키지 않습니다.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 설정 에러 (프로세스 시작 시점에 fail-fast)
    #[error("configuration error: {0}")]
    Config(String),

    /// 재시도 시간 한도 내에 거래 조회 실패
    #[error("failed to fetch trades for {trade_date} within the time limit (cycle started {cycle_start})")]
    FetchTimeout {
        trade_date: NaiveDate,
        cycle_start: DateTime<Utc>,
    },

    /// 도메인 에러 (집계 실패 등)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// 스냅샷 기록 실패
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// 취소 관측 (graceful shutdown)
    #[error("shutdown requested")]
    Cancelled,
}

/// 서비스 작업을 위한 Result 타입.
pub type Result<T> = std::result::Result<T, ServiceError>;

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}

impl From<csv::Error> for ServiceError {
    fn from(err: csv::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}
