//! 전력 포지션 수집 서비스.
//!
//! day-ahead 전력 거래를 주기적으로 조회하여 타임존 기준 시간별 순
//! 포지션으로 집계하고, 실행마다 타임스탬프가 붙은 CSV 스냅샷으로
//! 기록하는 데몬을 제공합니다:
//! - 시간 한도 기반 재시도 페처
//! - 고정 주기 자가 보정 스케줄러
//! - 세미콜론 구분 CSV 스냅샷 싱크

pub mod config;
pub mod error;
pub mod fetch;
pub mod scheduler;
pub mod snapshot;
pub mod source;
pub mod stats;

pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use fetch::RetryingFetcher;
pub use scheduler::PositionScheduler;
pub use snapshot::{snapshot_file_name, CsvSnapshotWriter, SnapshotSink};
pub use source::SimulatedPowerService;
pub use stats::CycleStats;
