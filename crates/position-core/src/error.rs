//! 핵심 도메인 에러 타입.

use chrono::NaiveDate;
use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 해석할 수 없는 타임존 식별자 (프로세스 시작 시점에 fail-fast)
    #[error("invalid time zone: {0}")]
    InvalidTimeZone(String),

    /// 로컬 자정이 해당 타임존에 존재하지 않음 (DST 전환으로 스킵된 경우)
    #[error("local midnight does not exist on {date} in {zone}")]
    InvalidLocalMidnight { date: NaiveDate, zone: String },
}

/// 핵심 도메인 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// 설정 오류인지 확인합니다.
    ///
    /// 설정 오류는 재시도로 해소될 수 없으므로 루프 시작 전에 프로세스를
    /// 중단시켜야 합니다.
    pub fn is_configuration(&self) -> bool {
        matches!(self, CoreError::InvalidTimeZone(_))
    }
}
