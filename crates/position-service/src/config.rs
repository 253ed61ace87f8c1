//! 환경변수 기반 설정 모듈.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, ServiceError};

/// 서비스 전체 설정.
///
/// 모든 항목은 프로세스 시작 시 필수이며 (기본값 없음), 로드 이후
/// 변경되지 않습니다.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// 사이클 실행 주기 (초)
    pub interval_secs: u64,
    /// 재시도 시간 한도 (초, 사이클 명목 시작 시각 기준)
    pub retry_limit_secs: u64,
    /// 재시도 간 딜레이 (밀리초)
    pub retry_delay_ms: u64,
    /// 거래일 해석에 사용할 IANA 타임존 식별자 (예: "Europe/Berlin")
    pub location: String,
    /// 스냅샷 출력 디렉토리
    pub output_dir: PathBuf,
}

impl ServiceConfig {
    /// 환경변수에서 설정 로드.
    ///
    /// `.env` 파일이 있으면 먼저 로드합니다. 누락되거나 파싱할 수 없는
    /// 키는 `ServiceError::Config`로 실패합니다.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            interval_secs: require_env_parse("POSITION_INTERVAL_SECS")?,
            retry_limit_secs: require_env_parse("POSITION_RETRY_LIMIT_SECS")?,
            retry_delay_ms: require_env_parse("POSITION_RETRY_DELAY_MS")?,
            location: require_env("POSITION_LOCATION")?,
            output_dir: PathBuf::from(require_env("POSITION_OUTPUT_DIR")?),
        })
    }

    /// 사이클 실행 주기를 Duration으로 반환.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// 재시도 시간 한도를 Duration으로 반환.
    pub fn retry_limit(&self) -> Duration {
        Duration::from_secs(self.retry_limit_secs)
    }

    /// 재시도 간 딜레이를 Duration으로 반환.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// 필수 환경변수 조회.
fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ServiceError::Config(format!("{} 환경변수가 설정되지 않았습니다", key)))
}

/// 필수 환경변수를 조회하고 파싱.
fn require_env_parse<T: std::str::FromStr>(key: &str) -> Result<T> {
    let raw = require_env(key)?;
    raw.parse()
        .map_err(|_| ServiceError::Config(format!("{} 값을 파싱할 수 없습니다: {}", key, raw)))
}
