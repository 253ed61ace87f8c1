//! 거래 데이터 소스 추상화.
//!
//! 외부 전력 거래 피드로부터 특정 거래일의 거래 목록을 조회하기 위한
//! 소스 중립적인 인터페이스를 제공합니다.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use super::PowerTrade;

// =============================================================================
// 에러 타입
// =============================================================================

/// TradeSource 에러.
///
/// 소스 에러는 종류와 무관하게 모두 일시적(transient)으로 취급되며,
/// 호출 측의 재시도 정책에 따라 재시도됩니다.
#[derive(Debug, Error)]
pub enum SourceError {
    /// 네트워크 에러
    #[error("network error: {0}")]
    Network(String),

    /// 피드 API 에러
    #[error("feed error: {0}")]
    Feed(String),

    /// 기타 에러
    #[error("source error: {0}")]
    Other(String),
}

// =============================================================================
// TradeSource Trait
// =============================================================================

/// 전력 거래 데이터 소스 trait.
///
/// 특정 거래일에 대한 거래 목록을 조회합니다. 각 피드별로 이 trait를
/// 구현하여 소스 중립적인 수집 코드를 작성할 수 있습니다.
///
/// # 구현 예시
///
/// ```ignore
/// pub struct VendorFeed {
///     client: Arc<FeedClient>,
/// }
///
/// #[async_trait]
/// impl TradeSource for VendorFeed {
///     async fn get_trades(&self, date: NaiveDate) -> Result<Vec<PowerTrade>, SourceError> {
///         // 피드 API 호출 및 변환
///     }
///
///     fn source_name(&self) -> &str {
///         "vendor-feed"
///     }
/// }
/// ```
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// 지정한 거래일의 거래 목록 조회.
    ///
    /// # Returns
    ///
    /// 거래 목록. 해당 날짜에 거래가 없으면 빈 벡터 반환.
    ///
    /// # Errors
    ///
    /// 모든 에러는 일시적인 것으로 취급되어 호출 측에서 재시도됩니다.
    async fn get_trades(&self, date: NaiveDate) -> Result<Vec<PowerTrade>, SourceError>;

    /// 소스 이름 반환.
    ///
    /// 로깅 및 디버깅 목적으로 사용됩니다.
    fn source_name(&self) -> &str;
}
