//! 전력 거래 레코드.
//!
//! 이 모듈은 거래 소스가 반환하는 원시 거래 타입을 정의합니다:
//! - `TradePeriod` - 거래일 내 1-기반 기간과 순 거래량
//! - `PowerTrade` - 거래일 하나에 대한 거래 레코드

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 거래일 내 단일 기간의 순 거래량.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePeriod {
    /// 1-기반 기간 인덱스 (1..=N, 로컬 자정 기준 오프셋)
    pub period: u32,
    /// 순 거래량 (매수/매도 방향이 반영된 부호 있는 값)
    pub volume: Decimal,
}

impl TradePeriod {
    /// 새 기간을 생성합니다.
    pub fn new(period: u32, volume: Decimal) -> Self {
        Self { period, volume }
    }
}

/// 단일 전력 거래 레코드.
///
/// `date`는 타임존 정보가 붙지 않은 로컬 거래일이며, 기간 목록은 소스가
/// 반환한 그대로 보존됩니다. 집계 단계는 기간 수를 검증하지 않고 주어진
/// 인덱스를 그대로 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerTrade {
    /// 거래일 (로컬 날짜, 오프셋 없음)
    pub date: NaiveDate,
    /// 기간별 거래량
    pub periods: Vec<TradePeriod>,
}

impl PowerTrade {
    /// 지정한 거래일과 기간 수로 거래량이 0인 거래를 생성합니다.
    pub fn new(date: NaiveDate, period_count: u32) -> Self {
        let periods = (1..=period_count)
            .map(|p| TradePeriod::new(p, Decimal::ZERO))
            .collect();
        Self { date, periods }
    }

    /// 기간 목록을 직접 지정하여 거래를 생성합니다.
    pub fn with_periods(date: NaiveDate, periods: Vec<TradePeriod>) -> Self {
        Self { date, periods }
    }

    /// 지정한 기간의 거래량을 설정합니다 (1-기반 인덱스).
    pub fn set_volume(&mut self, period: u32, volume: Decimal) {
        if let Some(p) = self.periods.iter_mut().find(|p| p.period == period) {
            p.volume = volume;
        }
    }

    /// 기간 수 반환.
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }
}
