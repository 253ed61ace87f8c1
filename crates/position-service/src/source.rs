//! 시뮬레이션 거래 소스.
//!
//! 실제 벤더 피드 없이 서비스를 구동하기 위한 난수 기반 `TradeSource`
//! 구현입니다. 거래 수와 거래량은 난수로 생성되며, 설정된 확률로
//! 일시적인 피드 장애를 흉내냅니다.

use async_trait::async_trait;
use chrono::NaiveDate;
use position_core::{PowerTrade, SourceError, TradePeriod, TradeSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

/// 난수 기반 시뮬레이션 피드.
pub struct SimulatedPowerService {
    rng: Mutex<StdRng>,
    failure_rate: f64,
    period_count: u32,
}

impl SimulatedPowerService {
    /// 기본 실패율(30%)의 시뮬레이션 피드를 생성합니다.
    pub fn new() -> Self {
        Self::with_failure_rate(0.3)
    }

    /// 지정한 실패율(0.0..=1.0)의 시뮬레이션 피드를 생성합니다.
    pub fn with_failure_rate(failure_rate: f64) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            failure_rate,
            period_count: 24,
        }
    }
}

impl Default for SimulatedPowerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradeSource for SimulatedPowerService {
    async fn get_trades(&self, date: NaiveDate) -> Result<Vec<PowerTrade>, SourceError> {
        let mut rng = self.rng.lock().await;

        if rng.gen_bool(self.failure_rate) {
            return Err(SourceError::Feed("simulated feed outage".to_string()));
        }

        let trade_count = rng.gen_range(1..=20);
        let trades = (0..trade_count)
            .map(|_| {
                let periods = (1..=self.period_count)
                    .map(|p| {
                        // -500.00 ~ 500.00 범위의 소수점 둘째 자리 거래량
                        let cents: i64 = rng.gen_range(-50_000..=50_000);
                        TradePeriod::new(p, Decimal::new(cents, 2))
                    })
                    .collect();
                PowerTrade::with_periods(date, periods)
            })
            .collect();

        Ok(trades)
    }

    fn source_name(&self) -> &str {
        "simulated-power-service"
    }
}
