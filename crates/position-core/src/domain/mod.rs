//! 전력 포지션 집계를 위한 도메인 모델.

mod aggregation;
mod position;
mod trade;
mod trade_source;

pub use aggregation::*;
pub use position::*;
pub use trade::*;
pub use trade_source::*;
