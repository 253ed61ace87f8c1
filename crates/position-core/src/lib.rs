//! # Position Core
//!
//! 전력 포지션 집계 시스템의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 서비스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 거래 레코드 및 기간 타입
//! - 시간별 순 포지션
//! - 타임존 기반 포지션 집계 (순수 함수)
//! - 거래 데이터 소스 추상화
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;

pub use domain::*;
pub use error::*;
pub use logging::*;
