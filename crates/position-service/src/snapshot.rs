//! 포지션 스냅샷 기록.
//!
//! 집계된 포지션 시퀀스를 `Datetime;Volume` 형식의 세미콜론 구분 CSV
//! 파일로 기록합니다.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use position_core::HourlyPosition;

use crate::error::Result;

/// 스냅샷 파일명 생성.
///
/// `Position_<거래일:yyyyMMdd>_<사이클시작:yyyyMMddHHmm>.csv` 형식으로,
/// 동일한 입력에 대해 항상 같은 이름을 만듭니다.
pub fn snapshot_file_name(trade_date: NaiveDate, cycle_start: DateTime<Utc>) -> String {
    format!(
        "Position_{}_{}.csv",
        trade_date.format("%Y%m%d"),
        cycle_start.format("%Y%m%d%H%M")
    )
}

// =============================================================================
// SnapshotSink Trait
// =============================================================================

/// 포지션 스냅샷 싱크 trait.
///
/// 정렬된 포지션 시퀀스를 이름과 함께 영속화합니다. 사이클당 한 번,
/// 단일 제어 흐름에서만 호출되므로 동시 기록은 일어나지 않습니다.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    /// 스냅샷 기록. 기록된 경로를 반환합니다.
    async fn write(&self, name: &str, positions: &[HourlyPosition]) -> Result<PathBuf>;
}

/// CSV 파일 기반 스냅샷 싱크.
///
/// 출력 디렉토리가 없으면 생성합니다. 행 형식은 헤더 `Datetime;Volume`에
/// 이어 `<ISO-8601 UTC 초 단위>;<고정소수점 거래량>`입니다.
pub struct CsvSnapshotWriter {
    output_dir: PathBuf,
}

impl CsvSnapshotWriter {
    /// 지정한 출력 디렉토리로 싱크를 생성합니다.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl SnapshotSink for CsvSnapshotWriter {
    async fn write(&self, name: &str, positions: &[HourlyPosition]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(name);

        let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(&path)?;

        writer.write_record(["Datetime", "Volume"])?;
        for position in positions {
            writer.write_record([
                position.datetime.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                position.volume.to_string(),
            ])?;
        }
        writer.flush()?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_file_name_is_deterministic() {
        let trade_date = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
        let cycle_start = Utc.with_ymd_and_hms(2024, 6, 12, 9, 5, 30).unwrap();

        let name = snapshot_file_name(trade_date, cycle_start);

        assert_eq!(name, "Position_20240613_202406120905.csv");
        assert_eq!(name, snapshot_file_name(trade_date, cycle_start));
    }

    #[tokio::test]
    async fn test_write_produces_expected_rows() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSnapshotWriter::new(dir.path());

        let positions = vec![
            HourlyPosition::new(
                Utc.with_ymd_and_hms(2024, 6, 12, 22, 0, 0).unwrap(),
                dec!(150.5),
            ),
            HourlyPosition::new(
                Utc.with_ymd_and_hms(2024, 6, 12, 23, 0, 0).unwrap(),
                dec!(-80),
            ),
        ];

        let path = sink.write("Position_20240613_202406120905.csv", &positions)
            .await
            .unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            contents,
            "Datetime;Volume\n2024-06-12T22:00:00Z;150.5\n2024-06-12T23:00:00Z;-80\n"
        );
    }

    #[tokio::test]
    async fn test_write_creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("snapshots").join("power");
        let sink = CsvSnapshotWriter::new(&nested);

        let path = sink.write("Position_20240613_202406120905.csv", &[])
            .await
            .unwrap();

        assert!(path.exists());
        // 포지션이 없어도 헤더는 기록된다
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, "Datetime;Volume\n");
    }
}
