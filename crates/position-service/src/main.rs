//! 전력 포지션 수집 데몬 CLI.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use position_core::logging::{init_logging, LogConfig, LogFormat};
use position_core::PositionAggregator;
use position_service::{
    CsvSnapshotWriter, PositionScheduler, RetryingFetcher, ServiceConfig, SimulatedPowerService,
};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "position-service")]
#[command(about = "Day-ahead power position aggregation service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// 데몬 모드: 고정 주기로 수집 사이클 반복 실행
    Daemon,

    /// 수집 사이클 하나만 즉시 실행하고 종료
    RunOnce,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 로깅 초기화
    init_logging(LogConfig::new(cli.log_level).with_format(cli.log_format))?;

    tracing::info!("Power Position Service 시작");

    // 설정 로드 (모든 키 필수)
    let config = ServiceConfig::from_env()?;
    tracing::debug!(?config, "설정 로드 완료");

    // 타임존은 시작 시점에 한 번 해석 (잘못된 설정은 루프 전에 중단)
    let aggregator = PositionAggregator::new(&config.location)?;

    let source = Arc::new(SimulatedPowerService::new());
    let fetcher = RetryingFetcher::new(source, config.retry_limit(), config.retry_delay());
    let sink = Arc::new(CsvSnapshotWriter::new(config.output_dir.clone()));
    let scheduler = PositionScheduler::new(fetcher, aggregator, sink, config.interval());

    // 종료 신호 → 취소 토큰
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("종료 신호 수신, 정리 중...");
                shutdown.cancel();
            }
        });
    }

    match cli.command {
        Commands::Daemon => {
            tracing::info!(
                interval_secs = config.interval_secs,
                location = %config.location,
                output_dir = %config.output_dir.display(),
                "데몬 모드 시작"
            );
            scheduler.run(shutdown).await;
        }
        Commands::RunOnce => {
            let stats = scheduler.run_once(&shutdown).await?;
            stats.log_summary();
        }
    }

    tracing::info!("Power Position Service 종료");
    Ok(())
}
