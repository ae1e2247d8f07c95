//! 통계 및 유틸리티 모듈
//!
//! 시트 작업자들이 함께 갱신하는 처리 통계와 포맷팅을 담당합니다.

use colored::Colorize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::worker::SheetOutcome;

/// 처리 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 처리 대상 시트 수
    pub total_sheets: usize,
    /// 저장까지 끝난 시트 수
    pub success_count: AtomicUsize,
    /// 중단된 시트 수
    pub error_count: AtomicUsize,
    /// 기록한 레코드 수
    pub records_written: AtomicU64,
    /// 기록한 바이트
    pub bytes_written: AtomicU64,
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_sheets: usize) -> Self {
        Self {
            total_sheets,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 시트 하나의 최종 상태 반영
    pub fn record(&self, outcome: &SheetOutcome) {
        match outcome {
            SheetOutcome::Done(report) => {
                self.success_count.fetch_add(1, Ordering::Relaxed);
                self.records_written
                    .fetch_add(report.records as u64, Ordering::Relaxed);
                self.bytes_written.fetch_add(report.bytes, Ordering::Relaxed);
            }
            SheetOutcome::Failed { .. } => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn get_success_count(&self) -> usize {
        self.success_count.load(Ordering::Relaxed)
    }

    pub fn get_error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    pub fn get_records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    pub fn get_bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 처리 통계 요약 출력
    pub fn print_summary(&self) {
        let success = self.get_success_count();
        let errors = self.get_error_count();

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 처리 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 전체 시트:    {}",
            "📑".bright_cyan(),
            self.total_sheets
        );
        println!(
            "  {} 성공:         {}",
            "✅".bright_green(),
            success.to_string().green()
        );

        if errors > 0 {
            println!(
                "  {} 실패:         {}",
                "❌".bright_red(),
                errors.to_string().red()
            );
        } else {
            println!("  {} 실패:         {}", "✅".bright_green(), "0".green());
        }

        println!(
            "  {} 레코드:       {}",
            "🧾".bright_yellow(),
            self.get_records_written()
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.get_bytes_written())
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use sheet2json::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    match secs {
        0 => format!("{}ms", millis),
        1..=59 => format!("{}.{:03}초", secs, millis),
        60..=3599 => format!("{}분 {}초", secs / 60, secs % 60),
        _ => format!("{}시간 {}분", secs / 3600, (secs % 3600) / 60),
    }
}
