//! sheet2json - EXCEL SHEETS TO JSON CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use sheet2json::{
    cli::Args,
    coordinator::Coordinator,
    filter::SheetFilter,
    sink::DirSink,
    source::CalamineSource,
    stats::Statistics,
    worker::target_name,
};

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args);

    // 스레드 풀 설정
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("스레드 풀 초기화 실패")?;
    }

    let filter = SheetFilter::new(&args.sheet_patterns())?;

    // 헤더 출력
    print_header(&args);

    // 워크북 열기 (실패하면 시트 처리 전에 종료)
    let source = CalamineSource::open(&args.input)
        .with_context(|| format!("워크북 열기 실패: {:?}", args.input))?;

    let coordinator = Coordinator::new(args.convert_options(), filter);
    let sheets = coordinator.discover(&source);

    if sheets.is_empty() {
        println!("{}", "⚠️ 처리할 시트가 없습니다.".yellow());
        return Ok(());
    }

    println!(
        "  {} 발견된 시트 수: {}",
        "📋".bright_white(),
        sheets.len().to_string().bright_green()
    );

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&sheets);
        return Ok(());
    }

    let sink = DirSink::create(&args.output_dir).context("출력 폴더 준비 실패")?;
    let stats = Statistics::new(sheets.len());

    let coordinator = if args.progress {
        coordinator.with_progress(create_progress_bar(sheets.len()))
    } else {
        coordinator
    };

    println!("\n{}", "⚡ 시트 병렬 처리 중...".bright_cyan());
    coordinator.run(&source, &sink, &sheets, &stats);

    // 시트 단위 실패는 종료 코드에 반영하지 않음
    stats.print_summary();

    println!(
        "\n{} 저장 위치: {:?}\n",
        "✅".bright_green(),
        sink.dir()
    );

    Ok(())
}

/// 로그 초기화 (RUST_LOG가 있으면 우선)
fn init_tracing(args: &Args) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_filter().into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 EXCEL SHEETS TO JSON CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 파일: {:?}", "📂".bright_cyan(), args.input);

    if !args.dry_run {
        println!("  {} 출력 폴더: {:?}", "📄".bright_green(), args.output_dir);
    }

    if let Some(ref sheets) = args.sheets {
        println!("  {} 시트 필터: {}", "🔍".bright_magenta(), sheets);
    }

    if args.snake_case {
        println!("  {} {}", "🐍".bright_yellow(), "snake_case 키 변환".yellow());
    }

    if args.compact {
        println!("  {} {}", "📦".bright_white(), "한 줄 출력".white());
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (파일 쓰기 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 드라이런 출력
fn print_dry_run(sheets: &[String]) {
    println!("\n{}", "📋 변환 예정 시트 목록:".bright_cyan());
    for (i, sheet) in sheets.iter().enumerate() {
        println!("  {}. {} → {}", i + 1, sheet, target_name(sheet).dimmed());
    }
    println!(
        "\n{} 총 {} 개의 시트가 변환될 예정입니다.",
        "ℹ️".bright_blue(),
        sheets.len().to_string().bright_green()
    );
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    pb.set_style(style);
    pb
}
