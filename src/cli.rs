//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::worker::ConvertOptions;

/// sheet2json CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "sheet2json",
    author = "YourName <your@email.com>",
    version,
    about = "EXCEL SHEETS TO JSON CONVERTER - 워크북의 시트마다 JSON 배열 파일을 만드는 병렬 CLI 도구",
    long_about = r#"
EXCEL SHEETS TO JSON CONVERTER
==============================

워크북의 모든 시트를 동시에 읽어 시트마다 <시트 이름>.json 파일을 만듭니다.
각 시트의 첫 행은 필드 이름, 나머지 행은 레코드가 됩니다.

특징:
  • 시트별 병렬 처리
  • 한 시트의 실패가 다른 시트에 영향을 주지 않음
  • 필드 이름 snake_case 정규화
  • 모든 값은 JSON 문자열로 출력

예제:
  sheet2json -i book.xlsx
  sheet2json -i book.xlsx -o ./json --snake-case
  sheet2json -i book.xlsx --sheets "Sales*,Q?" --compact
  sheet2json -i book.xlsx --dry-run
"#
)]
pub struct Args {
    /// 변환할 워크북 파일 경로 (xlsx, xlsm, xlsb, xls, ods)
    #[arg(short, long)]
    pub input: PathBuf,

    /// JSON 파일을 저장할 폴더
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// 필드 이름을 snake_case로 변환 (소문자 + 공백을 `_`로)
    #[arg(short, long, alias = "snakecase")]
    pub snake_case: bool,

    /// 변환할 시트 이름 패턴 (glob 형식, 쉼표로 구분, 예: "Sales*,Q?")
    #[arg(short = 'p', long)]
    pub sheets: Option<String>,

    /// 들여쓰기 공백 수
    #[arg(long, default_value_t = 4)]
    pub indent: usize,

    /// 한 줄 JSON 출력 (들여쓰기 없음)
    #[arg(long)]
    pub compact: bool,

    /// 병렬 처리 스레드 수 (기본값: CPU 코어 수)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// 상세 로그 출력
    #[arg(short, long)]
    pub verbose: bool,

    /// 진행률 바 표시 (로그는 경고 이상만 출력)
    #[arg(long)]
    pub progress: bool,

    /// 파일을 쓰지 않고 변환될 시트 목록만 표시
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// 들여쓰기 문자열 (compact면 None)
    pub fn indent(&self) -> Option<String> {
        if self.compact {
            None
        } else {
            Some(" ".repeat(self.indent))
        }
    }

    /// 시트 패턴 목록을 파싱하여 벡터로 반환
    pub fn sheet_patterns(&self) -> Vec<String> {
        self.sheets
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 변환 옵션 생성
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new()
            .with_normalize_keys(self.snake_case)
            .with_indent(self.indent())
    }

    /// 기본 로그 필터
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "sheet2json=debug"
        } else if self.progress {
            "sheet2json=warn"
        } else {
            "sheet2json=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sheet2json").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["-i", "book.xlsx"]);

        assert_eq!(args.input, PathBuf::from("book.xlsx"));
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert!(!args.snake_case);
        assert_eq!(args.indent(), Some("    ".to_string()));
        assert!(args.sheet_patterns().is_empty());
        assert_eq!(args.log_filter(), "sheet2json=info");
    }

    #[test]
    fn test_input_is_required() {
        let result = Args::try_parse_from(["sheet2json", "--snake-case"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_snakecase_alias() {
        let args = parse(&["-i", "b.xlsx", "--snakecase"]);
        assert!(args.snake_case);
        assert!(args.convert_options().normalize_keys);
    }

    #[test]
    fn test_compact_overrides_indent() {
        let args = parse(&["-i", "b.xlsx", "--indent", "2", "--compact"]);
        assert_eq!(args.indent(), None);

        let args = parse(&["-i", "b.xlsx", "--indent", "2"]);
        assert_eq!(args.indent(), Some("  ".to_string()));
    }

    #[test]
    fn test_sheet_patterns_parsing() {
        let args = parse(&["-i", "b.xlsx", "--sheets", "Sales*, Q?,,"]);
        assert_eq!(args.sheet_patterns(), vec!["Sales*", "Q?"]);
    }

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(parse(&["-i", "b", "-v"]).log_filter(), "sheet2json=debug");
        assert_eq!(
            parse(&["-i", "b", "--progress"]).log_filter(),
            "sheet2json=warn"
        );
    }
}
