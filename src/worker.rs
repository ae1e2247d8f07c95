//! 시트 처리 모듈
//!
//! 시트 하나를 처음부터 끝까지 변환합니다.
//! 헤더 읽기 → 행 읽기 → 키 정규화 → 직렬화 → 파일 쓰기 순서로 진행하며,
//! 어느 단계에서든 실패하면 그 시트만 중단되고 파일은 남지 않습니다.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, info_span, warn};

use crate::error::{ConvertError, Result};
use crate::normalize::normalize_header;
use crate::record::{Record, RecordBuilder};
use crate::serializer::{JsonArraySerializer, DEFAULT_INDENT};
use crate::sink::FileSink;
use crate::source::{Row, SheetSource};

/// 변환 옵션
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// 헤더 필드 이름 정규화 여부
    pub normalize_keys: bool,
    /// 들여쓰기 문자열 (None이면 한 줄 출력)
    pub indent: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            normalize_keys: false,
            indent: Some(DEFAULT_INDENT.to_string()),
        }
    }
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 키 정규화 설정
    pub fn with_normalize_keys(mut self, normalize_keys: bool) -> Self {
        self.normalize_keys = normalize_keys;
        self
    }

    /// 들여쓰기 설정
    pub fn with_indent(mut self, indent: Option<String>) -> Self {
        self.indent = indent;
        self
    }

    fn serializer(&self) -> JsonArraySerializer {
        JsonArraySerializer::from_indent(self.indent.as_deref())
    }
}

/// 시트 처리 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetStage {
    ReadingHeader,
    ReadingRows,
    Normalizing,
    Serializing,
    Writing,
}

impl fmt::Display for SheetStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetStage::ReadingHeader => write!(f, "헤더 읽기"),
            SheetStage::ReadingRows => write!(f, "행 읽기"),
            SheetStage::Normalizing => write!(f, "키 정규화"),
            SheetStage::Serializing => write!(f, "직렬화"),
            SheetStage::Writing => write!(f, "파일 쓰기"),
        }
    }
}

/// 성공한 시트의 처리 결과
#[derive(Debug, Clone)]
pub struct SheetReport {
    pub sheet: String,
    pub path: PathBuf,
    /// 헤더를 제외한 데이터 행 수
    pub rows: usize,
    pub records: usize,
    pub bytes: u64,
    pub elapsed: Duration,
}

/// 시트 처리의 최종 상태
#[derive(Debug)]
pub enum SheetOutcome {
    Done(SheetReport),
    Failed {
        sheet: String,
        stage: SheetStage,
        error: ConvertError,
    },
}

impl SheetOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, SheetOutcome::Done(_))
    }
}

/// 시트 이름에 대응하는 출력 파일 이름
pub fn target_name(sheet: &str) -> String {
    format!("{}.json", sheet)
}

/// 시트 하나를 담당하는 작업자
pub struct SheetWorker<'a> {
    sheet: &'a str,
    source: &'a dyn SheetSource,
    sink: &'a dyn FileSink,
    options: &'a ConvertOptions,
}

impl<'a> SheetWorker<'a> {
    pub fn new(
        sheet: &'a str,
        source: &'a dyn SheetSource,
        sink: &'a dyn FileSink,
        options: &'a ConvertOptions,
    ) -> Self {
        Self {
            sheet,
            source,
            sink,
            options,
        }
    }

    /// 시트 변환 실행
    ///
    /// 진행 상황과 실패 원인은 `sheet` span 안에서 로그로 남깁니다.
    pub fn run(&self) -> SheetOutcome {
        let span = info_span!("sheet", name = %self.sheet);
        let _guard = span.enter();

        let start = Instant::now();
        let mut stage = SheetStage::ReadingHeader;
        info!("시트 처리 시작");

        match self.convert(&mut stage, start) {
            Ok(report) => {
                info!(
                    path = %report.path.display(),
                    records = report.records,
                    bytes = report.bytes,
                    "저장 완료, {:.3}초 소요",
                    report.elapsed.as_secs_f64()
                );
                SheetOutcome::Done(report)
            }
            Err(error) => {
                error!(%stage, "시트 처리 실패: {}", error);
                SheetOutcome::Failed {
                    sheet: self.sheet.to_string(),
                    stage,
                    error,
                }
            }
        }
    }

    fn convert(&self, stage: &mut SheetStage, start: Instant) -> Result<SheetReport> {
        let mut cursor = self.source.rows(self.sheet)?;
        let (header, header_rows) = match cursor.next() {
            Some(row) => (row?, 1),
            None => (Row::new(), 0),
        };

        *stage = SheetStage::ReadingRows;
        let rows = self.read_rows(cursor)?;
        info!(
            "{}개 행 읽음 (헤더 제외 {}개)",
            rows.len() + header_rows,
            rows.len()
        );

        *stage = SheetStage::Normalizing;
        let header = if self.options.normalize_keys {
            debug!("필드 이름을 snake_case로 변환");
            normalize_header(header)
        } else {
            header
        };

        *stage = SheetStage::Serializing;
        let builder = RecordBuilder::new(&header);
        if !builder.duplicate_keys().is_empty() {
            warn!(
                duplicates = ?builder.duplicate_keys(),
                "중복 필드 이름은 하나로 합쳐지며 마지막 값이 남습니다"
            );
        }
        let records: Vec<Record> = rows.iter().map(|row| builder.build(row)).collect();
        let text = self
            .options
            .serializer()
            .serialize(&records)
            .map_err(|e| ConvertError::Serialize {
                sheet: self.sheet.to_string(),
                reason: e.to_string(),
            })?;

        *stage = SheetStage::Writing;
        let path = self.sink.write(&target_name(self.sheet), &text)?;

        Ok(SheetReport {
            sheet: self.sheet.to_string(),
            path,
            rows: rows.len(),
            records: records.len(),
            bytes: text.len() as u64,
            elapsed: start.elapsed(),
        })
    }

    /// 남은 행을 모두 읽음 (하나라도 실패하면 읽은 행을 모두 버림)
    fn read_rows(&self, cursor: impl Iterator<Item = Result<Row>>) -> Result<Vec<Row>> {
        cursor
            .enumerate()
            .map(|(idx, row)| {
                row.map_err(|e| match e {
                    ConvertError::RowRead { .. } => e,
                    other => ConvertError::RowRead {
                        sheet: self.sheet.to_string(),
                        // 헤더가 1번째 행
                        row: idx + 2,
                        reason: other.to_string(),
                    },
                })
            })
            .collect()
    }
}
