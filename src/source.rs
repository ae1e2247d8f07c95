//! 시트 원본 모듈
//!
//! 시트 이름 목록과, 시트마다 한 번만 소비되는 행 커서를 제공합니다.
//! 서로 다른 시트의 커서는 여러 스레드에서 동시에 열 수 있어야 합니다.

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{ConvertError, Result};

/// 텍스트 셀의 나열
pub type Row = Vec<String>;

/// 한 시트의 행을 순서대로 내놓는 단일 소비 커서
pub type RowCursor<'a> = Box<dyn Iterator<Item = Result<Row>> + Send + 'a>;

/// 시트 목록과 행 커서를 제공하는 원본
pub trait SheetSource: Send + Sync {
    /// 워크북 순서대로 시트 이름 반환
    fn sheet_names(&self) -> Vec<String>;

    /// 시트 하나의 행 커서 열기
    fn rows(&self, sheet: &str) -> Result<RowCursor<'_>>;
}

/// calamine 기반 워크북 원본 (xlsx, xlsm, xlsb, xls, ods)
pub struct CalamineSource {
    path: PathBuf,
    names: Vec<String>,
    workbook: Mutex<Sheets<BufReader<File>>>,
}

impl CalamineSource {
    /// 워크북 열기
    ///
    /// 파일이 없거나 해석할 수 없으면 치명적 에러를 반환합니다.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ConvertError::InputNotFound { path });
        }

        let workbook = open_workbook_auto(&path).map_err(|e| ConvertError::WorkbookOpen {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let names = workbook.sheet_names();

        Ok(Self {
            path,
            names,
            workbook: Mutex::new(workbook),
        })
    }

    /// 워크북 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 시트의 사용 범위를 읽어 옴 (잠금은 이 구간에서만 유지)
    fn load_range(&self, sheet: &str) -> Result<Range<Data>> {
        let mut workbook = self.workbook.lock().map_err(|_| ConvertError::SheetRead {
            sheet: sheet.to_string(),
            reason: "워크북 잠금이 손상되었습니다".to_string(),
        })?;

        workbook
            .worksheet_range(sheet)
            .map_err(|e| ConvertError::SheetRead {
                sheet: sheet.to_string(),
                reason: e.to_string(),
            })
    }
}

impl SheetSource for CalamineSource {
    fn sheet_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn rows(&self, sheet: &str) -> Result<RowCursor<'_>> {
        let range = self.load_range(sheet)?;
        Ok(Box::new(RangeRows::new(range)))
    }
}

/// 불러온 범위를 행 단위 텍스트로 바꾸는 커서
struct RangeRows {
    range: Range<Data>,
    next: usize,
}

impl RangeRows {
    fn new(range: Range<Data>) -> Self {
        Self { range, next: 0 }
    }
}

impl Iterator for RangeRows {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.range.height() {
            return None;
        }

        let row_idx = self.next;
        self.next += 1;

        let mut row: Row = (0..self.range.width())
            .map(|col| {
                self.range
                    .get((row_idx, col))
                    .map(cell_to_text)
                    .unwrap_or_default()
            })
            .collect();

        // 뒤쪽 빈 셀 제거
        while row.last().is_some_and(|cell| cell.is_empty()) {
            row.pop();
        }

        Some(Ok(row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.range.height().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

/// 셀 값을 텍스트로 변환 (타입 정보는 버림)
pub fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 메모리에 올려 둔 시트 원본
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    order: Vec<String>,
    sheets: HashMap<String, Vec<Row>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 시트 추가 (같은 이름이면 행을 교체)
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        let name = name.into();
        if !self.sheets.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.sheets.insert(name, rows);
        self
    }
}

impl SheetSource for MemorySource {
    fn sheet_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn rows(&self, sheet: &str) -> Result<RowCursor<'_>> {
        let rows = self
            .sheets
            .get(sheet)
            .ok_or_else(|| ConvertError::SheetRead {
                sheet: sheet.to_string(),
                reason: "시트가 없습니다".to_string(),
            })?;

        Ok(Box::new(rows.iter().cloned().map(Ok::<Row, ConvertError>)))
    }
}
