//! 에러 타입 정의 모듈
//!
//! 프로세스 전체를 멈추는 치명적 에러와 한 시트만 중단시키는 에러를 함께 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// sheet2json에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 입력 워크북 파일이 존재하지 않음
    #[error("입력 파일을 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 워크북 열기 또는 해석 실패
    #[error("워크북을 열 수 없습니다 ({path}): {reason}")]
    WorkbookOpen { path: PathBuf, reason: String },

    /// 유효하지 않은 시트 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 시트 범위 읽기 실패
    #[error("시트를 읽을 수 없습니다 ({sheet}): {reason}")]
    SheetRead { sheet: String, reason: String },

    /// 행 커서 읽기 실패
    #[error("{row}번째 행 읽기 실패 ({sheet}): {reason}")]
    RowRead {
        sheet: String,
        row: usize,
        reason: String,
    },

    /// JSON 직렬화 실패
    #[error("JSON 직렬화 실패 ({sheet}): {reason}")]
    Serialize { sheet: String, reason: String },

    /// 출력 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({path}): {reason}")]
    Write { path: PathBuf, reason: String },
}

impl ConvertError {
    /// 시트 처리 시작 전에 프로세스를 중단시켜야 하는 에러인지 여부
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConvertError::InputNotFound { .. }
                | ConvertError::WorkbookOpen { .. }
                | ConvertError::InvalidPattern { .. }
        )
    }
}

/// sheet2json 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ConvertError>;
