//! sheet2json - EXCEL SHEETS TO JSON CONVERTER
//!
//! 워크북의 시트마다 JSON 배열 파일 하나를 만드는 CLI 도구입니다.
//! 각 시트의 첫 행은 필드 이름이 되고, 나머지 행은 그 이름을 키로 하는 레코드가 됩니다.
//!
//! # 주요 기능
//!
//! - 🚀 **시트별 병렬 처리**: Rayon으로 모든 시트를 동시에 변환
//! - 🛡️ **실패 격리**: 한 시트가 실패해도 나머지 시트는 그대로 저장
//! - 🐍 **키 정규화**: 필드 이름을 소문자 + `_` 형식으로 변환
//! - 🔍 **시트 선택**: glob 패턴으로 변환할 시트 지정
//! - 💾 **원자적 저장**: 실패한 시트는 부분 파일을 남기지 않음
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법
//! sheet2json -i book.xlsx
//!
//! # 키 정규화 + 출력 폴더 지정
//! sheet2json -i book.xlsx -o ./json --snake-case
//! ```

pub mod cli;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod record;
pub mod serializer;
pub mod sink;
pub mod source;
pub mod stats;
pub mod worker;

// Re-exports for convenient access
pub use cli::Args;
pub use coordinator::Coordinator;
pub use error::{ConvertError, Result};
pub use filter::SheetFilter;
pub use normalize::{normalize_header, normalize_key};
pub use record::{build_record, Record, RecordBuilder};
pub use serializer::JsonArraySerializer;
pub use sink::{DirSink, FileSink};
pub use source::{CalamineSource, MemorySource, Row, RowCursor, SheetSource};
pub use stats::{format_bytes, format_duration, Statistics};
pub use worker::{target_name, ConvertOptions, SheetOutcome, SheetReport, SheetStage, SheetWorker};
