//! JSON 배열 직렬화 모듈
//!
//! 레코드 목록을 최상위 JSON 배열 하나로 렌더링합니다.
//! 요소 사이에만 `,`를 두며 마지막 요소 뒤에는 붙이지 않습니다.

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::record::Record;

/// 기본 들여쓰기 (공백 4칸)
pub const DEFAULT_INDENT: &str = "    ";

/// JSON 배열 직렬화기
#[derive(Debug, Clone, PartialEq)]
pub struct JsonArraySerializer {
    indent: Option<String>,
}

impl Default for JsonArraySerializer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl JsonArraySerializer {
    /// 중첩 단계마다 `indent`를 붙이는 직렬화기
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: Some(indent.into()),
        }
    }

    /// 한 줄로 출력하는 직렬화기
    pub fn compact() -> Self {
        Self { indent: None }
    }

    /// 옵션 값으로 생성 (`None`이면 compact)
    pub fn from_indent(indent: Option<&str>) -> Self {
        match indent {
            Some(indent) => Self::new(indent),
            None => Self::compact(),
        }
    }

    /// 레코드 목록 직렬화
    ///
    /// 레코드가 없으면 `[]`를 반환합니다. 모든 값은 JSON 문자열입니다.
    pub fn serialize(&self, records: &[Record]) -> serde_json::Result<String> {
        let mut buf = Vec::with_capacity(estimate_capacity(records));

        match &self.indent {
            Some(indent) => {
                let formatter = PrettyFormatter::with_indent(indent.as_bytes());
                let mut ser = Serializer::with_formatter(&mut buf, formatter);
                records.serialize(&mut ser)?;
            }
            None => serde_json::to_writer(&mut buf, records)?,
        }

        String::from_utf8(buf).map_err(serde_json::Error::custom)
    }
}

fn estimate_capacity(records: &[Record]) -> usize {
    records
        .first()
        .map(|r| r.iter().map(|(k, v)| k.len() + v.len() + 8).sum::<usize>())
        .unwrap_or(0)
        .saturating_mul(records.len())
        + 2
}
