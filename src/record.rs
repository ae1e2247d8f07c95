//! 레코드 생성 모듈
//!
//! 헤더 한 줄과 데이터 행 한 줄을 헤더 순서가 보존된 키-값 레코드로 바꿉니다.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

/// 헤더 순서를 보존하는 레코드
///
/// 키 목록은 같은 시트의 모든 레코드가 공유합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    keys: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// 항목 수
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 키로 값 조회
    pub fn get(&self, key: &str) -> Option<&str> {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|i| self.values[i].as_str())
    }

    /// 헤더 순서대로 (키, 값) 순회
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// 헤더로부터 레코드를 만드는 빌더
///
/// 생성 시점에 헤더 위치마다 출력 슬롯을 정해 둡니다.
/// 같은 이름이 여러 번 나오면 첫 위치의 슬롯 하나를 공유하고, 왼쪽에서 오른쪽으로 덮어써서
/// 마지막 값이 남습니다.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    keys: Arc<[String]>,
    slots: Vec<usize>,
    duplicates: Vec<String>,
}

impl RecordBuilder {
    /// 헤더로 슬롯 배치 계산
    pub fn new(header: &[String]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(header.len());
        let mut keys: Vec<String> = Vec::with_capacity(header.len());
        let mut slots = Vec::with_capacity(header.len());
        let mut duplicates = Vec::new();

        for field in header {
            let slot = match index.get(field.as_str()) {
                Some(&slot) => {
                    if !duplicates.contains(field) {
                        duplicates.push(field.clone());
                    }
                    slot
                }
                None => {
                    let slot = keys.len();
                    index.insert(field.as_str(), slot);
                    keys.push(field.clone());
                    slot
                }
            };
            slots.push(slot);
        }

        Self {
            keys: keys.into(),
            slots,
            duplicates,
        }
    }

    /// 레코드의 키 목록 (중복 제거, 첫 등장 순서)
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// 두 번 이상 나와서 하나로 합쳐진 필드 이름
    pub fn duplicate_keys(&self) -> &[String] {
        &self.duplicates
    }

    /// 데이터 행 하나로 레코드 생성
    ///
    /// 헤더보다 짧은 행의 빈 위치는 `""`가 되고, 헤더보다 긴 행의 남는 셀은 버립니다.
    /// 실패하지 않습니다.
    pub fn build(&self, row: &[String]) -> Record {
        let mut values = vec![String::new(); self.keys.len()];
        for (position, &slot) in self.slots.iter().enumerate() {
            values[slot] = row.get(position).cloned().unwrap_or_default();
        }

        Record {
            keys: Arc::clone(&self.keys),
            values,
        }
    }
}

/// 헤더와 행 하나로 바로 레코드 생성
///
/// # Examples
/// ```
/// use sheet2json::record::build_record;
///
/// let header = vec!["a".to_string(), "b".to_string()];
/// let record = build_record(&header, &["1".to_string()]);
/// assert_eq!(record.get("a"), Some("1"));
/// assert_eq!(record.get("b"), Some(""));
/// ```
pub fn build_record(header: &[String], row: &[String]) -> Record {
    RecordBuilder::new(header).build(row)
}
