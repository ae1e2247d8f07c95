//! 필드 이름 정규화 모듈
//!
//! 헤더 필드 이름만 대상으로 하며, 데이터 셀 값은 건드리지 않습니다.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// 필드 이름 하나를 정규화
///
/// 모든 문자를 소문자로 바꾼 뒤, 연속된 공백 문자열을 `_` 하나로 합칩니다.
/// 앞뒤 공백도 잘라내지 않고 `_`로 바뀝니다.
///
/// # Examples
/// ```
/// use sheet2json::normalize::normalize_key;
///
/// assert_eq!(normalize_key("First Name"), "first_name");
/// assert_eq!(normalize_key("  Multi   Space "), "_multi_space_");
/// ```
pub fn normalize_key(field: &str) -> String {
    let lowered = field.to_lowercase();
    WHITESPACE_RUN.replace_all(&lowered, "_").into_owned()
}

/// 헤더 전체를 순서대로 정규화
///
/// 중복 제거는 하지 않습니다. 같은 이름으로 합쳐진 필드는 레코드를 만들 때 하나의 키가 됩니다.
pub fn normalize_header(header: Vec<String>) -> Vec<String> {
    header.into_iter().map(|field| normalize_key(&field)).collect()
}
