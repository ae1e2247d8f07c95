//! 시트 선택 모듈
//!
//! glob 패턴으로 변환할 시트를 고릅니다.

use glob::Pattern;

use crate::error::{ConvertError, Result};

/// 시트 이름 필터
///
/// 패턴이 하나도 없으면 모든 시트를 선택하고, 있으면 하나라도 일치하는 시트만 선택합니다.
#[derive(Debug, Clone, Default)]
pub struct SheetFilter {
    patterns: Vec<Pattern>,
}

impl SheetFilter {
    /// 패턴 목록을 컴파일
    ///
    /// # Examples
    /// ```
    /// use sheet2json::filter::SheetFilter;
    ///
    /// let filter = SheetFilter::new(&["Sales*".to_string(), "Q?".to_string()]).unwrap();
    /// assert!(filter.matches("Sales 2024"));
    /// assert!(filter.matches("Q3"));
    /// assert!(!filter.matches("Notes"));
    /// ```
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|_| ConvertError::InvalidPattern { pattern: p.clone() })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// 모든 시트를 선택하는 필터
    pub fn all() -> Self {
        Self::default()
    }

    /// 시트 이름이 선택되는지 확인
    pub fn matches(&self, sheet: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(sheet))
    }

    pub fn has_patterns(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// 순서를 유지하며 선택된 시트만 남김
    pub fn select(&self, sheets: Vec<String>) -> Vec<String> {
        sheets.into_iter().filter(|s| self.matches(s)).collect()
    }
}
