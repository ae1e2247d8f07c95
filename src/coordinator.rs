//! 병렬 처리 조정 모듈
//!
//! 시트마다 작업자 하나를 띄우고, 모두 끝날 때까지 기다린 뒤 돌아옵니다.
//! 한 시트의 실패는 다른 시트를 취소하거나 늦추지 않습니다.

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::filter::SheetFilter;
use crate::sink::FileSink;
use crate::source::SheetSource;
use crate::stats::Statistics;
use crate::worker::{ConvertOptions, SheetWorker};

/// 시트 작업자들을 조정
#[derive(Clone, Default)]
pub struct Coordinator {
    options: ConvertOptions,
    filter: SheetFilter,
    progress: Option<ProgressBar>,
}

impl Coordinator {
    pub fn new(options: ConvertOptions, filter: SheetFilter) -> Self {
        Self {
            options,
            filter,
            progress: None,
        }
    }

    /// 시트가 끝날 때마다 진행률 바 갱신
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// 처리할 시트 목록 (워크북 순서, 필터 적용)
    pub fn discover(&self, source: &dyn SheetSource) -> Vec<String> {
        let all = source.sheet_names();
        let total = all.len();
        let selected = self.filter.select(all);
        debug!(total, selected = selected.len(), "시트 목록 확인");
        selected
    }

    /// 모든 시트를 병렬로 변환하고 전부 끝날 때까지 대기
    ///
    /// 결과는 `stats`와 로그로만 남습니다.
    pub fn run(
        &self,
        source: &dyn SheetSource,
        sink: &dyn FileSink,
        sheets: &[String],
        stats: &Statistics,
    ) {
        info!(sheets = sheets.len(), "시트 병렬 처리 시작");

        sheets.par_iter().for_each(|sheet| {
            let outcome = SheetWorker::new(sheet, source, sink, &self.options).run();
            stats.record(&outcome);

            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        });

        if let Some(pb) = &self.progress {
            pb.finish_with_message("완료!");
        }

        info!(
            succeeded = stats.get_success_count(),
            failed = stats.get_error_count(),
            "모든 시트 처리 종료"
        );
    }
}
