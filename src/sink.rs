//! 출력 파일 모듈
//!
//! 렌더링된 텍스트를 이름 붙은 파일로 저장합니다.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{ConvertError, Result};

/// 렌더링된 텍스트를 저장하는 대상
pub trait FileSink: Send + Sync {
    /// `target` 이름으로 `text` 저장 후 실제 경로 반환
    fn write(&self, target: &str, text: &str) -> Result<PathBuf>;
}

/// 디렉토리에 원자적으로 파일을 쓰는 싱크
///
/// 같은 디렉토리의 임시 파일에 먼저 쓰고 대상 이름으로 옮기므로,
/// 실패한 쓰기는 부분 파일을 남기지 않습니다. 같은 이름의 파일은 덮어씁니다.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// 디렉토리가 이미 있다고 가정하고 생성
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 디렉토리가 없으면 만든 뒤 생성
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| ConvertError::Write {
            path: dir.clone(),
            reason: format!("출력 폴더 생성 실패: {}", e),
        })?;
        Ok(Self { dir })
    }

    /// 출력 디렉토리
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 대상 이름의 최종 경로
    pub fn path_for(&self, target: &str) -> PathBuf {
        self.dir.join(target)
    }
}

impl FileSink for DirSink {
    fn write(&self, target: &str, text: &str) -> Result<PathBuf> {
        let path = self.path_for(target);
        let write_err = |reason: String| ConvertError::Write {
            path: path.clone(),
            reason,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| write_err(e.to_string()))?;
        tmp.write_all(text.as_bytes())
            .and_then(|_| tmp.flush())
            .map_err(|e| write_err(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(|e| write_err(e.to_string()))?;
        }

        tmp.persist(&path)
            .map_err(|e| write_err(e.error.to_string()))?;

        Ok(path)
    }
}
