//! 可执行文件解析
//! * 🎯从「平台搜索规则」得到唯一一个可执行文件路径
//! * 🚩流程
//!   * 取搜索规格（环境变量缺失⇒直接失败，不访问文件系统）
//!   * 列出候选项（根目录不可读⇒视作「未找到」）
//!   * 剔除文件夹
//!   * 按文件名字典序取第一个
//! * 📌「字典序」是明确选定的决胜规则：同一目录快照总是得到同一结果，与目录枚举顺序无关

use super::{Candidate, PlatformSearch};
use crate::LaunchError;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// 解析出的可执行文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
    path: PathBuf,
}

impl ResolvedExecutable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for ResolvedExecutable {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ResolvedExecutable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// 解析可执行文件
pub fn resolve(platform: &dyn PlatformSearch) -> Result<ResolvedExecutable, LaunchError> {
    let spec = platform.search_spec()?;
    log::debug!(
        "searching {} for the emulator ({} rules)",
        spec.display_pattern().display(),
        platform.platform_name()
    );

    let not_found = || LaunchError::NotFound {
        root: spec.root.clone(),
        pattern: spec.pattern.to_string(),
    };

    let candidates = match platform.enumerate_candidates(&spec) {
        Ok(candidates) => candidates,
        Err(e) => {
            log::warn!("cannot read {}: {e}", spec.root.display());
            return Err(not_found());
        }
    };

    select_candidate(candidates).ok_or_else(not_found)
}

/// 从候选项中选出一个
/// * 🚩剔除非文件，再按文件名（其次完整路径）字典序取最小
pub fn select_candidate(
    candidates: impl IntoIterator<Item = Candidate>,
) -> Option<ResolvedExecutable> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.is_file)
        .min_by(|a, b| {
            a.path
                .file_name()
                .cmp(&b.path.file_name())
                .then_with(|| a.path.cmp(&b.path))
        })
        .map(|candidate| ResolvedExecutable::new(candidate.path))
}
