//! 各平台的「模拟器搜索规则」
//! * 🎯把「平台分支」收拢为一个特征，每个平台族一个实现
//!   * ✅Unix系：`$HOME/.config/<前端>/system/<模拟器>/<模拟器>*`
//!   * ✅Windows：固定安装目录下的`<模拟器>*.exe`
//!   * ❌其余平台（macOS等）：尚无规则，总是失败
//! * 🚩具体选用哪个实现，由编译目标决定（见[`crate::LauncherSettings::platform_search`]）

use super::{scan_candidates, Candidate, SearchSpec, WildcardPattern};
use crate::LaunchError;
use std::{ffi::OsString, io, path::PathBuf};

/// 环境变量来源
/// * 🎯让测试可以模拟「`HOME`缺失」
pub trait EnvSource {
    fn var_os(&self, key: &str) -> Option<OsString>;
}

/// 当前进程的环境变量
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// 闭包亦可作为环境变量来源
impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<OsString>,
{
    fn var_os(&self, key: &str) -> Option<OsString> {
        self(key)
    }
}

/// 平台搜索规则
pub trait PlatformSearch {
    /// 平台名称，用于日志
    fn platform_name(&self) -> &'static str;

    /// 给出本平台的搜索规格
    /// * ⚠️不应访问文件系统
    fn search_spec(&self) -> Result<SearchSpec, LaunchError>;

    /// 列出候选项
    /// * 🚩默认实现：扫描根目录
    fn enumerate_candidates(&self, spec: &SearchSpec) -> io::Result<Vec<Candidate>> {
        scan_candidates(spec)
    }
}

/// Unix系平台
/// * 📌根目录：`$HOME/.config/<frontend>/system/<emulator>/`
/// * 📌模式：`<emulator>*`（无需扩展名）
pub struct UnixSearch<E: EnvSource = ProcessEnv> {
    emulator: String,
    frontend: String,
    env: E,
}

impl UnixSearch {
    pub fn new(emulator: impl Into<String>, frontend: impl Into<String>) -> Self {
        Self::with_env(emulator, frontend, ProcessEnv)
    }
}

impl<E: EnvSource> UnixSearch<E> {
    pub fn with_env(emulator: impl Into<String>, frontend: impl Into<String>, env: E) -> Self {
        Self {
            emulator: emulator.into(),
            frontend: frontend.into(),
            env,
        }
    }
}

impl<E: EnvSource> PlatformSearch for UnixSearch<E> {
    fn platform_name(&self) -> &'static str {
        "unix"
    }

    fn search_spec(&self) -> Result<SearchSpec, LaunchError> {
        let home = self
            .env
            .var_os("HOME")
            .filter(|home| !home.is_empty())
            .ok_or(LaunchError::MissingEnv("HOME"))?;
        let root = PathBuf::from(home)
            .join(".config")
            .join(&self.frontend)
            .join("system")
            .join(&self.emulator);
        let pattern = WildcardPattern::new(format!("{}*", self.emulator))?;
        Ok(SearchSpec::new(root, pattern))
    }
}

/// Windows平台
/// * 📌根目录：固定安装目录（默认`C:\RetroArch-Win64\system\<emulator>`）
/// * 📌模式：`<emulator>*.exe`，不区分大小写
pub struct WindowsSearch {
    emulator: String,
    install_dir: PathBuf,
}

/// Windows下前端的默认「system」目录
pub const WINDOWS_SYSTEM_DIR: &str = r"C:\RetroArch-Win64\system";

impl WindowsSearch {
    pub fn new(emulator: impl Into<String>) -> Self {
        let emulator = emulator.into();
        let install_dir = PathBuf::from(WINDOWS_SYSTEM_DIR).join(&emulator);
        Self::with_install_dir(emulator, install_dir)
    }

    pub fn with_install_dir(emulator: impl Into<String>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            emulator: emulator.into(),
            install_dir: install_dir.into(),
        }
    }
}

impl PlatformSearch for WindowsSearch {
    fn platform_name(&self) -> &'static str {
        "windows"
    }

    fn search_spec(&self) -> Result<SearchSpec, LaunchError> {
        let pattern = WildcardPattern::with_case(format!("{}*.exe", self.emulator), true)?;
        Ok(SearchSpec::new(&self.install_dir, pattern))
    }
}

/// 尚无搜索规则的平台
/// * 🚩总是失败
#[derive(Debug, Clone, Copy)]
pub struct UnsupportedSearch {
    platform: &'static str,
}

impl UnsupportedSearch {
    pub fn new(platform: &'static str) -> Self {
        Self { platform }
    }
}

impl PlatformSearch for UnsupportedSearch {
    fn platform_name(&self) -> &'static str {
        self.platform
    }

    fn search_spec(&self) -> Result<SearchSpec, LaunchError> {
        Err(LaunchError::UnsupportedPlatform(self.platform))
    }
}

/// 固定根目录
/// * 🎯由配置或命令行显式指定根目录时使用，跳过平台默认规则
pub struct FixedRootSearch {
    spec: SearchSpec,
}

impl FixedRootSearch {
    pub fn new(root: impl Into<PathBuf>, pattern: WildcardPattern) -> Self {
        Self {
            spec: SearchSpec::new(root, pattern),
        }
    }
}

impl PlatformSearch for FixedRootSearch {
    fn platform_name(&self) -> &'static str {
        "custom"
    }

    fn search_spec(&self) -> Result<SearchSpec, LaunchError> {
        Ok(self.spec.clone())
    }
}
