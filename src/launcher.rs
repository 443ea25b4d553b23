//! 模拟器启动器
//! * 🎯一站式「定位并启动」：解析 → 组装 → 调用
//!   * 📌任一阶段失败即短路，后续阶段不再执行
//! * 📌对外只给出[`LaunchOutcome`]；失败细节写入日志

use crate::{
    process_io::{compose, ComposedCommand, LaunchOutcome, ProcessInvoker, SystemInvoker},
    search::{
        resolve, FixedRootSearch, PlatformSearch, ResolvedExecutable, WildcardPattern,
    },
    LaunchError,
};
use std::path::{Path, PathBuf};

/// 默认模拟器名称
pub const DEFAULT_EMULATOR: &str = "rpcs3";

/// 默认前端名称
/// * 🎯Unix下配置目录`~/.config/<前端>/`
pub const DEFAULT_FRONTEND: &str = "retroarch";

/// 启动器设置
/// * 🚩所有字段均已确定（无「可选待填」项），由配置/默认值转换而来
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherSettings {
    /// 模拟器名称
    /// * 📄`rpcs3`
    pub emulator: String,

    /// 前端名称
    /// * 📄`retroarch`
    pub frontend: String,

    /// 自定义搜索根目录
    /// * 🚩有⇒跳过平台默认规则
    pub search_root: Option<PathBuf>,

    /// 自定义文件名模式
    /// * 🚩仅在自定义根目录时生效；无⇒`<emulator>*`
    pub pattern: Option<String>,

    /// 内容路径之前的额外参数
    pub extra_args: Vec<String>,

    /// 子进程工作目录
    pub current_dir: Option<PathBuf>,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self::new(DEFAULT_EMULATOR)
    }
}

impl LauncherSettings {
    pub fn new(emulator: impl Into<String>) -> Self {
        Self {
            emulator: emulator.into(),
            frontend: DEFAULT_FRONTEND.into(),
            search_root: None,
            pattern: None,
            extra_args: vec![],
            current_dir: None,
        }
    }

    /// 选出当前平台的搜索规则
    /// * 🚩自定义根目录 ⇒ [`FixedRootSearch`]
    /// * 🚩否则按编译目标选择
    ///   * Unix系（macOS除外）⇒ [`crate::search::UnixSearch`]
    ///   * Windows ⇒ [`crate::search::WindowsSearch`]
    ///   * 其它 ⇒ [`crate::search::UnsupportedSearch`]
    pub fn platform_search(&self) -> Result<Box<dyn PlatformSearch>, LaunchError> {
        if let Some(root) = &self.search_root {
            let pattern = match &self.pattern {
                Some(pattern) => WildcardPattern::with_case(pattern, cfg!(windows))?,
                None => WildcardPattern::with_case(format!("{}*", self.emulator), cfg!(windows))?,
            };
            return Ok(Box::new(FixedRootSearch::new(root, pattern)));
        }
        Ok(self.default_platform_search())
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn default_platform_search(&self) -> Box<dyn PlatformSearch> {
        Box::new(crate::search::UnixSearch::new(&self.emulator, &self.frontend))
    }

    #[cfg(windows)]
    fn default_platform_search(&self) -> Box<dyn PlatformSearch> {
        Box::new(crate::search::WindowsSearch::new(&self.emulator))
    }

    #[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
    fn default_platform_search(&self) -> Box<dyn PlatformSearch> {
        Box::new(crate::search::UnsupportedSearch::new(std::env::consts::OS))
    }
}

/// 启动器
/// * 📌持有「平台规则」与「进程调用者」，二者皆可替换
pub struct Launcher {
    emulator: String,
    platform: Box<dyn PlatformSearch>,
    invoker: Box<dyn ProcessInvoker>,
    extra_args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl Launcher {
    /// 以系统进程调用者构造
    pub fn from_settings(settings: &LauncherSettings) -> Result<Self, LaunchError> {
        Ok(Self::new(
            settings.emulator.clone(),
            settings.platform_search()?,
            Box::new(SystemInvoker),
        )
        .extra_args(settings.extra_args.clone())
        .current_dir(settings.current_dir.clone()))
    }

    pub fn new(
        emulator: impl Into<String>,
        platform: Box<dyn PlatformSearch>,
        invoker: Box<dyn ProcessInvoker>,
    ) -> Self {
        Self {
            emulator: emulator.into(),
            platform,
            invoker,
            extra_args: vec![],
            current_dir: None,
        }
    }

    pub fn extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    pub fn current_dir(mut self, current_dir: Option<PathBuf>) -> Self {
        self.current_dir = current_dir;
        self
    }

    pub fn emulator(&self) -> &str {
        &self.emulator
    }

    /// 解析阶段
    pub fn locate(&self) -> Result<ResolvedExecutable, LaunchError> {
        resolve(self.platform.as_ref())
    }

    /// 组装阶段
    /// * 🚩不会失败
    pub fn compose(&self, exe: &ResolvedExecutable, content_path: &Path) -> ComposedCommand {
        compose(exe, content_path)
            .with_leading_args(&self.extra_args)
            .with_current_dir(self.current_dir.clone())
    }

    /// 解析 + 组装，不启动
    /// * 🎯预演
    pub fn prepare(&self, content_path: &Path) -> Result<ComposedCommand, LaunchError> {
        let exe = self.locate()?;
        Ok(self.compose(&exe, content_path))
    }

    /// 解析 + 组装 + 调用
    pub fn launch(&mut self, content_path: &Path) -> Result<(), LaunchError> {
        let command = self.prepare(content_path)?;
        log::info!("{} path: {command}", self.emulator);
        self.invoker.invoke(&command)
    }

    /// 定位并启动
    /// * 🚩阻塞至子进程退出
    /// * 🚩成功与失败均输出一行诊断
    pub fn locate_and_launch(&mut self, content_path: &Path) -> LaunchOutcome {
        let result = self.launch(content_path);
        match &result {
            Ok(()) => log::info!("Finished running {}.", self.emulator),
            Err(e) => {
                log::error!("{e}");
                log::error!(
                    "Failed running {}. Place it in the right path and try again",
                    self.emulator
                );
            }
        }
        LaunchOutcome::from(&result)
    }
}

/// 按设置定位并启动
/// * 🎯宿主适配层与CLI的共同入口
/// * 🚩设置本身无效（如模式无法编译）同样视作失败
pub fn locate_and_launch(settings: &LauncherSettings, content_path: &Path) -> LaunchOutcome {
    match Launcher::from_settings(settings) {
        Ok(mut launcher) => launcher.locate_and_launch(content_path),
        Err(e) => {
            log::error!("{e}");
            LaunchOutcome::Failed
        }
    }
}
