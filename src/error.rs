//! 启动流程的错误类型
//! * 🎯在crate内部保留「失败的细节」，在宿主边界处统一折叠为[`crate::LaunchOutcome::Failed`]
//! * 📌三大类：配置（环境/平台）、未找到、启动（进程）
//!   * 📄「配置」与「未找到」对宿主而言是同一种结果：都只会得到一个`false`

use std::{io, path::PathBuf};
use thiserror::Error;

/// 启动流程中可能出现的错误
#[derive(Debug, Error)]
pub enum LaunchError {
    /// 决定搜索根目录所需的环境变量不存在
    /// * 📄Unix下的`HOME`
    #[error("environment variable `{0}` is not set, cannot locate the emulator directory")]
    MissingEnv(&'static str),

    /// 当前平台没有可用的搜索规则
    #[error("no emulator search rule is defined for platform `{0}`")]
    UnsupportedPlatform(&'static str),

    /// 通配符模式无法编译
    #[error("invalid search pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// 根目录下没有任何匹配的常规文件
    /// * 🚩根目录不存在、不可读时，同样归入此类
    #[error("no executable matching `{pattern}` found in {root:?}")]
    NotFound { root: PathBuf, pattern: String },

    /// 子进程无法启动
    #[error("failed to start {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 子进程以非零状态退出，或被信号终止
    /// * 🚩`code`为[`None`]⇒被信号终止
    #[error("{program:?} exited with {}", describe_exit(.code))]
    ExitStatus { program: PathBuf, code: Option<i32> },
}

/// 描述退出状态
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// 错误大类
/// * 🎯对应「配置错误」「未找到」「启动错误」三类诊断
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchErrorKind {
    Configuration,
    NotFound,
    Launch,
}

impl LaunchError {
    /// 获取错误大类
    pub fn kind(&self) -> LaunchErrorKind {
        match self {
            Self::MissingEnv(..) | Self::UnsupportedPlatform(..) | Self::InvalidPattern { .. } => {
                LaunchErrorKind::Configuration
            }
            Self::NotFound { .. } => LaunchErrorKind::NotFound,
            Self::Spawn { .. } | Self::ExitStatus { .. } => LaunchErrorKind::Launch,
        }
    }

    /// 是否为「解析阶段」的失败
    /// * 🎯对宿主而言：配置错误与未找到不作区分
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self.kind(),
            LaunchErrorKind::Configuration | LaunchErrorKind::NotFound
        )
    }
}
