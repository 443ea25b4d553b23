//! 进程调用
//! * 🎯同步执行组装好的命令，阻塞至子进程退出
//! * 📌退出码为零⇒成功；非零、被信号终止、无法启动⇒失败
//! * ⚠️无超时、不可取消：子进程挂起，调用方随之挂起

use super::ComposedCommand;
use crate::LaunchError;

/// 启动结果
/// * 🚩宿主只会看到「成功/失败」，没有更多结构化信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Succeeded,
    Failed,
}

impl LaunchOutcome {
    pub fn is_succeeded(self) -> bool {
        self == Self::Succeeded
    }
}

impl From<bool> for LaunchOutcome {
    fn from(succeeded: bool) -> Self {
        match succeeded {
            true => Self::Succeeded,
            false => Self::Failed,
        }
    }
}

impl<T> From<&Result<T, LaunchError>> for LaunchOutcome {
    fn from(result: &Result<T, LaunchError>) -> Self {
        result.is_ok().into()
    }
}

/// 进程调用者
/// * 🎯把「真正启动进程」隔离出来，测试中可替换为记录调用的假实现
pub trait ProcessInvoker {
    /// 执行命令并等待其结束
    /// * 🚩`Ok(())`当且仅当退出码为零
    fn invoke(&mut self, command: &ComposedCommand) -> Result<(), LaunchError>;
}

/// 系统进程调用者
/// * 🚩使用[`std::process::Command::status`]：继承标准输入输出，阻塞等待
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInvoker;

impl ProcessInvoker for SystemInvoker {
    fn invoke(&mut self, command: &ComposedCommand) -> Result<(), LaunchError> {
        let status = command
            .to_command()
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: command.program().to_path_buf(),
                source,
            })?;
        match status.success() {
            true => Ok(()),
            false => Err(LaunchError::ExitStatus {
                program: command.program().to_path_buf(),
                code: status.code(),
            }),
        }
    }
}
