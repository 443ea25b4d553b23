//! 主模块
//! * ✨模拟器可执行文件搜索
//! * ✨不经shell的进程组装与调用
//! * ✨libretro宿主适配层（可选）
//! * ✨命令行支持（可选）

// 实用库别名
pub extern crate nar_dev_utils as util;

util::mods! {
    // 必选模块 //

    // 错误类型
    pub pub error;

    // 可执行文件搜索
    pub search;

    // 进程组装与调用
    pub process_io;

    // 启动器
    pub pub launcher;

    // 输出打印
    pub output_print;

    // 可选模块 //

    // libretro宿主适配层
    "libretro" => pub host;

    // 命令行支持
    "cli_support" => pub cli_support;
}

pub use process_io::LaunchOutcome;

/// 单元测试
/// * 🎯为下属单元测试提供测试支持
///   * 📄以脚本充当「模拟器」
#[cfg(test)]
mod tests {
    use crate::{
        process_io::{ComposedCommand, ProcessInvoker},
        LaunchError,
    };
    use std::path::{Path, PathBuf};

    /// 写入一个可执行的shell脚本
    #[cfg(unix)]
    pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::{fs, os::unix::fs::PermissionsExt};
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// 重试「文件忙」错误
    /// * 📝刚写完的脚本立即执行时，并行测试中别的线程`fork`出的子进程可能仍持有写句柄
    ///   * ⚠️此时`exec`会得到`ETXTBSY`
    pub fn retrying<T>(mut f: impl FnMut() -> Result<T, LaunchError>) -> Result<T, LaunchError> {
        const ETXTBSY: i32 = 26;
        let mut attempts = 0;
        loop {
            match f() {
                Err(LaunchError::Spawn { source, .. })
                    if source.raw_os_error() == Some(ETXTBSY) && attempts < 10 =>
                {
                    attempts += 1;
                    std::thread::sleep(std::time::Duration::from_millis(50));
                }
                result => break result,
            }
        }
    }

    /// 带重试地调用
    pub fn invoke_retrying(
        invoker: &mut impl ProcessInvoker,
        command: &ComposedCommand,
    ) -> Result<(), LaunchError> {
        retrying(|| invoker.invoke(command))
    }
}
