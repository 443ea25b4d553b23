//! 启动命令的组装
//! * 🎯把「可执行文件 + 内容路径」组装成一次进程调用
//! * 📌不经过shell：直接以「参数数组」启动
//!   * ✅内容路径作为**一个**参数原样传入，不加引号、不做转义
//!   * ✅其中的空格、引号、`;`、`&&`、`$()`等都只是参数的一部分，无法注入额外命令
//! * 📌另外提供一个「仅供展示」的命令行字符串，用于日志与预演输出

use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::{Path, PathBuf},
    process::Command,
};

/// 组装好的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedCommand {
    /// 可执行文件
    program: PathBuf,
    /// 参数
    /// * 🚩内容路径总是最后一个
    args: Vec<OsString>,
    /// 工作目录（可选）
    current_dir: Option<PathBuf>,
}

/// 组装命令
/// * 🚩可执行文件为程序本身，内容路径为唯一参数
pub fn compose(exe_path: impl AsRef<Path>, content_path: impl AsRef<OsStr>) -> ComposedCommand {
    ComposedCommand {
        program: exe_path.as_ref().to_path_buf(),
        args: vec![content_path.as_ref().to_os_string()],
        current_dir: None,
    }
}

impl ComposedCommand {
    /// 在内容路径之前插入额外参数
    /// * 🎯如`--no-gui`之类的模拟器选项（来自启动配置）
    pub fn with_leading_args<I, S>(mut self, leading: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut args = leading
            .into_iter()
            .map(|arg| arg.as_ref().to_os_string())
            .collect::<Vec<_>>();
        args.append(&mut self.args);
        self.args = args;
        self
    }

    /// 设置工作目录
    pub fn with_current_dir(mut self, current_dir: Option<impl Into<PathBuf>>) -> Self {
        self.current_dir = current_dir.map(Into::into);
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// 生成[`Command`]对象
    /// * 📌「配置」的定义
    ///   * exe路径
    ///   * 当前文件夹（设置命令启动时的工作目录）
    ///   * 命令行参数
    pub fn to_command(&self) -> Command {
        // 构造指令
        let mut command = Command::new(&self.program);

        // 设置路径
        if let Some(current_dir) = &self.current_dir {
            command.current_dir(current_dir);
        }

        // 设置参数
        command.args(&self.args);

        command
    }
}

/// 仅供展示的命令行
/// * 📄`/path/to/rpcs3 "/roms/Some Game/EBOOT.BIN"`
/// * ⚠️不可拿去执行：不做任何转义
impl fmt::Display for ComposedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " \"{}\"", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_argument() {
        let cmd = compose("/bin/emu", "/games/a.bin");
        assert_eq!(cmd.program(), Path::new("/bin/emu"));
        assert_eq!(cmd.args(), &[OsString::from("/games/a.bin")]);

        let command = cmd.to_command();
        assert_eq!(command.get_program(), OsStr::new("/bin/emu"));
        assert_eq!(
            command.get_args().collect::<Vec<_>>(),
            vec![OsStr::new("/games/a.bin")]
        );
        assert_eq!(command.get_current_dir(), None);
    }

    #[test]
    fn hostile_path_stays_one_argument() {
        let hostile = r#"/games/a" ; rm -rf ~ ; echo "$(id)`whoami` && x.bin"#;
        let cmd = compose("/bin/emu", hostile);
        let command = cmd.to_command();
        let args = command.get_args().collect::<Vec<_>>();
        assert_eq!(args, vec![OsStr::new(hostile)]);
        // 程序仍是模拟器本身，而不是某个shell
        assert_eq!(command.get_program(), OsStr::new("/bin/emu"));
    }

    #[test]
    fn spaces() {
        let cmd = compose("/bin/emu", "/games/Some Game/EBOOT.BIN");
        assert_eq!(cmd.args().len(), 1);
        assert_eq!(
            cmd.to_string(),
            r#"/bin/emu "/games/Some Game/EBOOT.BIN""#
        );
    }

    #[test]
    fn leading_args_and_dir() {
        let cmd = compose("/bin/emu", "/games/a.bin")
            .with_leading_args(["--no-gui"])
            .with_current_dir(Some("/bin"));
        assert_eq!(
            cmd.args(),
            &[OsString::from("--no-gui"), OsString::from("/games/a.bin")]
        );
        assert_eq!(cmd.current_dir(), Some(Path::new("/bin")));
        assert_eq!(cmd.to_command().get_current_dir(), Some(Path::new("/bin")));
    }
}
