//! 输出打印
//! * 🎯用于规范化、统一、美化输出
//!   * 📌CLI自身的提示信息
//!   * 📌宿主未提供日志接口时的后备输出（标准错误）
//! * 🚩统一形式：`[类型] 内容`

use colored::Colorize;
use std::fmt::Display;

/// 统一的「输出类型」
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    /// 错误
    Error,
    /// 警告
    Warn,
    /// 信息
    Info,
    /// 日志
    Log,
    /// debug
    Debug,
}

impl OutputType {
    /// 自身的字符串形式
    /// * 🎯作为输出的「头部」
    pub fn as_str(&self) -> &str {
        match self {
            OutputType::Error => "ERROR",
            OutputType::Warn => "WARN",
            OutputType::Info => "INFO",
            OutputType::Debug => "DEBUG",
            OutputType::Log => "LOG",
        }
    }

    /// 格式化输出（无颜色）
    /// * 🎯封装标准输出形式：`[类型] 内容`
    pub fn plain_line(&self, msg: &str) -> String {
        format!("[{}] {}", self.as_str(), msg)
    }

    /// 格式化输出
    /// * 🎯封装命令行美化逻辑
    #[inline(always)]
    pub fn format_line(&self, msg: &str) -> impl Display {
        self.to_colored_str(self.plain_line(msg))
    }

    /// 基于[`colored`]的输出美化
    pub fn to_colored_str(&self, message: String) -> impl Display {
        match self {
            OutputType::Error => message.red(),
            OutputType::Warn => message.bright_yellow(),
            OutputType::Info => message.cyan(),
            OutputType::Log => message.bright_black(),
            OutputType::Debug => message.bright_blue(),
        }
        .bold()
    }

    /// ✨格式化打印输出
    #[inline]
    pub fn print_line(&self, message: &str) {
        println!("{}", self.format_line(message));
    }

    /// ✨格式化打印输出（标准错误）
    #[inline]
    pub fn eprint_line(&self, message: &str) {
        eprintln!("{}", self.format_line(message));
    }
}

/// 从[`log`]的日志等级转换
/// * 🚩`Trace`并入`Log`
impl From<log::Level> for OutputType {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => OutputType::Error,
            log::Level::Warn => OutputType::Warn,
            log::Level::Info => OutputType::Info,
            log::Level::Debug => OutputType::Debug,
            log::Level::Trace => OutputType::Log,
        }
    }
}

/// 快捷打印宏
#[macro_export]
macro_rules! println_cli {
    // 消息 | ✨可格式化
    ([$enum_type_name:ident] $($tail:tt)*) => {
        $crate::output_print::OutputType::$enum_type_name.print_line(&format!($($tail)*));
    };
}

/// 快捷打印宏/标准错误
#[macro_export]
macro_rules! eprintln_cli {
    // 消息 | ✨可格式化
    ([$enum_type_name:ident] $($tail:tt)*) => {
        $crate::output_print::OutputType::$enum_type_name.eprint_line(&format!($($tail)*));
    };
}
