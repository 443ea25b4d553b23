//! 宿主日志
//! * 🎯把[`log`]门面的记录转发给宿主的打印函数（[`LogPrintfFn`]）
//! * 📌宿主未提供日志接口时，回落到标准错误（经由[`OutputType`]）
//! * ⚠️宿主的打印函数是C可变参数函数：只以`"%s\n"`为格式串，消息本身作为参数

use super::sys::{LogLevel, LogPrintfFn};
use crate::output_print::OutputType;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::{
    ffi::{c_char, CString},
    sync::Mutex,
};

/// 日志去向
#[derive(Clone, Copy)]
pub enum LogSink {
    /// 宿主提供的打印函数
    Host(LogPrintfFn),
    /// 标准错误
    Stderr,
}

/// 宿主日志器
/// * 🚩去向可在运行时切换（`retro_set_environment`可能被多次调用）
pub struct HostLogger {
    sink: Mutex<LogSink>,
    max_level: LevelFilter,
}

/// 全局唯一的日志器
static LOGGER: HostLogger = HostLogger::new(LevelFilter::Debug);

impl HostLogger {
    pub const fn new(max_level: LevelFilter) -> Self {
        Self {
            sink: Mutex::new(LogSink::Stderr),
            max_level,
        }
    }

    /// 切换去向
    pub fn set_sink(&self, sink: LogSink) {
        if let Ok(mut current) = self.sink.lock() {
            *current = sink;
        }
    }

    /// 当前去向
    /// * 🚩锁中毒时视作标准错误
    pub fn sink(&self) -> LogSink {
        self.sink.lock().map(|sink| *sink).unwrap_or(LogSink::Stderr)
    }
}

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        match self.sink() {
            LogSink::Host(printf) => {
                let message = to_c_message(&message);
                // SAFETY: 格式串固定为`%s\n`，唯一的参数是以NUL结尾的字符串
                // * 📌`libretro_sys`未声明可变参数，而宿主的`retro_log_printf_t`本为可变参数函数
                unsafe {
                    let printf: unsafe extern "C" fn(LogLevel, *const c_char, ...) =
                        std::mem::transmute(printf);
                    printf(
                        host_level(record.level()),
                        b"%s\n\0".as_ptr() as *const c_char,
                        message.as_ptr(),
                    )
                }
            }
            LogSink::Stderr => OutputType::from(record.level()).eprint_line(&message),
        }
    }

    fn flush(&self) {}
}

/// 安装全局日志器
/// * 🚩重复安装（或已有其它日志器）时仅切换去向
pub fn install(sink: LogSink) {
    LOGGER.set_sink(sink);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LOGGER.max_level);
    }
}

/// 日志等级 → 宿主日志等级
/// * 🚩`Trace`并入`Debug`
pub fn host_level(level: Level) -> LogLevel {
    match level {
        Level::Error => LogLevel::Error,
        Level::Warn => LogLevel::Warn,
        Level::Info => LogLevel::Info,
        Level::Debug | Level::Trace => LogLevel::Debug,
    }
}

/// 转换为C字符串
/// * 🚩内部的NUL替换为`U+FFFD`，避免消息被截断
pub fn to_c_message(message: &str) -> CString {
    CString::new(message.replace('\0', "\u{FFFD}")).unwrap_or_default()
}

/// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use nar_dev_utils::asserts;

    #[test]
    fn levels() {
        // 数值即`enum retro_log_level`
        asserts! {
            host_level(Level::Error) as i32 => 3,
            host_level(Level::Warn) as i32 => 2,
            host_level(Level::Info) as i32 => 1,
            host_level(Level::Debug) as i32 => 0,
            host_level(Level::Trace) as i32 => 0,
        }
    }

    #[test]
    fn c_message() {
        asserts! {
            to_c_message("rpcs3 path: \"/a b\"").to_str().unwrap() => "rpcs3 path: \"/a b\"",
            to_c_message("a\0b").to_str().unwrap() => "a\u{FFFD}b",
            // `%`不会被当作格式符：它只是参数内容
            to_c_message("100%s").to_bytes() => b"100%s",
        }
    }

    #[test]
    fn stderr_sink() {
        let logger = HostLogger::new(LevelFilter::Info);
        assert!(matches!(logger.sink(), LogSink::Stderr));
        assert!(logger.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
        // 回落输出不应恐慌
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .args(format_args!("Failed running emu."))
                .build(),
        );
    }
}
