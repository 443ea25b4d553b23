//! 文件名通配符匹配
//! * 🎯替代`glob`/`FindFirstFile`中「文件名部分」的模式匹配
//! * 📌只支持两种元字符
//!   * `*`：任意长度（含零长）的任意字符
//!   * `?`：恰好一个字符
//!   * 其它字符一律按字面匹配
//! * 🚩内部编译为[`Regex`]，整串锚定

use crate::LaunchError;
use regex::{Regex, RegexBuilder};
use std::{ffi::OsStr, fmt};

/// 文件名通配符模式
/// * 📄`rpcs3*`
/// * 📄`rpcs3*.exe`
#[derive(Clone)]
pub struct WildcardPattern {
    /// 原始模式字符串
    raw: String,
    /// 编译后的正则
    regex: Regex,
}

impl WildcardPattern {
    /// 构造（区分大小写）
    pub fn new(pattern: impl Into<String>) -> Result<Self, LaunchError> {
        Self::with_case(pattern, false)
    }

    /// 构造，可指定是否忽略ASCII大小写
    /// * 🎯Windows文件系统不区分大小写
    pub fn with_case(pattern: impl Into<String>, case_insensitive: bool) -> Result<Self, LaunchError> {
        let raw = pattern.into();
        let regex = RegexBuilder::new(&wildcard_to_regex(&raw))
            .case_insensitive(case_insensitive)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| LaunchError::InvalidPattern {
                pattern: raw.clone(),
                source,
            })?;
        Ok(Self { raw, regex })
    }

    /// 原始模式
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// 判断某个文件名是否匹配
    /// * ⚠️只比对文件名，不比对路径
    /// * 🚩非UTF-8文件名按有损转换后比对
    pub fn is_match(&self, file_name: impl AsRef<OsStr>) -> bool {
        self.regex.is_match(&file_name.as_ref().to_string_lossy())
    }
}

impl fmt::Debug for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WildcardPattern").field(&self.raw).finish()
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.regex.as_str() == other.regex.as_str()
    }
}

/// 将通配符转写为锚定的正则表达式
fn wildcard_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            _ => regex.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    regex.push('$');
    regex
}
