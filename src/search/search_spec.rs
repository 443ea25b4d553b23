//! 搜索规格与候选项
//! * 📌「搜索规格」= 根目录 + 文件名通配符
//! * 📌「候选项」= 根目录下文件名匹配的条目（可能是文件夹，需要后续剔除）

use super::WildcardPattern;
use std::{fs, io, path::PathBuf};

/// 搜索规格
/// * 🚩每个平台只选出一个
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpec {
    /// 根目录
    pub root: PathBuf,
    /// 文件名模式
    pub pattern: WildcardPattern,
}

impl SearchSpec {
    pub fn new(root: impl Into<PathBuf>, pattern: WildcardPattern) -> Self {
        Self {
            root: root.into(),
            pattern,
        }
    }

    /// 用于日志展示的「完整模式」
    /// * 📄`/home/user/.config/retroarch/system/rpcs3/rpcs3*`
    pub fn display_pattern(&self) -> PathBuf {
        self.root.join(self.pattern.as_str())
    }
}

/// 候选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 完整路径
    pub path: PathBuf,
    /// 是否可作为可执行文件
    /// * 🚩`stat`成功且不是目录
    ///   * 📌跟随符号链接：指向文件的链接可用，断开的链接不可用
    pub is_file: bool,
}

impl Candidate {
    /// 从路径构造，查询文件系统判断类型
    pub fn from_path(path: PathBuf) -> Self {
        let is_file = fs::metadata(&path).is_ok_and(|meta| !meta.is_dir());
        Self { path, is_file }
    }

    /// 直接构造
    /// * 🎯测试中「固定枚举顺序」用
    pub fn new(path: impl Into<PathBuf>, is_file: bool) -> Self {
        Self {
            path: path.into(),
            is_file,
        }
    }
}

/// 扫描根目录，列出所有文件名匹配的条目
/// * 🚩不递归：只看根目录直接包含的条目
/// * 🚩顺序即[`fs::read_dir`]的顺序（不保证有序）
/// * ⚠️单个条目读取失败⇒跳过；根目录本身读取失败⇒报错
pub fn scan_candidates(spec: &SearchSpec) -> io::Result<Vec<Candidate>> {
    let entries = fs::read_dir(&spec.root)?;
    let candidates = entries
        .filter_map(Result::ok)
        .filter(|entry| spec.pattern.is_match(entry.file_name()))
        .map(|entry| Candidate::from_path(entry.path()))
        .collect();
    Ok(candidates)
}
