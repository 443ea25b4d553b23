//! 启动配置
//! * ✨格式支持
//!   * ✅JSON
//!   * ✅HJSON
//! * 🎯用于配置表示，❗不用于命令行解析
//!
//! ## ⚙️内容
//!
//! TypeScript声明：
//!
//! ```ts
//! type LaunchConfig = {
//!     emulator?: string,      // 📄`rpcs3`
//!     frontend?: string,      // 📄`retroarch`
//!     searchRoot?: string,    // 跳过平台默认规则
//!     pattern?: string,       // 仅在`searchRoot`存在时生效
//!     extraArgs?: string[],   // 置于内容路径之前
//!     currentDir?: string,
//! }
//! ```

use crate::{LauncherSettings, DEFAULT_EMULATOR, DEFAULT_FRONTEND};
use anyhow::Result;
use nar_dev_utils::{if_return, OptionBoost, ResultBoost};
use serde::{Deserialize, Serialize};
use std::{
    ffi::OsStr,
    fs::read_to_string,
    path::{Path, PathBuf},
};

/// 可自动补全的配置文件扩展名
/// * 🚩按顺序尝试：`.hjson`优先
pub const CONFIG_EXTENSIONS: [&str; 2] = ["hjson", "json"];

/// 启动配置
/// * 📍所有字段都是**可选**的
///   * 🎯用于无损合并多个来源的配置
///   * 🚩在启动时转换为[`LauncherSettings`]，缺省项在此时补上默认值
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchConfig {
    /// 模拟器名称
    pub emulator: Option<String>,

    /// 前端名称
    /// * 🚩仅影响Unix下的默认搜索根目录
    pub frontend: Option<String>,

    /// 自定义搜索根目录
    pub search_root: Option<PathBuf>,

    /// 自定义文件名模式
    /// * 📄`rpcs3*.AppImage`
    pub pattern: Option<String>,

    /// 内容路径之前的额外参数
    /// * 📄`["--no-gui"]`
    pub extra_args: Option<Vec<String>>,

    /// 子进程工作目录
    pub current_dir: Option<PathBuf>,
}

impl LaunchConfig {
    /// 零参构造函数
    pub fn new() -> Self {
        Self::default()
    }

    /// （尝试）从(H)JSON字符串构造
    /// * 🚩使用[`deser_hjson`]兼容`json`且一并兼容`hjson`
    /// * 🔗有关`hjson`格式：<https://hjson.github.io>
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(deser_hjson::from_str(json)?)
    }

    /// 是否未配置任何项
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// 从另一个配置中并入配置
    /// * 🚩合并逻辑：`Some(..)` => `None`
    ///   * 仅当自身为`None`时，才采用另一方的值
    ///   * 📌先并入者优先
    pub fn merge_from(&mut self, other: &Self) {
        self.emulator.coalesce_clone(&other.emulator);
        self.frontend.coalesce_clone(&other.frontend);
        self.search_root.coalesce_clone(&other.search_root);
        self.pattern.coalesce_clone(&other.pattern);
        self.extra_args.coalesce_clone(&other.extra_args);
        self.current_dir.coalesce_clone(&other.current_dir);
    }
}

/// 补全默认值
impl From<LaunchConfig> for LauncherSettings {
    fn from(config: LaunchConfig) -> Self {
        Self {
            emulator: config.emulator.unwrap_or_else(|| DEFAULT_EMULATOR.into()),
            frontend: config.frontend.unwrap_or_else(|| DEFAULT_FRONTEND.into()),
            search_root: config.search_root,
            pattern: config.pattern,
            extra_args: config.extra_args.unwrap_or_default(),
            current_dir: config.current_dir,
        }
    }
}

/// 从外部文件中加载启动配置
/// * 🎯错误处理 & 错误⇒空置
/// * 🚩在遇到错误时会发出警告
/// * ⚠️若无需警告，请使用[`read_config_extern`]
pub fn load_config_extern(path: &Path) -> Option<LaunchConfig> {
    // Ok⇒Some，Err⇒警告+None
    read_config_extern(path).ok_or_run(|e| {
        // 文件读写错误
        if let Some(e) = e.downcast_ref::<std::io::Error>() {
            match e.kind() {
                std::io::ErrorKind::NotFound => {
                    log::warn!("Launch config {path:?} not found, ignored");
                }
                _ => log::warn!("Failed to read launch config {path:?}: {e}"),
            }
        }
        // 配置解析错误
        else if let Some(e) = e.downcast_ref::<deser_hjson::Error>() {
            match e {
                deser_hjson::Error::Syntax { .. } => {
                    log::warn!("Launch config {path:?} is malformed, ignored: {e}");
                }
                _ => log::warn!("Failed to parse launch config {path:?}: {e}"),
            }
        }
        // 其它
        else {
            log::warn!("Failed to load launch config {path:?}: {e}")
        }
    })
}

/// 从外部文件中读取启动配置
/// * 🎯仅涉及具体读取逻辑，不涉及错误处理
pub fn read_config_extern(path: &Path) -> Result<LaunchConfig> {
    let path = try_complete_path(path);
    let content = read_to_string(path)?;
    LaunchConfig::from_json_str(&content)
}

/// 尝试为配置路径补全扩展名
/// * 🚩已是配置扩展名（不区分大小写）⇒原样返回
/// * 🚩否则依次尝试**追加**[`CONFIG_EXTENSIONS`]，取第一个存在的文件
///   * 📄`retro-launcher` ⇒ `retro-launcher.hjson`
///   * 📄`rpcs3.launch` ⇒ `rpcs3.launch.hjson`（而非`rpcs3.hjson`）
/// * 🚩都不存在⇒原样返回，由读取时报错
pub fn try_complete_path(path: &Path) -> PathBuf {
    let is_config = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| CONFIG_EXTENSIONS.iter().any(|c| ext.eq_ignore_ascii_case(c)));
    if_return! { is_config => path.to_path_buf() }
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| append_extension(path, ext))
        .find(|completed| completed.is_file())
        .unwrap_or_else(|| path.to_path_buf())
}

/// 在路径末尾追加扩展名，保留原有的「点」
fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut path = path.as_os_str().to_os_string();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use nar_dev_utils::fail_tests;
    use std::fs;

    /// 实用测试宏
    macro_rules! test {
        { $( $data:expr => $expected:expr )* } => {
            $(
                assert_eq!(LaunchConfig::from_json_str($data).unwrap(), $expected);
            )*
        };
    }

    #[test]
    fn parse() {
        test! {
            // 平凡情况/空
            "{}" => LaunchConfig::new()
            // 完整情况
            r#"
            {
                "emulator": "rpcs3",
                "frontend": "retroarch",
                "searchRoot": "/opt/emulators",
                "pattern": "rpcs3*.AppImage",
                "extraArgs": ["--no-gui"],
                "currentDir": "/opt/emulators"
            }"# => LaunchConfig {
                emulator: Some("rpcs3".into()),
                frontend: Some("retroarch".into()),
                search_root: Some("/opt/emulators".into()),
                pattern: Some("rpcs3*.AppImage".into()),
                extra_args: Some(vec!["--no-gui".into()]),
                current_dir: Some("/opt/emulators".into()),
            }
            // HJSON：无引号、注释、无逗号
            "
            {
                # 只改名
                emulator: pcsx2
                extraArgs: [\"-batch\"]
            }" => LaunchConfig {
                emulator: Some("pcsx2".into()),
                extra_args: Some(vec!["-batch".into()]),
                ..Default::default()
            }
        }
    }

    /// 解析，失败即恐慌
    fn parse_strict(json: &str) -> LaunchConfig {
        LaunchConfig::from_json_str(json).unwrap()
    }

    fail_tests! {
        fail_wrong_type parse_strict(r#"{ "extraArgs": "--no-gui" }"#);
        fail_not_an_object parse_strict("[1, 2]");
    }

    #[test]
    fn merge_earlier_wins() {
        let mut config = LaunchConfig {
            emulator: Some("pcsx2".into()),
            ..Default::default()
        };
        config.merge_from(&LaunchConfig {
            emulator: Some("rpcs3".into()),
            pattern: Some("pcsx2*".into()),
            ..Default::default()
        });
        assert_eq!(
            config,
            LaunchConfig {
                emulator: Some("pcsx2".into()),
                pattern: Some("pcsx2*".into()),
                ..Default::default()
            }
        );
        assert!(!config.is_empty());
        assert!(LaunchConfig::new().is_empty());
    }

    #[test]
    fn into_settings() {
        let settings = LauncherSettings::from(LaunchConfig::new());
        assert_eq!(settings, LauncherSettings::default());

        let settings = LauncherSettings::from(LaunchConfig {
            emulator: Some("pcsx2".into()),
            extra_args: Some(vec!["-batch".into()]),
            ..Default::default()
        });
        assert_eq!(settings.emulator, "pcsx2");
        assert_eq!(settings.frontend, DEFAULT_FRONTEND);
        assert_eq!(settings.extra_args, vec!["-batch".to_string()]);
    }

    #[test]
    fn complete_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let keyword = dir.path().join("retro-launcher");
        // 尚无文件：原样返回
        assert_eq!(try_complete_path(&keyword), keyword);
        assert!(read_config_extern(&keyword).is_err());
        assert_eq!(load_config_extern(&keyword), None);

        fs::write(keyword.with_extension("json"), r#"{ "emulator": "json" }"#).unwrap();
        assert_eq!(try_complete_path(&keyword), keyword.with_extension("json"));

        // `.hjson`优先
        fs::write(keyword.with_extension("hjson"), "{\n  emulator: hjson\n}").unwrap();
        assert_eq!(try_complete_path(&keyword), keyword.with_extension("hjson"));
        assert_eq!(
            read_config_extern(&keyword).unwrap().emulator.as_deref(),
            Some("hjson")
        );

        // 显式给出扩展名⇒不再补全
        let explicit = keyword.with_extension("JSON");
        assert_eq!(try_complete_path(&explicit), explicit);

        // 格式错误⇒空置
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ emulator: ").unwrap();
        assert_eq!(load_config_extern(&broken), None);
    }

    #[test]
    fn complete_dotted_keyword() {
        let dir = tempfile::tempdir().unwrap();
        let keyword = dir.path().join("rpcs3.launch");
        // 不会替换`.launch`
        fs::write(dir.path().join("rpcs3.json"), r#"{ "emulator": "wrong" }"#).unwrap();
        assert_eq!(try_complete_path(&keyword), keyword);

        let completed = dir.path().join("rpcs3.launch.json");
        fs::write(&completed, r#"{ "emulator": "rpcs3" }"#).unwrap();
        assert_eq!(try_complete_path(&keyword), completed);
        assert_eq!(
            read_config_extern(&keyword).unwrap().emulator.as_deref(),
            Some("rpcs3")
        );
    }
}
