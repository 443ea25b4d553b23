//! 命令行（参数 & 配置）解析支持
//! * 🚩与「启动配置」本身相关的逻辑位于[`retro_launcher::cli_support`]

use clap::Parser;
use retro_launcher::cli_support::{load_config_extern, read_config_extern, LaunchConfig};
use std::{
    env::{current_dir, current_exe},
    path::PathBuf,
};

/// 基于[`clap`]的命令行参数数据
#[derive(Parser)]
#[command(name = "retro-launcher")]
#[command(about = "Locate an emulator executable and launch content with it", long_about = None)]
#[command(version, about, long_about = None)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    // 配置文件路径
    // * ✨可支持加载多个配置
    //   * ⚠️需要重复使用`-c`
    //   * ✅以使用顺序载入，先载入者优先
    // ! 📝此处的文档字符串会被用作`-h`的说明
    /// Launch configuration file in (H)JSON (multiple supported by calling it multiple times)
    #[arg(short, long, value_name = "FILE")]
    pub config: Vec<PathBuf>,

    /// Disable the default configuration file in the working directory or next to the executable
    #[arg(short, long)]
    pub disable_default: bool,

    /// Emulator name, overriding any configuration
    #[arg(short, long, value_name = "NAME")]
    pub emulator: Option<String>,

    /// Search root for the emulator executable, overriding configuration and platform default
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Resolve and print the command without launching it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Content to launch
    #[arg(value_name = "CONTENT")]
    pub content: PathBuf,
}

/// 默认的「启动配置」关键词
/// * 🎯在「自动追加扩展名」的机制下，可以进行自动补全
///   * 多词需使用`-`而非`.`：后者会被识别为扩展名，导致无法自动补全
pub const DEFAULT_CONFIG_KEYWORD: &str = "retro-launcher";

/// 获取「默认启动配置」文件
/// * 🎯工作目录下 | exe同目录下
///   * `retro-launcher.(h)json`
pub fn try_load_default_config() -> Option<LaunchConfig> {
    // 检查一个目录
    #[inline(always)]
    fn in_one_root(root: PathBuf) -> Option<LaunchConfig> {
        let path = match root.is_dir() {
            true => root.join(DEFAULT_CONFIG_KEYWORD),
            false => root.with_file_name(DEFAULT_CONFIG_KEYWORD),
        };
        // 静默失败
        read_config_extern(&path).ok()
    }
    [current_dir(), current_exe()]
        .into_iter()
        .flatten()
        .filter_map(in_one_root)
        .next()
}

/// 加载配置
/// * 🚩优先级从高到低
///   * 命令行参数中的直接覆盖（`--emulator`、`--root`）
///   * 命令行参数中指定的配置文件（按出现顺序）
///   * 默认配置文件
pub fn load_config(args: &CliArgs) -> LaunchConfig {
    let mut result = LaunchConfig {
        emulator: args.emulator.clone(),
        search_root: args.root.clone(),
        ..LaunchConfig::new()
    };
    // 对错误采取「警告并抛掉」的策略
    args.config
        .iter()
        .map(PathBuf::as_ref)
        .filter_map(load_config_extern)
        .for_each(|config| result.merge_from(&config));
    if !args.disable_default {
        if let Some(config) = try_load_default_config() {
            result.merge_from(&config);
        }
    }
    // 展示加载的配置 | 以便调试
    match serde_json::to_string(&result) {
        Ok(json) => log::debug!("Launch config: {json}"),
        Err(e) => log::warn!("Failed to display launch config: {e}"),
    }
    result
}
