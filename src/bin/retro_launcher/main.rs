//! 命令行启动器
//! * ✨在libretro前端之外「定位并启动」模拟器
//!
//! ## 命令行参数语法
//!
//! ```text
//! usage: retro-launcher [OPTIONS] <CONTENT>
//! ```
//!
//! 退出码：成功⇒`0`，失败⇒`1`

use clap::Parser;
use retro_launcher::{
    eprintln_cli, locate_and_launch, println_cli, LaunchOutcome, Launcher, LauncherSettings,
};
use std::{path::Path, process::ExitCode};

nar_dev_utils::mods! {
    // 命令行解析
    use arg_parse;
}

pub fn main() -> ExitCode {
    // 日志默认到`info`，可用`RUST_LOG`覆盖
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();
    let settings = LauncherSettings::from(load_config(&args));
    match args.dry_run {
        true => exit_code(dry_run(&settings, &args.content)),
        false => exit_code(locate_and_launch(&settings, &args.content)),
    }
}

/// 预演：解析 + 组装，只打印不启动
fn dry_run(settings: &LauncherSettings, content_path: &Path) -> LaunchOutcome {
    match Launcher::from_settings(settings).and_then(|launcher| launcher.prepare(content_path)) {
        Ok(command) => {
            println_cli!([Info] "{command}");
            LaunchOutcome::Succeeded
        }
        Err(e) => {
            eprintln_cli!([Error] "{e}");
            LaunchOutcome::Failed
        }
    }
}

fn exit_code(outcome: LaunchOutcome) -> ExitCode {
    match outcome {
        LaunchOutcome::Succeeded => ExitCode::SUCCESS,
        LaunchOutcome::Failed => ExitCode::FAILURE,
    }
}

/// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn dry_run_codes() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LauncherSettings {
            search_root: Some(dir.path().to_path_buf()),
            ..LauncherSettings::new("emu")
        };
        assert_eq!(dry_run(&settings, Path::new("game.bin")), LaunchOutcome::Failed);

        File::create(dir.path().join("emu-bin")).unwrap();
        assert_eq!(dry_run(&settings, Path::new("game.bin")), LaunchOutcome::Succeeded);
    }
}
