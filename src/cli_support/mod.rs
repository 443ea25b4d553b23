//! 命令行支持
//! * 🎯为命令行启动器提供「启动配置」的表示、读取与合并

nar_dev_utils::mods! {
    // 启动配置
    pub pub launch_config;
}
