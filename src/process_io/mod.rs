//! 用于封装「外部进程」的组装与调用
//! * 📌组装：可执行文件 + 内容路径 ⇒ 参数数组（不经shell）
//! * 📌调用：同步启动，阻塞至退出，退出码映射为成功/失败

nar_dev_utils::mods! {
    // 命令组装
    pub pub command;
    // 进程调用
    pub pub invoker;
}
