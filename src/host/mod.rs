//! libretro宿主适配层
//! * 🎯把「定位并启动」接入libretro前端：`retro_load_game` ⇒ 启动模拟器 ⇒ 请求关闭
//! * 📌ABI类型与常量来自[`libretro_sys`]

pub use libretro_sys as sys;

nar_dev_utils::mods! {
    // 日志转发
    pub pub logger;

    // 宿主会话
    pub pub session;

    // 导出函数
    pub libretro;
}
