//! libretro导出函数
//! * 🎯让本crate编译出的动态库可直接作为libretro核心被宿主加载
//! * 📌所有状态收拢于单个[`HostSession`]中
//!   * 🚩`retro_set_environment`先于`retro_init`调用⇒会话按需创建
//! * ⚠️存档、作弊、内存映射等接口均为空实现

use super::{
    session::{self, HostSession, FRAMES_PER_SECOND, FRAME_HEIGHT, FRAME_WIDTH, SAMPLE_RATE},
    sys::{
        AudioSampleBatchFn, AudioSampleFn, EnvironmentFn, GameGeometry, GameInfo, InputPollFn,
        InputStateFn, Region, SystemAvInfo, SystemInfo, SystemTiming, VideoRefreshFn, API_VERSION,
    },
};
use crate::LauncherSettings;
use std::{
    ffi::{c_char, c_uint, c_void, CStr, CString},
    path::PathBuf,
    ptr,
    sync::{Mutex, OnceLock, PoisonError},
};

/// NTSC区域（`libretro_sys`仅以枚举提供）
const REGION_NTSC: c_uint = Region::NTSC as c_uint;

/// 唯一会话
static SESSION: Mutex<Option<HostSession>> = Mutex::new(None);

/// 可加载的内容
/// * 📄PS3游戏目录下的`EBOOT.BIN`
pub const VALID_EXTENSIONS: &str = "EBOOT.BIN";

/// 在会话中执行操作
/// * 🚩会话不存在⇒以默认设置创建
/// * 🚩锁中毒⇒沿用其中数据
fn with_session<T>(f: impl FnOnce(&mut HostSession) -> T) -> T {
    let mut session = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    f(session.get_or_insert_with(HostSession::default))
}

/// 系统信息的字符串
/// * ⚠️宿主要求这些指针长期有效⇒只构造一次
struct SystemInfoStrings {
    library_name: CString,
    library_version: CString,
    valid_extensions: CString,
}

impl SystemInfoStrings {
    fn new(settings: &LauncherSettings) -> Self {
        Self {
            library_name: to_c_string(format!("{} Launcher", settings.emulator)),
            library_version: to_c_string(env!("CARGO_PKG_VERSION")),
            valid_extensions: to_c_string(VALID_EXTENSIONS),
        }
    }

    fn get() -> &'static Self {
        static STRINGS: OnceLock<SystemInfoStrings> = OnceLock::new();
        STRINGS.get_or_init(|| Self::new(&LauncherSettings::default()))
    }
}

fn to_c_string(s: impl Into<Vec<u8>>) -> CString {
    CString::new(s).unwrap_or_default()
}

/// 从宿主给出的C字符串得到路径
/// * 🚩空指针⇒[`None`]
unsafe fn c_path(path: *const c_char) -> Option<PathBuf> {
    if path.is_null() {
        return None;
    }
    let bytes = CStr::from_ptr(path).to_bytes();
    #[cfg(unix)]
    {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};
        Some(PathBuf::from(OsStr::from_bytes(bytes)))
    }
    #[cfg(not(unix))]
    {
        Some(PathBuf::from(String::from_utf8_lossy(bytes).into_owned()))
    }
}

#[no_mangle]
pub extern "C" fn retro_api_version() -> c_uint {
    API_VERSION
}

#[no_mangle]
pub extern "C" fn retro_init() {
    let emulator = with_session(|session| session.settings().emulator.clone());
    log::debug!("{emulator} launcher core initialized");
}

#[no_mangle]
pub extern "C" fn retro_deinit() {
    let mut session = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    *session = None;
}

/// # Safety
/// `info`须为空指针或指向可写的[`SystemInfo`]
#[no_mangle]
pub unsafe extern "C" fn retro_get_system_info(info: *mut SystemInfo) {
    let Some(info) = info.as_mut() else {
        return;
    };
    let strings = SystemInfoStrings::get();
    info.library_name = strings.library_name.as_ptr();
    info.library_version = strings.library_version.as_ptr();
    info.valid_extensions = strings.valid_extensions.as_ptr();
    info.need_fullpath = true;
    info.block_extract = false;
}

/// # Safety
/// `info`须为空指针或指向可写的[`SystemAvInfo`]
#[no_mangle]
pub unsafe extern "C" fn retro_get_system_av_info(info: *mut SystemAvInfo) {
    let Some(info) = info.as_mut() else {
        return;
    };
    info.geometry = GameGeometry {
        base_width: FRAME_WIDTH,
        base_height: FRAME_HEIGHT,
        max_width: FRAME_WIDTH,
        max_height: FRAME_HEIGHT,
        aspect_ratio: 4.0 / 3.0,
    };
    info.timing = SystemTiming {
        fps: FRAMES_PER_SECOND,
        sample_rate: SAMPLE_RATE,
    };
}

#[no_mangle]
pub extern "C" fn retro_set_environment(environment: Option<EnvironmentFn>) {
    if let Some(environment) = environment {
        with_session(|session| session.set_environment(environment));
    }
}

#[no_mangle]
pub extern "C" fn retro_set_video_refresh(callback: Option<VideoRefreshFn>) {
    if let Some(callback) = callback {
        with_session(|session| session.set_video_refresh(callback));
    }
}

#[no_mangle]
pub extern "C" fn retro_set_audio_sample(callback: Option<AudioSampleFn>) {
    if let Some(callback) = callback {
        with_session(|session| session.set_audio_sample(callback));
    }
}

#[no_mangle]
pub extern "C" fn retro_set_audio_sample_batch(callback: Option<AudioSampleBatchFn>) {
    if let Some(callback) = callback {
        with_session(|session| session.set_audio_sample_batch(callback));
    }
}

#[no_mangle]
pub extern "C" fn retro_set_input_poll(callback: Option<InputPollFn>) {
    if let Some(callback) = callback {
        with_session(|session| session.set_input_poll(callback));
    }
}

#[no_mangle]
pub extern "C" fn retro_set_input_state(callback: Option<InputStateFn>) {
    if let Some(callback) = callback {
        with_session(|session| session.set_input_state(callback));
    }
}

#[no_mangle]
pub extern "C" fn retro_set_controller_port_device(port: c_uint, device: c_uint) {
    log::info!("Plugging device {device} into port {port}.");
}

#[no_mangle]
pub extern "C" fn retro_reset() {}

#[no_mangle]
pub extern "C" fn retro_run() {
    with_session(HostSession::run_frame);
}

/// 定位并启动模拟器
/// * 🚩阻塞至模拟器退出，随后请求宿主关闭核心
/// * 🚩启动前即释放会话锁：模拟器运行期间宿主仍可调用其它导出函数
///
/// # Safety
/// `game`须为空指针或指向有效的[`GameInfo`]
#[no_mangle]
pub unsafe extern "C" fn retro_load_game(game: *const GameInfo) -> bool {
    let Some(content_path) = game.as_ref().and_then(|game| c_path(game.path)) else {
        log::error!("No content path given");
        return false;
    };
    let (settings, shutdown) =
        with_session(|session| (session.settings().clone(), session.shutdown_handle()));
    session::load_game(&settings, shutdown, &content_path)
}

/// # Safety
/// `info`须为空指针或指向至少`num_info`个有效的[`GameInfo`]
#[no_mangle]
pub unsafe extern "C" fn retro_load_game_special(
    _game_type: c_uint,
    info: *const GameInfo,
    num_info: usize,
) -> bool {
    match num_info {
        0 => false,
        _ => retro_load_game(info),
    }
}

#[no_mangle]
pub extern "C" fn retro_unload_game() {}

#[no_mangle]
pub extern "C" fn retro_get_region() -> c_uint {
    REGION_NTSC
}

#[no_mangle]
pub extern "C" fn retro_serialize_size() -> usize {
    0
}

#[no_mangle]
pub extern "C" fn retro_serialize(_data: *mut c_void, _size: usize) -> bool {
    true
}

#[no_mangle]
pub extern "C" fn retro_unserialize(_data: *const c_void, _size: usize) -> bool {
    true
}

#[no_mangle]
pub extern "C" fn retro_get_memory_data(_id: c_uint) -> *mut c_void {
    ptr::null_mut()
}

#[no_mangle]
pub extern "C" fn retro_get_memory_size(_id: c_uint) -> usize {
    0
}

#[no_mangle]
pub extern "C" fn retro_cheat_reset() {}

#[no_mangle]
pub extern "C" fn retro_cheat_set(_index: c_uint, _enabled: bool, _code: *const c_char) {}
