//! 宿主会话
//! * 🎯集中保存宿主交给核心的所有回调，以及核心自己的帧缓冲
//! * 📌核心本身不产出音视频：只在必要时提交一帧空白画面，随后请求关闭

use super::{
    logger::{self, LogSink},
    sys::{
        AudioSampleBatchFn, AudioSampleFn, EnvironmentFn, InputPollFn, InputStateFn, LogCallback,
        LogPrintfFn, VideoRefreshFn, ENVIRONMENT_GET_LOG_INTERFACE,
        ENVIRONMENT_SET_SUPPORT_NO_GAME, ENVIRONMENT_SHUTDOWN,
    },
};
use crate::{locate_and_launch, LauncherSettings};
use std::{
    ffi::{c_uint, c_void},
    mem::size_of,
    path::Path,
    ptr,
};

/// 画面宽度
pub const FRAME_WIDTH: u32 = 320;
/// 画面高度
pub const FRAME_HEIGHT: u32 = 240;
/// 帧率
pub const FRAMES_PER_SECOND: f64 = 60.0;
/// 音频采样率
pub const SAMPLE_RATE: f64 = 30000.0;

// `retro_log_callback`只有一个函数指针字段
const _: () = assert!(size_of::<LogCallback>() == size_of::<Option<LogPrintfFn>>());

/// 宿主会话
/// * 🚩所有回调均可能尚未设置：调用前逐一检查
pub struct HostSession {
    environment: Option<EnvironmentFn>,
    video_refresh: Option<VideoRefreshFn>,
    audio_sample: Option<AudioSampleFn>,
    audio_sample_batch: Option<AudioSampleBatchFn>,
    input_poll: Option<InputPollFn>,
    input_state: Option<InputStateFn>,
    /// XRGB8888
    frame_buffer: Vec<u32>,
    settings: LauncherSettings,
}

impl Default for HostSession {
    fn default() -> Self {
        Self::new(LauncherSettings::default())
    }
}

impl HostSession {
    pub fn new(settings: LauncherSettings) -> Self {
        Self {
            environment: None,
            video_refresh: None,
            audio_sample: None,
            audio_sample_batch: None,
            input_poll: None,
            input_state: None,
            frame_buffer: vec![0; (FRAME_WIDTH * FRAME_HEIGHT) as usize],
            settings,
        }
    }

    pub fn settings(&self) -> &LauncherSettings {
        &self.settings
    }

    /// 设置环境回调
    /// * 🚩声明「无需内容也可运行」
    /// * 🚩索取宿主日志接口；取不到则回落到标准错误
    pub fn set_environment(&mut self, environment: EnvironmentFn) {
        self.environment = Some(environment);

        let mut no_game = true;
        self.environment(
            ENVIRONMENT_SET_SUPPORT_NO_GAME,
            &mut no_game as *mut bool as *mut c_void,
        );

        // 宿主只往其中写入一个函数指针；以`Option`接收，宿主未填写时仍为`None`
        let mut printf: Option<LogPrintfFn> = None;
        let sink = match self.environment(
            ENVIRONMENT_GET_LOG_INTERFACE,
            &mut printf as *mut Option<LogPrintfFn> as *mut c_void,
        ) {
            true => printf.map_or(LogSink::Stderr, LogSink::Host),
            false => LogSink::Stderr,
        };
        logger::install(sink);
    }

    pub fn set_video_refresh(&mut self, callback: VideoRefreshFn) {
        self.video_refresh = Some(callback);
    }

    pub fn set_audio_sample(&mut self, callback: AudioSampleFn) {
        self.audio_sample = Some(callback);
    }

    pub fn set_audio_sample_batch(&mut self, callback: AudioSampleBatchFn) {
        self.audio_sample_batch = Some(callback);
    }

    pub fn set_input_poll(&mut self, callback: InputPollFn) {
        self.input_poll = Some(callback);
    }

    pub fn set_input_state(&mut self, callback: InputStateFn) {
        self.input_state = Some(callback);
    }

    /// 调用环境回调
    /// * 🚩未设置⇒`false`
    pub fn environment(&self, cmd: c_uint, data: *mut c_void) -> bool {
        self.shutdown_handle().environment(cmd, data)
    }

    /// 取出「请求关闭」的句柄
    /// * 🎯脱离会话（及其锁）后仍能通知宿主
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            environment: self.environment,
        }
    }

    /// 请求宿主关闭核心
    pub fn request_shutdown(&self) -> bool {
        self.shutdown_handle().request()
    }

    /// 提交一帧空白画面
    pub fn present_blank_frame(&mut self) {
        self.frame_buffer.fill(0);
        if let Some(video_refresh) = self.video_refresh {
            // SAFETY: 缓冲区恰为 宽×高 个像素，行距与宽度一致
            #[allow(unused_unsafe)]
            unsafe {
                video_refresh(
                    self.frame_buffer.as_ptr() as *const c_void,
                    FRAME_WIDTH,
                    FRAME_HEIGHT,
                    FRAME_WIDTH as usize * size_of::<u32>(),
                )
            }
        }
    }

    /// 运行一帧
    /// * 🚩轮询输入、提交空白帧，然后请求关闭
    pub fn run_frame(&mut self) {
        if let Some(input_poll) = self.input_poll {
            // SAFETY: 回调由宿主提供
            #[allow(unused_unsafe)]
            unsafe {
                input_poll()
            }
        }
        self.present_blank_frame();
        self.request_shutdown();
    }
}

/// 「请求关闭」句柄
/// * 📌只持有环境回调的副本
#[derive(Clone, Copy)]
pub struct ShutdownHandle {
    environment: Option<EnvironmentFn>,
}

impl ShutdownHandle {
    fn environment(&self, cmd: c_uint, data: *mut c_void) -> bool {
        match self.environment {
            // SAFETY: 回调由宿主提供；`data`的类型与`cmd`对应由调用方保证
            #[allow(unused_unsafe)]
            Some(environment) => unsafe { environment(cmd, data) },
            None => false,
        }
    }

    /// 请求宿主关闭核心
    /// * 🚩不关心宿主是否接受
    pub fn request(&self) -> bool {
        self.environment(ENVIRONMENT_SHUTDOWN, ptr::null_mut())
    }
}

/// 载入「游戏」：定位并启动模拟器
/// * 🚩阻塞至模拟器退出
/// * 🚩无论成败，都请求宿主关闭核心
/// * 📌只接收设置与句柄，不接触会话：阻塞期间宿主可重入任何导出函数
pub fn load_game(
    settings: &LauncherSettings,
    shutdown: ShutdownHandle,
    content_path: &Path,
) -> bool {
    log::info!("Content path: {}", content_path.display());
    let outcome = locate_and_launch(settings, content_path);
    shutdown.request();
    outcome.is_succeeded()
}

/// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    thread_local! {
        /// 本线程收到的环境命令
        static COMMANDS: RefCell<Vec<c_uint>> = const { RefCell::new(vec![]) };
        /// 本线程收到的画面尺寸
        static FRAMES: RefCell<Vec<(c_uint, c_uint, usize)>> = const { RefCell::new(vec![]) };
    }

    extern "C" fn fake_environment(cmd: c_uint, _data: *mut c_void) -> bool {
        COMMANDS.with(|commands| commands.borrow_mut().push(cmd));
        // 不提供日志接口
        cmd != ENVIRONMENT_GET_LOG_INTERFACE
    }

    extern "C" fn fake_video_refresh(
        _data: *const c_void,
        width: c_uint,
        height: c_uint,
        pitch: usize,
    ) {
        FRAMES.with(|frames| frames.borrow_mut().push((width, height, pitch)));
    }

    fn recorded_commands() -> Vec<c_uint> {
        COMMANDS.with(|commands| commands.take())
    }

    /// 以自定义根目录建立会话，并接上假的环境回调
    fn session_in(root: &Path) -> HostSession {
        let mut session = HostSession::new(LauncherSettings {
            search_root: Some(root.to_path_buf()),
            ..LauncherSettings::new("emu")
        });
        session.set_environment(fake_environment);
        recorded_commands();
        session
    }

    #[test]
    fn environment_handshake() {
        let mut session = HostSession::default();
        assert!(!session.request_shutdown());

        session.set_environment(fake_environment);
        assert_eq!(
            recorded_commands(),
            vec![
                ENVIRONMENT_SET_SUPPORT_NO_GAME,
                ENVIRONMENT_GET_LOG_INTERFACE
            ]
        );
    }

    #[test]
    fn run_frame_presents_and_shuts_down() {
        let mut session = HostSession::default();
        session.set_environment(fake_environment);
        session.set_video_refresh(fake_video_refresh);
        recorded_commands();

        session.run_frame();

        assert_eq!(
            FRAMES.with(|frames| frames.take()),
            vec![(FRAME_WIDTH, FRAME_HEIGHT, FRAME_WIDTH as usize * 4)]
        );
        assert_eq!(recorded_commands(), vec![ENVIRONMENT_SHUTDOWN]);
    }

    #[test]
    fn failed_load_still_requests_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());

        assert!(!load_game(
            session.settings(),
            session.shutdown_handle(),
            Path::new("/roms/game/EBOOT.BIN")
        ));
        assert_eq!(recorded_commands(), vec![ENVIRONMENT_SHUTDOWN]);
    }

    #[cfg(unix)]
    #[test]
    fn successful_load_requests_shutdown() {
        use crate::{
            process_io::{compose, SystemInvoker},
            tests::{invoke_retrying, write_script},
        };

        let dir = tempfile::tempdir().unwrap();
        let exe = write_script(dir.path(), "emu-ok", "exit 0");
        // 先确认脚本可执行（避开刚写完时的「文件忙」）
        invoke_retrying(&mut SystemInvoker, &compose(&exe, "/roms/warmup.bin")).unwrap();
        let session = session_in(dir.path());

        assert!(load_game(
            session.settings(),
            session.shutdown_handle(),
            Path::new("/roms/game/EBOOT.BIN")
        ));
        assert_eq!(recorded_commands(), vec![ENVIRONMENT_SHUTDOWN]);
    }
}
