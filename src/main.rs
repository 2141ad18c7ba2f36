//! Clok: 模拟指针时钟（Rust + egui）

mod app;
mod clock;
mod face;
mod logging;
mod settings;

use std::time::Instant;

use clock::{ClockState, ClockTime, FixedTimeSource, SystemTimeSource};
use settings::Settings;

fn main() -> eframe::Result<()> {
    let settings_path = settings::settings_path();
    let loaded = Settings::load(&settings_path);
    let settings = loaded.as_ref().cloned().unwrap_or_default();

    logging::init(settings.log_filter.as_deref());
    if let Err(e) = &loaded {
        log::warn!("failed to load {}: {}, using defaults", settings_path.display(), e);
    }

    // 只在启动时读一次时间，之后靠每秒推进；CLOK_PREVIEW 固定从预览时刻开始
    let clock = if std::env::var_os("CLOK_PREVIEW").is_some() {
        ClockState::from_source(&FixedTimeSource(ClockTime::PREVIEW), Instant::now())
    } else {
        ClockState::from_source(&SystemTimeSource, Instant::now())
    };
    log::info!("starting at {}", clock.time.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_title("Clok")
            .with_decorations(false) // 无系统标题栏，仅保留自定义顶栏
            .with_icon(egui::IconData::default()),
        ..Default::default()
    };
    eframe::run_native(
        "Clok",
        options,
        Box::new(move |cc| Ok(Box::new(app::ClokApp::new(cc, clock, settings, settings_path)))),
    )
}
