//! egui 主界面：表盘绘制、钉住/关闭顶栏

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;

use crate::clock::ClockState;
use crate::face::{self, palette, DrawCmd, FaceScene, Glow, Point, Rgba, StrokeWidth, Viewport};
use crate::settings::Settings;

/// 桌面右上角边距（逻辑像素）
const PIN_MARGIN: f32 = 16.0;

/// 拿不到显示器信息时移动窗口的重试次数与间隔
const PIN_MAX_ATTEMPTS: u32 = 10;
const PIN_RETRY_DELAY: Duration = Duration::from_millis(200);

/// 外发光叠加层数
const GLOW_LAYERS: u32 = 24;

/// 候选的 CJK 字体（顶栏提示文字用）
#[cfg(windows)]
const SYSTEM_FONT_PATHS: &[&str] = &[
    r"C:\Windows\Fonts\msyh.ttc",
    r"C:\Windows\Fonts\simhei.ttf",
    r"C:\Windows\Fonts\simsun.ttc",
];

#[cfg(not(windows))]
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/PingFang.ttc",
];

/// 安装中文后备字体；CLOK_FONT_PATH 优先，找不到就用内置字体
fn setup_cjk_fonts(ctx: &egui::Context) {
    let candidates = std::env::var("CLOK_FONT_PATH")
        .ok()
        .into_iter()
        .chain(SYSTEM_FONT_PATHS.iter().map(|p| (*p).to_owned()));

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else { continue };
        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("cjk".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts.families.entry(family).or_default().push("cjk".to_owned());
        }
        ctx.set_fonts(fonts);
        log::debug!("using font {}", path);
        return;
    }
    log::debug!("no CJK font found, using built-in fonts");
}

fn to_color(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn to_pos(origin: egui::Pos2, p: Point) -> egui::Pos2 {
    origin + egui::vec2(p.x, p.y)
}

/// 线宽换算；hairline 画成一个物理像素
fn stroke_width(width: StrokeWidth, pixels_per_point: f32) -> f32 {
    match width {
        StrokeWidth::Hairline => 1.0 / pixels_per_point,
        StrokeWidth::Fixed(w) => w,
    }
}

/// egui 没有模糊阴影，用一圈圈半透明同心圆近似
fn paint_glow(painter: &egui::Painter, center: egui::Pos2, radius: f32, glow: Glow) {
    for i in (1..=GLOW_LAYERS).rev() {
        let t = i as f32 / GLOW_LAYERS as f32;
        let alpha = glow.color.a as f32 * (1.0 - t) * (1.0 - t) / GLOW_LAYERS as f32 * 2.0;
        let color = Rgba { a: alpha.round() as u8, ..glow.color };
        painter.circle_filled(center, radius + glow.spread * t, to_color(color));
    }
}

/// 把表盘指令画到 `origin` 为左上角的区域
fn paint_scene(painter: &egui::Painter, origin: egui::Pos2, scene: &FaceScene, pixels_per_point: f32) {
    for cmd in scene.commands() {
        match cmd {
            DrawCmd::Disc(disc) => {
                let center = to_pos(origin, disc.center);
                if let Some(glow) = disc.glow {
                    paint_glow(painter, center, disc.radius, glow);
                }
                painter.circle_filled(center, disc.radius, to_color(disc.color));
            }
            DrawCmd::Line(line) => {
                painter.line_segment(
                    [to_pos(origin, line.start), to_pos(origin, line.end)],
                    egui::Stroke::new(stroke_width(line.width, pixels_per_point), to_color(line.color)),
                );
            }
        }
    }
}

/// 窗口钉在显示器右上角时的位置
fn top_right(monitor: egui::Vec2, window: egui::Vec2) -> Option<egui::Pos2> {
    if 1.0 < monitor.x && 1.0 < monitor.y {
        Some(egui::pos2(monitor.x - window.x - PIN_MARGIN, PIN_MARGIN))
    } else {
        None
    }
}

/// 窗口当前应钉到的位置；平台不报窗口/显示器尺寸时为 None（如 Wayland）
fn pin_position(ctx: &egui::Context) -> Option<egui::Pos2> {
    ctx.input(|i| {
        let outer = i.viewport().outer_rect?;
        top_right(i.viewport().monitor_size?, outer.size())
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PinAction {
    Move(egui::Pos2),
    Retry,
    GiveUp,
    Idle,
}

/// 钉住后的定位进度：置顶只发一次，移动最多重试 PIN_MAX_ATTEMPTS 帧
#[derive(Clone, Copy, Debug, Default)]
struct PinPlacement {
    level_sent: bool,
    attempts: u32,
    done: bool,
}

impl PinPlacement {
    fn step(&mut self, pos: Option<egui::Pos2>) -> PinAction {
        if self.done {
            return PinAction::Idle;
        }
        match pos {
            Some(pos) => {
                self.done = true;
                PinAction::Move(pos)
            }
            None => {
                self.attempts += 1;
                if self.attempts >= PIN_MAX_ATTEMPTS {
                    self.done = true;
                    PinAction::GiveUp
                } else {
                    PinAction::Retry
                }
            }
        }
    }
}

fn apply_pin(ctx: &egui::Context, pin: &mut PinPlacement) {
    use egui::viewport::{ViewportCommand, WindowLevel};
    if !pin.level_sent {
        ctx.send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::AlwaysOnTop));
        pin.level_sent = true;
    }
    match pin.step(pin_position(ctx)) {
        PinAction::Move(pos) => ctx.send_viewport_cmd(ViewportCommand::OuterPosition(pos)),
        PinAction::Retry => ctx.request_repaint_after(PIN_RETRY_DELAY),
        PinAction::GiveUp => log::debug!("no monitor info after {} tries, window stays put", pin.attempts),
        PinAction::Idle => {}
    }
}

fn apply_unpin(ctx: &egui::Context) {
    use egui::viewport::{ViewportCommand, WindowLevel};
    ctx.send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::Normal));
}

pub struct ClokApp {
    clock: ClockState,
    settings: Settings,
    settings_path: PathBuf,
    pin: PinPlacement,
}

impl ClokApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        clock: ClockState,
        settings: Settings,
        settings_path: PathBuf,
    ) -> Self {
        setup_cjk_fonts(&cc.egui_ctx);
        Self {
            clock,
            settings,
            settings_path,
            pin: PinPlacement::default(),
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            log::warn!("failed to save {}: {}", self.settings_path.display(), e);
        }
    }

    fn set_pinned(&mut self, ctx: &egui::Context, pinned: bool) {
        log::info!("pinned: {}", pinned);
        self.settings.pinned = pinned;
        self.pin = PinPlacement::default();
        if !pinned {
            apply_unpin(ctx);
        }
        self.save_settings();
    }

    /// 关闭前记下窗口尺寸
    fn close(&mut self, ctx: &egui::Context) {
        if let Some(inner) = ctx.input(|i| i.viewport().inner_rect) {
            self.settings.window_width = inner.width();
            self.settings.window_height = inner.height();
        }
        self.save_settings();
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    /// 顶栏：钉子（左）+ 关闭（右）
    fn top_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let hint = if self.settings.pinned {
                "取消钉住"
            } else {
                "钉到桌面右上角并置顶"
            };
            if ui
                .add(egui::Button::new("📌").frame(false).selected(self.settings.pinned))
                .on_hover_text(hint)
                .clicked()
            {
                self.set_pinned(ctx, !self.settings.pinned);
            }
            ui.add_space(ui.available_width() - 40.0);
            if ui
                .add(egui::Button::new("×").frame(false))
                .on_hover_text("关闭")
                .clicked()
            {
                self.close(ctx);
            }
        });
    }

    fn ui_clock(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(to_color(palette::BACKGROUND)))
            .show(ctx, |ui| {
                let rect = ui.max_rect();

                // 无系统标题栏，按住表盘拖动窗口
                let response = ui.interact(rect, ui.id().with("face"), egui::Sense::drag());
                if response.drag_started() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }

                let viewport = Viewport::new(rect.width(), rect.height());
                let scene = face::render_face(&self.clock.time, viewport);
                paint_scene(&ui.painter_at(rect), rect.min, &scene, ctx.pixels_per_point());

                self.top_bar(ui, ctx);
            });
    }
}

impl eframe::App for ClokApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.clock.tick(now);
        // 不阻塞：让事件循环在下一秒到点时再叫我们
        ctx.request_repaint_after(self.clock.until_next_tick(now));

        if self.settings.pinned {
            apply_pin(ctx, &mut self.pin);
        }

        self.ui_clock(ctx);
    }
}
