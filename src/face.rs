//! 表盘几何：把时刻和画布尺寸换算成绘制指令

use std::f64::consts::PI;

use crate::clock::ClockTime;

/// 表盘颜色（不可配置）
pub mod palette {
    use super::Rgba;

    /// 整屏背景
    pub const BACKGROUND: Rgba = Rgba::from_argb(0xFF11192E);
    /// 表盘底色
    pub const FACE: Rgba = Rgba::from_argb(0xFF040E25);
    /// 表盘外发光
    pub const GLOW: Rgba = Rgba::new(255, 255, 255, 90);
    /// 刻度
    pub const TICK: Rgba = Rgba::from_argb(0xFF888888);
    pub const HOUR_HAND: Rgba = Rgba::from_argb(0xFFF454FF);
    pub const MINUTE_HAND: Rgba = Rgba::from_argb(0xFFF454FF);
    pub const SECOND_HAND: Rgba = Rgba::from_argb(0xFF05D9E8);
}

/// 外发光扩散半径
pub const GLOW_SPREAD: f32 = 150.0;

/// 刻度数：0°..=360° 每 6° 一根，0° 与 360° 重合处画两次
pub const TICK_COUNT: usize = 61;
const TICK_STEP_DEG: usize = 6;
const MAJOR_TICK_LEN: f32 = 60.0;
const MINOR_TICK_LEN: f32 = 40.0;
const MAJOR_TICK_WIDTH: f32 = 1.0;

const HOUR_HAND_LEN: f32 = 100.0;
const MINUTE_HAND_LEN: f32 = 180.0;
const SECOND_HAND_LEN: f32 = 200.0;
const HAND_WIDTH: f32 = 3.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 非预乘 RGBA
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 0xAARRGGBB
    pub const fn from_argb(argb: u32) -> Self {
        Self::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8, (argb >> 24) as u8)
    }
}

/// 画布尺寸（逻辑像素）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// 表盘半径只跟宽度走
    pub fn radius(&self) -> f32 {
        self.width / 2.0 * 2.0 / 3.0
    }
}

/// 线宽：固定宽度，或渲染端能画出的最细线
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeWidth {
    Hairline,
    Fixed(f32),
}

/// 柔和外发光（装饰用，渲染端不支持可以不画）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub spread: f32,
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disc {
    pub center: Point,
    pub radius: f32,
    pub color: Rgba,
    pub glow: Option<Glow>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub color: Rgba,
    pub width: StrokeWidth,
}

/// 与渲染端无关的绘制指令
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCmd {
    Disc(Disc),
    Line(Line),
}

/// 一帧表盘：底盘、刻度、三根指针
#[derive(Clone, Debug, PartialEq)]
pub struct FaceScene {
    pub face: Disc,
    pub ticks: Vec<Line>,
    pub hour_hand: Line,
    pub minute_hand: Line,
    pub second_hand: Line,
}

impl FaceScene {
    /// 按绘制顺序展开：底盘 → 刻度 → 时针 → 分针 → 秒针
    pub fn commands(&self) -> impl Iterator<Item = DrawCmd> + '_ {
        std::iter::once(DrawCmd::Disc(self.face))
            .chain(self.ticks.iter().copied().map(DrawCmd::Line))
            .chain(
                [self.hour_hand, self.minute_hand, self.second_hand]
                    .into_iter()
                    .map(DrawCmd::Line),
            )
    }
}

fn radians(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

/// 从 `origin` 沿 `angle` 方向走 `len` 的点
fn polar(origin: Point, len: f32, angle: f64) -> Point {
    Point::new(
        origin.x + len * angle.cos() as f32,
        origin.y + len * angle.sin() as f32,
    )
}

fn tick(center: Point, radius: f32, deg: usize) -> Line {
    let (len, width) = if deg % 30 == 0 {
        (MAJOR_TICK_LEN, StrokeWidth::Fixed(MAJOR_TICK_WIDTH))
    } else {
        (MINOR_TICK_LEN, StrokeWidth::Hairline)
    };
    let angle = radians(deg as f64);
    Line {
        start: polar(center, radius, angle),
        end: polar(center, radius - len, angle),
        color: palette::TICK,
        width,
    }
}

fn hand(center: Point, len: f32, deg: f64, color: Rgba) -> Line {
    Line {
        start: center,
        end: polar(center, len, radians(deg)),
        color,
        width: StrokeWidth::Fixed(HAND_WIDTH),
    }
}

/// 时针角度（度）；减 90° 把零点从 3 点钟方向转到 12 点
pub fn hour_degrees(time: &ClockTime) -> f64 {
    time.hour as f64 * 30.0 - 90.0
}

pub fn minute_degrees(time: &ClockTime) -> f64 {
    time.minute as f64 * 6.0 - 90.0
}

pub fn second_degrees(time: &ClockTime) -> f64 {
    time.second as f64 * 6.0 - 90.0
}

/// 纯函数：时刻 + 画布 → 表盘绘制指令
pub fn render_face(time: &ClockTime, viewport: Viewport) -> FaceScene {
    let center = viewport.center();
    let radius = viewport.radius();

    let face = Disc {
        center,
        radius,
        color: palette::FACE,
        glow: Some(Glow {
            spread: GLOW_SPREAD,
            color: palette::GLOW,
        }),
    };

    // 0..=360 含两端，0° 处的刻度画两次
    let ticks: Vec<Line> = (0..=360)
        .step_by(TICK_STEP_DEG)
        .map(|deg| tick(center, radius, deg))
        .collect();
    debug_assert_eq!(ticks.len(), TICK_COUNT);

    FaceScene {
        face,
        ticks,
        hour_hand: hand(center, HOUR_HAND_LEN, hour_degrees(time), palette::HOUR_HAND),
        minute_hand: hand(center, MINUTE_HAND_LEN, minute_degrees(time), palette::MINUTE_HAND),
        second_hand: hand(center, SECOND_HAND_LEN, second_degrees(time), palette::SECOND_HAND),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn assert_point(actual: Point, x: f32, y: f32) {
        assert!(
            (actual.x - x).abs() < EPS && (actual.y - y).abs() < EPS,
            "expected ({x}, {y}), got ({}, {})",
            actual.x,
            actual.y
        );
    }

    const SQUARE: Viewport = Viewport::new(300.0, 300.0);

    #[test]
    fn center_and_radius_follow_width() {
        assert_point(SQUARE.center(), 150.0, 150.0);
        assert!((SQUARE.radius() - 100.0).abs() < EPS);

        let tall = Viewport::new(300.0, 900.0);
        assert_point(tall.center(), 150.0, 450.0);
        assert!((tall.radius() - 100.0).abs() < EPS);
    }

    #[test]
    fn midnight_hands_point_up() {
        let scene = render_face(&ClockTime::new(0, 0, 0), SQUARE);
        for hand in [scene.hour_hand, scene.minute_hand, scene.second_hand] {
            assert_point(hand.start, 150.0, 150.0);
        }
        assert_point(scene.hour_hand.end, 150.0, 50.0);
        // 分针、秒针比半径长，会伸出表盘
        assert_point(scene.minute_hand.end, 150.0, -30.0);
        assert_point(scene.second_hand.end, 150.0, -50.0);
    }

    #[test]
    fn three_oclock_points_right() {
        let scene = render_face(&ClockTime::new(3, 0, 0), SQUARE);
        assert_point(scene.hour_hand.end, 250.0, 150.0);
    }

    #[test]
    fn preview_hands() {
        let scene = render_face(&ClockTime::PREVIEW, SQUARE);
        // 43 分 → 168°，25 秒 → 60°
        let m = radians(168.0);
        assert_point(
            scene.minute_hand.end,
            150.0 + 180.0 * m.cos() as f32,
            150.0 + 180.0 * m.sin() as f32,
        );
        let s = radians(60.0);
        assert_point(
            scene.second_hand.end,
            150.0 + 200.0 * s.cos() as f32,
            150.0 + 200.0 * s.sin() as f32,
        );
    }

    #[test]
    fn sixty_one_ticks_with_doubled_seam() {
        let scene = render_face(&ClockTime::default(), SQUARE);
        assert_eq!(scene.ticks.len(), TICK_COUNT);
        assert_eq!(scene.ticks[0].start, scene.ticks[60].start);
        assert_eq!(scene.ticks[0].end, scene.ticks[60].end);
    }

    #[test]
    fn major_and_minor_ticks() {
        let scene = render_face(&ClockTime::default(), SQUARE);
        for (i, tick) in scene.ticks.iter().enumerate() {
            let dx = tick.start.x - tick.end.x;
            let dy = tick.start.y - tick.end.y;
            let len = (dx * dx + dy * dy).sqrt();
            if i % 5 == 0 {
                assert!((len - 60.0).abs() < EPS, "tick {i} len {len}");
                assert_eq!(tick.width, StrokeWidth::Fixed(1.0));
            } else {
                assert!((len - 40.0).abs() < EPS, "tick {i} len {len}");
                assert_eq!(tick.width, StrokeWidth::Hairline);
            }
        }
        // 0° 刻度在 3 点钟方向，从表盘边缘向内
        assert_point(scene.ticks[0].start, 250.0, 150.0);
        assert_point(scene.ticks[0].end, 190.0, 150.0);
        // 90° 在 6 点钟方向（屏幕 y 向下）
        assert_point(scene.ticks[15].start, 150.0, 250.0);
    }

    #[test]
    fn face_disc_and_draw_order() {
        let scene = render_face(&ClockTime::PREVIEW, SQUARE);
        assert_eq!(scene.face.color, palette::FACE);
        assert_eq!(scene.face.glow.map(|g| g.spread), Some(GLOW_SPREAD));

        let cmds: Vec<DrawCmd> = scene.commands().collect();
        assert_eq!(cmds.len(), 1 + TICK_COUNT + 3);
        assert!(matches!(cmds[0], DrawCmd::Disc(_)));
        assert_eq!(cmds[cmds.len() - 1], DrawCmd::Line(scene.second_hand));
    }

    #[test]
    fn hand_colors_and_widths() {
        let scene = render_face(&ClockTime::PREVIEW, SQUARE);
        assert_eq!(scene.hour_hand.color, palette::HOUR_HAND);
        assert_eq!(scene.minute_hand.color, palette::MINUTE_HAND);
        assert_eq!(scene.second_hand.color, palette::SECOND_HAND);
        assert_eq!(scene.second_hand.width, StrokeWidth::Fixed(3.0));
    }

    #[test]
    fn argb_unpacks() {
        assert_eq!(palette::SECOND_HAND, Rgba::new(0x05, 0xD9, 0xE8, 0xFF));
        assert_eq!(Rgba::from_argb(0x5AFFFFFF), palette::GLOW);
    }
}
