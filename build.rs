//! 构建时生成表盘图标 icon.ico 并嵌入 Windows 可执行文件
#![cfg_attr(not(windows), allow(dead_code))]

const FACE: [u8; 3] = [4, 14, 37];
const TICK: [u8; 3] = [136, 136, 136];
const HAND: [u8; 3] = [244, 84, 255];
const SECOND: [u8; 3] = [5, 217, 232];

/// 点到线段的距离
fn dist_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// 画一个小表盘：底盘、12 个刻度、时针分针秒针（10:10:30 造型）
fn make_rgba_clock(size: u32) -> Vec<u8> {
    let s = size as f32;
    let c = (s * 0.5, s * 0.5);
    let r = s * 0.46;
    let line = (s / 16.0).max(1.0);
    let at = |deg: f32, len: f32| {
        let a = (deg - 90.0).to_radians();
        (c.0 + len * a.cos(), c.1 + len * a.sin())
    };
    let hands = [
        (at(305.0, r * 0.5), HAND),
        (at(60.0, r * 0.8), HAND),
        (at(180.0, r * 0.85), SECOND),
    ];

    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let p = (x as f32 + 0.5, y as f32 + 0.5);
            let d = ((p.0 - c.0).powi(2) + (p.1 - c.1).powi(2)).sqrt();
            if d > r {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
                continue;
            }
            let mut color = FACE;
            let on_tick = (0..12).any(|i| {
                let deg = i as f32 * 30.0;
                dist_to_segment(p, at(deg, r), at(deg, r * 0.78)) <= line * 0.5
            });
            if on_tick {
                color = TICK;
            }
            for (end, hand_color) in hands {
                if dist_to_segment(p, c, end) <= line * 0.6 {
                    color = hand_color;
                }
            }
            rgba.extend_from_slice(&[color[0], color[1], color[2], 255]);
        }
    }
    rgba
}

/// 把 16/32/48 三种尺寸写进一个 .ico
#[cfg(windows)]
fn write_icon(path: &std::path::Path) -> std::io::Result<()> {
    let mut icon_dir = ico::IconDir::new(ico::ResourceType::Icon);
    for size in [16u32, 32, 48] {
        let image = ico::IconImage::from_rgba_data(size, size, make_rgba_clock(size));
        icon_dir.add_entry(ico::IconDirEntry::encode(&image)?);
    }
    icon_dir.write(std::fs::File::create(path)?)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    #[cfg(windows)]
    {
        let Some(out_dir) = std::env::var_os("OUT_DIR") else { return };
        let icon_path = std::path::Path::new(&out_dir).join("clok.ico");
        if let Err(e) = write_icon(&icon_path) {
            println!("cargo:warning=icon not generated: {e}");
            return;
        }
        let mut res = winres::WindowsResource::new();
        res.set_icon(&icon_path.to_string_lossy());
        // 缺 rc.exe 时只是不带图标
        if let Err(e) = res.compile() {
            println!("cargo:warning=icon not embedded: {e}");
        }
    }
}
