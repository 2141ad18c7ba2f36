//! 日志初始化（env_logger）

use std::sync::Once;

static INIT: Once = Once::new();

/// 选择过滤串：设置文件 > RUST_LOG > 默认 info
fn pick_filter(configured: Option<&str>, env: Option<&str>) -> String {
    configured
        .or(env)
        .map(str::to_owned)
        .unwrap_or_else(|| "info".to_owned())
}

/// 初始化全局 logger，只生效一次
pub fn init(configured: Option<&str>) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = pick_filter(configured, env.as_deref());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(env_logger::WriteStyle::Auto)
            .init();

        log::debug!("logging initialized ({})", filter);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_precedence() {
        assert_eq!(pick_filter(Some("clok=trace"), Some("warn")), "clok=trace");
        assert_eq!(pick_filter(None, Some("warn")), "warn");
        assert_eq!(pick_filter(None, None), "info");
    }
}
