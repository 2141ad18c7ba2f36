//! 时钟状态与每秒推进逻辑

use std::time::{Duration, Instant};

use chrono::{Local, Timelike};

/// 12 小时一整圈的秒数，推进这么多次回到原状态
pub const CYCLE_SECS: u32 = 12 * 60 * 60;

/// 推进间隔（1 秒）
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// 表盘上的时刻：时（0–11）、分、秒
///
/// 不做范围校验，宿主给什么就用什么。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    /// 设计预览用的时刻 00:43:25
    pub const PREVIEW: ClockTime = ClockTime::new(0, 43, 25);

    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self { hour, minute, second }
    }

    /// 前进一秒，秒 → 分 → 时逐级进位
    pub fn advance(&mut self) {
        self.second = (self.second + 1) % 60;
        if self.second == 0 {
            self.minute = (self.minute + 1) % 60;
        }
        if self.minute == 0 && self.second == 0 {
            self.hour = (self.hour + 1) % 12;
        }
    }

    /// 格式化为 "HH:MM:SS"（日志用）
    pub fn display(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// 当前时间来源（系统时钟，测试里可替换）
pub trait TimeSource {
    fn now(&self) -> ClockTime;
}

/// 本地系统时钟
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> ClockTime {
        let now = Local::now();
        // 12 点记作 0
        ClockTime::new(now.hour() % 12, now.minute(), now.second())
    }
}

/// 固定时刻（设计预览、测试用）
#[derive(Clone, Copy, Debug)]
pub struct FixedTimeSource(pub ClockTime);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> ClockTime {
        self.0
    }
}

/// 固定间隔的节拍器，由 UI 每帧用单调时钟轮询
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    last_tick_at: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick_at: now,
        }
    }

    /// 返回距上次以来走过的完整间隔数；基准按整数个间隔前移，不累积漂移
    pub fn poll(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_tick_at);
        if self.interval.is_zero() || elapsed < self.interval {
            return 0;
        }
        let n = (elapsed.as_nanos() / self.interval.as_nanos()).min(u32::MAX as u128) as u32;
        self.last_tick_at += self.interval * n;
        n
    }

    /// 距下一次节拍还有多久
    pub fn until_next(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_tick_at);
        self.interval.saturating_sub(elapsed)
    }
}

/// 时钟核心状态：当前时刻 + 节拍器
pub struct ClockState {
    pub time: ClockTime,
    ticker: Ticker,
}

impl ClockState {
    pub fn new(time: ClockTime, now: Instant) -> Self {
        Self {
            time,
            ticker: Ticker::new(TICK_INTERVAL, now),
        }
    }

    /// 从时间来源读取一次初始时刻
    pub fn from_source(source: &impl TimeSource, now: Instant) -> Self {
        Self::new(source.now(), now)
    }

    /// 每帧由 UI 调用；返回本次推进的秒数（非 0 表示需要重绘）
    pub fn tick(&mut self, now: Instant) -> u32 {
        let n = self.ticker.poll(now);
        if n > 1 {
            log::debug!("catching up {} ticks", n);
        }
        // 超过一整圈的部分等于没走
        for _ in 0..(n % CYCLE_SECS) {
            self.time.advance();
        }
        if n > 0 {
            log::trace!("tick -> {}", self.time.display());
        }
        n
    }

    /// 下次需要重绘的时间
    pub fn until_next_tick(&self, now: Instant) -> Duration {
        self.ticker.until_next(now)
    }
}
