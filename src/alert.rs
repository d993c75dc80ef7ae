//! 提示音冷却门控模块
//!
//! 两状态机：Ready（冷却已过，可触发）⇄ Suppressed（冷却窗口内，抑制）。
//! 成功触发后记录时间戳进入 Suppressed；经过冷却时长后自动回到 Ready。
//! 保证每个冷却窗口内最多触发一次，无论尝试多少次。

use wasm_bindgen::prelude::*;

/// 默认冷却时长（毫秒）
pub const ALERT_COOLDOWN_MS: f64 = 3000.0;

/// 提示音冷却门控
#[wasm_bindgen]
pub struct AlertGate {
    /// 冷却时长（毫秒）
    cooldown_ms: f64,
    /// 上次成功触发的时间戳，尚未触发过时为 `None`
    last_fired_ts: Option<f64>,
}

#[wasm_bindgen]
impl AlertGate {
    /// 创建新的门控
    ///
    /// # 参数
    /// - `cooldown_ms`: 冷却时长（毫秒），默认 3000
    #[wasm_bindgen(constructor)]
    pub fn new(cooldown_ms: Option<f64>) -> Self {
        Self {
            cooldown_ms: cooldown_ms.unwrap_or(ALERT_COOLDOWN_MS),
            last_fired_ts: None,
        }
    }

    /// 尝试触发一次提示音
    ///
    /// 处于 Ready 状态时返回 `true` 并记录时间戳；否则返回 `false`。
    #[wasm_bindgen(js_name = "tryFire")]
    pub fn try_fire(&mut self, now: f64) -> bool {
        if self.is_ready(now) {
            self.last_fired_ts = Some(now);
            true
        } else {
            false
        }
    }

    /// 当前是否处于 Ready 状态
    #[wasm_bindgen(js_name = "isReady")]
    pub fn is_ready(&self, now: f64) -> bool {
        match self.last_fired_ts {
            None => true,
            Some(last) => now - last > self.cooldown_ms,
        }
    }

    /// 距离回到 Ready 状态的剩余毫秒数
    #[wasm_bindgen(js_name = "remainingMs")]
    pub fn remaining_ms(&self, now: f64) -> f64 {
        match self.last_fired_ts {
            None => 0.0,
            Some(last) => (self.cooldown_ms - (now - last)).max(0.0),
        }
    }

    /// 设置冷却时长（毫秒）
    #[wasm_bindgen(js_name = "setCooldown")]
    pub fn set_cooldown(&mut self, cooldown_ms: f64) {
        self.cooldown_ms = cooldown_ms;
    }

    /// 重置门控状态
    pub fn reset(&mut self) {
        self.last_fired_ts = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_fires() {
        let mut gate = AlertGate::new(None);
        assert!(gate.try_fire(0.0));
    }

    #[test]
    fn suppressed_within_cooldown_window() {
        let mut gate = AlertGate::new(Some(3000.0));
        assert!(gate.try_fire(1000.0));
        assert!(!gate.try_fire(1001.0));
        assert!(!gate.try_fire(4000.0));
        assert!(gate.try_fire(4001.0));
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let mut gate = AlertGate::new(Some(3000.0));
        assert_eq!(gate.remaining_ms(500.0), 0.0);
        gate.try_fire(1000.0);
        assert_eq!(gate.remaining_ms(2000.0), 2000.0);
        assert_eq!(gate.remaining_ms(10_000.0), 0.0);
    }

    #[test]
    fn reset_returns_to_ready() {
        let mut gate = AlertGate::new(Some(3000.0));
        gate.try_fire(1000.0);
        assert!(!gate.is_ready(1500.0));
        gate.reset();
        assert!(gate.is_ready(1500.0));
    }
}
