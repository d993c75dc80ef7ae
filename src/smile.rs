//! 微笑指数计算模块
//!
//! 基于四个嘴部关键点计算微笑指数：
//! smile_ratio = |上唇.y - 下唇.y| / |左嘴角.x - 右嘴角.x|（像素空间）
//!
//! 指数分为三个区间：
//! - ratio < 0.05: 无微笑
//! - 0.05 ≤ ratio ≤ 0.20: 轻微微笑
//! - ratio > 0.20: 明显微笑（可触发提示音）

use wasm_bindgen::prelude::*;

use crate::landmark::{MouthPoints, Point};

/// 低区间阈值
pub const RATIO_LOW: f64 = 0.05;
/// 高区间阈值，超过即可触发提示音
pub const RATIO_HIGH: f64 = 0.20;

/// 嘴宽下限（像素），低于此值视为退化几何，结果无效
const MIN_MOUTH_WIDTH: f64 = 1e-6;

const MESSAGE_LOW: &str =
    "Não vai ter nada! Esquece! Leva pro um xsalada e racha a conta. 😐";
const MESSAGE_MID: &str = "O pae acredita em você, pensa que es o milior! 🙂";
const MESSAGE_HIGH: &str = "Sorriu? Mandioca no bombril! 😃";

/// 微笑指数区间
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmileBand {
    Low,
    Mid,
    High,
}

impl SmileBand {
    /// 区间对应的展示文案
    pub fn message(&self) -> &'static str {
        match self {
            SmileBand::Low => MESSAGE_LOW,
            SmileBand::Mid => MESSAGE_MID,
            SmileBand::High => MESSAGE_HIGH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SmileBand::Low => "low",
            SmileBand::Mid => "mid",
            SmileBand::High => "high",
        }
    }
}

/// 微笑指数计算结果
///
/// 退化几何（嘴宽为零）时 `ratio = -1.0` 且 `is_valid = false`。
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct SmileResult {
    pub ratio: f64,
    pub is_valid: bool,
}

impl SmileResult {
    fn invalid() -> Self {
        Self {
            ratio: -1.0,
            is_valid: false,
        }
    }
}

/// 微笑指数计算器
///
/// 持有区间阈值，提供指数计算、区间分类和展示文案拼接。
#[wasm_bindgen]
pub struct SmileCalculator {
    low_threshold: f64,
    high_threshold: f64,
}

#[wasm_bindgen]
impl SmileCalculator {
    /// 创建新的计算器
    ///
    /// # 参数
    /// - `low_threshold`: 低区间阈值，默认 0.05
    /// - `high_threshold`: 高区间阈值，默认 0.20
    #[wasm_bindgen(constructor)]
    pub fn new(low_threshold: Option<f64>, high_threshold: Option<f64>) -> Self {
        Self {
            low_threshold: low_threshold.unwrap_or(RATIO_LOW),
            high_threshold: high_threshold.unwrap_or(RATIO_HIGH),
        }
    }

    /// 从 8 个浮点数计算微笑指数（像素空间坐标）
    ///
    /// 点排列：top(x,y), bottom(x,y), left(x,y), right(x,y)
    #[wasm_bindgen(js_name = "calculateFromCoords")]
    pub fn calculate_from_coords(&self, coords: &[f64]) -> SmileResult {
        if coords.len() < 8 {
            return SmileResult::invalid();
        }

        let mouth = MouthPoints {
            top: Point::new(coords[0], coords[1]),
            bottom: Point::new(coords[2], coords[3]),
            left: Point::new(coords[4], coords[5]),
            right: Point::new(coords[6], coords[7]),
        };

        self.calculate(&mouth)
    }

    /// 按当前阈值分类，返回 "low" | "mid" | "high"
    pub fn classify(&self, ratio: f64) -> String {
        self.band(ratio).as_str().to_string()
    }

    /// 拼接展示文案：两位小数的指数 + 区间文案
    #[wasm_bindgen(js_name = "displayText")]
    pub fn display_text(&self, ratio: f64) -> String {
        format!(
            "Índice de Sorriso: {:.2}<br>{}",
            ratio,
            self.band(ratio).message()
        )
    }

    /// 设置区间阈值
    #[wasm_bindgen(js_name = "setThresholds")]
    pub fn set_thresholds(&mut self, low: f64, high: f64) {
        self.low_threshold = low;
        self.high_threshold = high;
    }
}

impl SmileCalculator {
    /// 计算微笑指数（像素空间的嘴部关键点）
    ///
    /// 垂直张开距离除以水平嘴宽，均为轴向距离。
    pub fn calculate(&self, mouth: &MouthPoints) -> SmileResult {
        let mouth_height = (mouth.top.y - mouth.bottom.y).abs();
        let mouth_width = (mouth.left.x - mouth.right.x).abs();

        if mouth_width < MIN_MOUTH_WIDTH {
            return SmileResult::invalid();
        }

        SmileResult {
            ratio: mouth_height / mouth_width,
            is_valid: true,
        }
    }

    /// 指数分类为区间
    pub fn band(&self, ratio: f64) -> SmileBand {
        if ratio < self.low_threshold {
            SmileBand::Low
        } else if ratio <= self.high_threshold {
            SmileBand::Mid
        } else {
            SmileBand::High
        }
    }
}

impl Default for SmileCalculator {
    fn default() -> Self {
        Self::new(None, None)
    }
}
