//! 微笑监测控制器模块
//!
//! 将检测回调与定时评估串联起来的控制器：
//! - 关键点接收端 `on_results`：以检测器自身的节奏被调用，只覆盖最新帧槽位；
//! - 微笑评估端 `tick`：由 JS 定时器每 2000 毫秒驱动一次，与检测节奏解耦，
//!   读取最新帧并产出一份绘制/展示/提示音指令（`TickReport`）。
//!
//! 两个入口都要求 `&mut self`，单写者约束由借用检查静态保证，
//! 不依赖宿主事件循环的调度假设。

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::alert::{AlertGate, ALERT_COOLDOWN_MS};
use crate::landmark::{mouth_points, CanvasSize, DetectionFrame};
use crate::overlay::{mouth_markers, Marker, MARKER_COLOR};
use crate::smile::{SmileBand, SmileCalculator};

/// 评估周期（毫秒），JS 侧 `setInterval` 使用
pub const SCAN_INTERVAL_MS: f64 = 2000.0;
/// 提示音音量
pub const ALERT_VOLUME: f64 = 0.5;

/// FaceMesh 检测器配置
///
/// JS 胶水层将其原样传给 `faceMesh.setOptions`。
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorOptions {
    pub max_num_faces: u32,
    pub refine_landmarks: bool,
    pub min_detection_confidence: f64,
    pub min_tracking_confidence: f64,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            max_num_faces: 1,
            refine_landmarks: true,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

/// 一次评估产出的指令集
///
/// JS 胶水层按字段执行：清除画布、绘制标记、更新文案、播放提示音。
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    /// 是否清除上一轮的叠加层（存在最新帧时恒为 true）
    pub clear: bool,
    /// 本轮所有人脸的标记点
    pub markers: Vec<Marker>,
    /// 标记填充颜色
    pub marker_color: String,
    /// 展示文案（无有效人脸时为空，表示不更新）
    pub display: Option<String>,
    /// 最后一张有效人脸的微笑指数
    pub ratio: Option<f64>,
    /// 最后一张有效人脸的区间："low" | "mid" | "high"
    pub band: Option<String>,
    /// 本轮是否播放提示音
    pub play_alert: bool,
    /// 提示音音量
    pub alert_volume: f64,
}

impl TickReport {
    fn empty() -> Self {
        Self {
            clear: true,
            markers: Vec::new(),
            marker_color: MARKER_COLOR.to_string(),
            display: None,
            ratio: None,
            band: None,
            play_alert: false,
            alert_volume: ALERT_VOLUME,
        }
    }
}

/// 单张人脸的中间评估结果
struct FaceEval {
    markers: [Marker; 4],
    ratio: f64,
    band: SmileBand,
}

/// 微笑监测控制器
///
/// 持有最新帧槽位、指数计算器、冷却门控和画布尺寸，
/// 取代逐个模块级全局变量。
#[wasm_bindgen]
pub struct SmileMonitor {
    calculator: SmileCalculator,
    gate: AlertGate,
    canvas: CanvasSize,
    latest: Option<DetectionFrame>,
}

#[wasm_bindgen]
impl SmileMonitor {
    /// 创建新的监测控制器
    ///
    /// # 参数
    /// - `canvas_width` / `canvas_height`: 画布尺寸（像素），
    ///   应与视频元素的原生分辨率一致
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            calculator: SmileCalculator::default(),
            gate: AlertGate::new(Some(ALERT_COOLDOWN_MS)),
            canvas: CanvasSize::new(canvas_width, canvas_height),
            latest: None,
        }
    }

    /// 关键点接收端：检测器每产出一帧调用一次
    ///
    /// 入参为 `results.multiFaceLandmarks`（零或多张人脸的关键点数组）。
    /// 只覆盖最新帧槽位，不校验、不绘制、不触发提示音；
    /// 空值或无法解析的负载存为零人脸帧。
    #[wasm_bindgen(js_name = "onResults")]
    pub fn on_results(&mut self, results: JsValue) {
        self.store_frame(DetectionFrame::from_js(results));
    }

    /// 微笑评估端：定时器每 2000 毫秒调用一次
    ///
    /// 尚无最新帧时返回 `null`（不清除、不更新）；
    /// 否则返回序列化的 `TickReport`。
    pub fn tick(&mut self, timestamp: f64) -> JsValue {
        match self.evaluate(timestamp) {
            Some(report) => serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// 更新画布尺寸（视频元数据加载后调用）
    #[wasm_bindgen(js_name = "setCanvasSize")]
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas = CanvasSize::new(width, height);
    }

    /// 设置微笑指数区间阈值
    #[wasm_bindgen(js_name = "setThresholds")]
    pub fn set_thresholds(&mut self, low: f64, high: f64) {
        self.calculator.set_thresholds(low, high);
    }

    /// 设置提示音冷却时长（毫秒）
    #[wasm_bindgen(js_name = "setCooldown")]
    pub fn set_cooldown(&mut self, cooldown_ms: f64) {
        self.gate.set_cooldown(cooldown_ms);
    }

    /// 重置监测状态：清空最新帧槽位和冷却门控
    pub fn reset(&mut self) {
        self.latest = None;
        self.gate.reset();
    }

    /// 检测器配置，供 JS 侧 `faceMesh.setOptions` 使用
    #[wasm_bindgen(js_name = "detectorOptions")]
    pub fn detector_options() -> JsValue {
        serde_wasm_bindgen::to_value(&DetectorOptions::default()).unwrap_or(JsValue::NULL)
    }
}

impl SmileMonitor {
    /// 覆盖最新帧槽位，丢弃之前的帧
    pub fn store_frame(&mut self, frame: DetectionFrame) {
        self.latest = Some(frame);
    }

    /// 评估最新帧
    ///
    /// 每张人脸：提取嘴部关键点 → 像素转换 → 标记 → 指数 → 区间；
    /// 关键点缺失或几何退化的人脸被跳过。
    /// 高区间的人脸尝试触发冷却门控，单轮内最多播放一次提示音。
    /// 多张人脸时文案取最后一张有效人脸（检测器配置上限为一张）。
    pub fn evaluate(&mut self, timestamp: f64) -> Option<TickReport> {
        let frame = self.latest.as_ref()?;

        let evals: Vec<FaceEval> = frame
            .faces
            .iter()
            .filter_map(|face| {
                let mouth = mouth_points(face)?.to_pixels(&self.canvas);
                let result = self.calculator.calculate(&mouth);
                if !result.is_valid {
                    return None;
                }
                Some(FaceEval {
                    markers: mouth_markers(&mouth),
                    ratio: result.ratio,
                    band: self.calculator.band(result.ratio),
                })
            })
            .collect();

        let mut report = TickReport::empty();

        for eval in evals {
            report.markers.extend_from_slice(&eval.markers);
            report.display = Some(self.calculator.display_text(eval.ratio));
            report.ratio = Some(eval.ratio);
            report.band = Some(eval.band.as_str().to_string());

            if eval.band == SmileBand::High && !report.play_alert && self.gate.try_fire(timestamp)
            {
                report.play_alert = true;
            }
        }

        Some(report)
    }

    /// 当前是否存有最新帧
    pub fn has_frame(&self) -> bool {
        self.latest.is_some()
    }
}
