//! 面部关键点数据模块
//!
//! 定义归一化关键点、检测帧和画布坐标转换。
//! 检测器（MediaPipe FaceMesh）输出归一化坐标（0-1 范围），
//! 绘制和几何计算前需要按画布尺寸转换为像素坐标。

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// 上唇中心点索引（FaceMesh 拓扑）
pub const MOUTH_TOP: usize = 13;
/// 下唇中心点索引
pub const MOUTH_BOTTOM: usize = 14;
/// 右嘴角索引
pub const MOUTH_RIGHT: usize = 78;
/// 左嘴角索引
pub const MOUTH_LEFT: usize = 308;

/// 归一化二维关键点
///
/// 坐标分量在 [0, 1] 范围内，表示在视频帧中的相对位置。
/// 检测器额外输出的 z 分量在反序列化时被忽略。
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 画布尺寸（像素）
///
/// 与视频元素的原生分辨率保持一致。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 归一化坐标转像素坐标：逐分量乘以画布宽高
    pub fn to_pixel(&self, p: Point) -> Point {
        Point::new(p.x * self.width, p.y * self.height)
    }
}

/// 一帧中消费的四个嘴部关键点
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouthPoints {
    pub top: Point,
    pub bottom: Point,
    pub left: Point,
    pub right: Point,
}

impl MouthPoints {
    /// 四个点整体转换到像素空间
    pub fn to_pixels(&self, canvas: &CanvasSize) -> MouthPoints {
        MouthPoints {
            top: canvas.to_pixel(self.top),
            bottom: canvas.to_pixel(self.bottom),
            left: canvas.to_pixel(self.left),
            right: canvas.to_pixel(self.right),
        }
    }
}

/// 按固定索引提取嘴部关键点
///
/// 关键点序列过短（检测结果不完整或格式不符）时返回 `None`，
/// 由调用方静默跳过该人脸。
pub fn mouth_points(face: &[Point]) -> Option<MouthPoints> {
    if face.len() <= MOUTH_LEFT {
        return None;
    }

    Some(MouthPoints {
        top: face[MOUTH_TOP],
        bottom: face[MOUTH_BOTTOM],
        left: face[MOUTH_LEFT],
        right: face[MOUTH_RIGHT],
    })
}

/// 一次检测回调携带的全部人脸关键点
///
/// 最新帧槽位的存储单元：每次检测回调整体覆盖，评估时只读。
#[derive(Clone, Debug, Default)]
pub struct DetectionFrame {
    pub faces: Vec<Vec<Point>>,
}

impl DetectionFrame {
    /// 从 JS 侧的 `multiFaceLandmarks` 数组解析检测帧
    ///
    /// 空值或无法解析的负载降级为零人脸帧，不报错。
    pub fn from_js(value: JsValue) -> Self {
        if !js_sys::Array::is_array(&value) {
            return Self::default();
        }

        serde_wasm_bindgen::from_value::<Vec<Vec<Point>>>(value)
            .map(|faces| Self { faces })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouth_points_rejects_short_sequences() {
        let face = vec![Point::default(); MOUTH_LEFT];
        assert!(mouth_points(&face).is_none());
        assert!(mouth_points(&[]).is_none());
    }

    #[test]
    fn mouth_points_reads_fixed_indices() {
        let mut face = vec![Point::default(); 478];
        face[MOUTH_TOP] = Point::new(0.1, 0.2);
        face[MOUTH_BOTTOM] = Point::new(0.3, 0.4);
        face[MOUTH_LEFT] = Point::new(0.5, 0.6);
        face[MOUTH_RIGHT] = Point::new(0.7, 0.8);

        let mouth = mouth_points(&face).expect("mouth points");
        assert_eq!(mouth.top, Point::new(0.1, 0.2));
        assert_eq!(mouth.bottom, Point::new(0.3, 0.4));
        assert_eq!(mouth.left, Point::new(0.5, 0.6));
        assert_eq!(mouth.right, Point::new(0.7, 0.8));
    }

    #[test]
    fn canvas_converts_to_pixel_space() {
        let canvas = CanvasSize::new(640.0, 480.0);
        let p = canvas.to_pixel(Point::new(0.5, 0.25));
        assert_eq!(p, Point::new(320.0, 120.0));
    }
}
