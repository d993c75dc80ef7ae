//! 叠加层标记模块
//!
//! 为每张评估过的人脸生成四个嘴部标记点（像素空间）。
//! 实际的画布绘制（清除、圆弧、填充）由 JS 胶水层执行，
//! 本模块只负责标记的几何描述。

use serde::Serialize;

use crate::landmark::{MouthPoints, Point};

/// 标记半径（像素）
pub const MARKER_RADIUS: f64 = 5.0;
/// 标记填充颜色
pub const MARKER_COLOR: &str = "#00FFFF";

/// 单个圆形标记（像素空间）
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Marker {
    fn at(p: Point) -> Self {
        Self {
            x: p.x,
            y: p.y,
            radius: MARKER_RADIUS,
        }
    }
}

/// 四个嘴部关键点对应的标记，顺序：上唇、下唇、左嘴角、右嘴角
pub fn mouth_markers(mouth: &MouthPoints) -> [Marker; 4] {
    [
        Marker::at(mouth.top),
        Marker::at(mouth.bottom),
        Marker::at(mouth.left),
        Marker::at(mouth.right),
    ]
}
