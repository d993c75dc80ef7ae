//! 微笑检测 WASM 库
//!
//! 本库提供基于面部关键点的微笑检测逻辑，编译为 WebAssembly
//! 在浏览器端运行。摄像头采集、MediaPipe FaceMesh 检测、画布绘制
//! 和音频播放由 JS 胶水层负责，本库只消费关键点、产出指令。
//!
//! ## 模块
//! - `landmark`: 关键点、检测帧与画布坐标转换
//! - `smile`: 微笑指数计算与区间分类
//! - `alert`: 提示音冷却门控
//! - `overlay`: 叠加层标记几何
//! - `monitor`: 微笑监测控制器（接收端 + 评估端）

pub mod alert;
pub mod landmark;
pub mod monitor;
pub mod overlay;
pub mod smile;

// 重新导出核心类型，方便外部使用
pub use alert::AlertGate;
pub use monitor::SmileMonitor;
pub use smile::SmileCalculator;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
