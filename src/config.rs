use std::path::PathBuf;

use crate::model::ShapeClass;

// 画布尺寸
pub const DEFAULT_CANVAS_WIDTH: u32 = 224;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 224;

// 圆的半径范围
pub const CIRCLE_RADIUS_MIN: f32 = 5.0;
pub const CIRCLE_RADIUS_MAX: f32 = 20.0;
// 矩形边长范围
pub const RECTANGLE_SIDE_MIN: f32 = 40.0;
pub const RECTANGLE_SIDE_MAX: f32 = 100.0;
// 三角形边长范围
pub const TRIANGLE_SIDE_MIN: f32 = 50.0;
pub const TRIANGLE_SIDE_MAX: f32 = 100.0;

// 干扰图形（圆 + 线段）对数范围，左闭右开
pub const DECOY_PAIRS_MIN: i64 = 2;
pub const DECOY_PAIRS_MAX: i64 = 10;

// 边界框叠加样式
pub const TRUE_BOX_COLOR: [u8; 3] = [255, 0, 0];
pub const TRUE_BOX_LINE_WIDTH: f32 = 2.0;
pub const PREDICT_BOX_COLOR: [u8; 3] = [0, 0, 255];
pub const PREDICT_BOX_LINE_WIDTH: f32 = 2.0;
pub const LINE_SEGMENT_WIDTH: f32 = 1.0;
/// 标签点阵字体的放大倍数（5x7 点阵 × 2 ≈ 15px 字号）
pub const LABEL_SCALE: f32 = 2.0;

// 模型与推理
pub const MODEL_INPUT_SIZE: usize = 224;
pub const MODEL_INPUT_NAME: &str = "input";
pub const LOCAL_MODEL_PATH: &str = "mobilenet.onnx";
pub const DEFAULT_INTERVAL_MS: u64 = 3000;

/// 场景合成参数
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    pub width: u32,
    pub height: u32,
    pub circle_radius: (f32, f32),
    pub rectangle_side: (f32, f32),
    pub triangle_side: (f32, f32),
    pub decoy_pairs: (i64, i64),
    /// 作为检测目标的图形
    pub target: ShapeClass,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            circle_radius: (CIRCLE_RADIUS_MIN, CIRCLE_RADIUS_MAX),
            rectangle_side: (RECTANGLE_SIDE_MIN, RECTANGLE_SIDE_MAX),
            triangle_side: (TRIANGLE_SIDE_MIN, TRIANGLE_SIDE_MAX),
            decoy_pairs: (DECOY_PAIRS_MIN, DECOY_PAIRS_MAX),
            target: ShapeClass::Rectangle,
        }
    }
}

impl SynthConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_rectangle_side(mut self, min: f32, max: f32) -> Self {
        self.rectangle_side = (min, max);
        self
    }

    pub fn with_triangle_side(mut self, min: f32, max: f32) -> Self {
        self.triangle_side = (min, max);
        self
    }

    pub fn with_target(mut self, target: ShapeClass) -> Self {
        self.target = target;
        self
    }
}

/// 可视化控制器参数
#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    /// 定时刷新间隔（毫秒）
    pub interval_ms: u64,
    /// 模型输入边长
    pub input_size: usize,
    /// 模型文件路径，为空时使用空模型
    pub model_path: Option<PathBuf>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            input_size: MODEL_INPUT_SIZE,
            model_path: None,
        }
    }
}

impl VisualizerConfig {
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }
}
