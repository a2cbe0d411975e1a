//! Model模块 - 推理能力接口
//!
//! 场景合成本身不依赖任何模型；这里只定义"图像批张量 → 预测框 + 类别分数"的能力接口，
//! 以及两个实现：基于 ONNX Runtime 的 `OnnxModel` 和永远不给出结果的 `NullModel`。

pub mod infer;
pub mod load;

use std::fmt;

use ndarray::Array4;

use crate::error::Result;
use crate::synth::BoundingBox;

pub use infer::OnnxModel;
pub use load::load_model;

/// 目标图形类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeClass {
    #[default]
    Rectangle,
    Triangle,
}

impl ShapeClass {
    /// 类别分数超过画布宽度一半判为矩形，否则为三角形
    pub fn from_score(class_score: f32, canvas_width: u32) -> Self {
        if class_score > canvas_width as f32 / 2.0 {
            ShapeClass::Rectangle
        } else {
            ShapeClass::Triangle
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeClass::Rectangle => "rectangle",
            ShapeClass::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 单次推理结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub bounding_box: BoundingBox,
    pub class_score: f32,
}

impl Prediction {
    pub fn class(&self, canvas_width: u32) -> ShapeClass {
        ShapeClass::from_score(self.class_score, canvas_width)
    }
}

/// 推理能力
///
/// 返回 `Ok(None)` 表示本轮没有可绘制的结果。
pub trait InferenceModel: Send {
    fn infer(&mut self, batch: &Array4<f32>) -> Result<Option<Prediction>>;
}

/// 未加载模型时的占位实现
#[derive(Debug, Default, Clone, Copy)]
pub struct NullModel;

impl InferenceModel for NullModel {
    fn infer(&mut self, _batch: &Array4<f32>) -> Result<Option<Prediction>> {
        Ok(None)
    }
}

impl<F> InferenceModel for F
where
    F: FnMut(&Array4<f32>) -> Result<Option<Prediction>> + Send,
{
    fn infer(&mut self, batch: &Array4<f32>) -> Result<Option<Prediction>> {
        self(batch)
    }
}
