use std::path::Path;

use ndarray::Array4;
use ort::{inputs, session::Session, value::Tensor};

use crate::config::MODEL_INPUT_NAME;
use crate::error::{Result, SynthError};
use crate::model::{InferenceModel, Prediction, load_model};
use crate::synth::BoundingBox;

/// 基于 ONNX Runtime 的检测模型
///
/// 输入形状 `(1, H, W, 3)`；输出前5个值依次为
/// `[class_score, left, right, top, bottom]`。
pub struct OnnxModel {
    session: Session,
}

impl OnnxModel {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn from_file(model_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(load_model(model_path)?))
    }
}

/// 运行模型推理并解析第一个输出
pub fn run_inference(model: &mut Session, input: &Array4<f32>) -> Result<Option<Prediction>> {
    let shape: Vec<usize> = input.shape().to_vec();
    let (data, _offset) = input.clone().into_raw_vec_and_offset();
    let input_tensor = Tensor::from_array(([shape[0], shape[1], shape[2], shape[3]], data))?;
    let outputs = model.run(inputs![MODEL_INPUT_NAME => input_tensor])?;

    let (_, values) = outputs[0].try_extract_tensor::<f32>()?;
    parse_output(values)
}

/// 解析 `[class_score, left, right, top, bottom, ..]`
pub fn parse_output(values: &[f32]) -> Result<Option<Prediction>> {
    match values {
        [] => Ok(None),
        [class_score, left, right, top, bottom, ..] => Ok(Some(Prediction {
            bounding_box: BoundingBox::new(*left, *right, *top, *bottom),
            class_score: *class_score,
        })),
        _ => Err(SynthError::ModelOutput(format!(
            "expected at least 5 values, got {}",
            values.len()
        ))),
    }
}

impl InferenceModel for OnnxModel {
    fn infer(&mut self, batch: &Array4<f32>) -> Result<Option<Prediction>> {
        run_inference(&mut self.session, batch)
    }
}
