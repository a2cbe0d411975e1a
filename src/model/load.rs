use std::path::Path;

use log::info;
use ort::session::{Session, builder::GraphOptimizationLevel};

use crate::error::Result;

/// 加载ONNX模型
///
/// 加载ONNX格式的检测模型，并应用优化配置。
///
/// # 参数
/// * `model_path` - 模型文件路径
///
/// # 错误处理
/// 文件不存在或模型无法解析时返回Err
pub fn load_model(model_path: impl AsRef<Path>) -> Result<Session> {
    let model_path = model_path.as_ref();
    info!("loading model from {}", model_path.display());
    let model = Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(4)?
        .commit_from_file(model_path)?;
    Ok(model)
}
