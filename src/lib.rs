pub mod config;
pub mod error;
pub mod model;
pub mod synth;
pub mod visualizer;

// 重新导出常用类型和函数
pub use config::{SynthConfig, VisualizerConfig};
pub use error::{Result, SynthError};
pub use model::{InferenceModel, NullModel, OnnxModel, Prediction, ShapeClass, load_model};
pub use synth::{BoundingBox, Example, SceneContext, SceneSynthesizer, Shape, Surface};
pub use visualizer::{CycleReport, UiState, Visualizer};
