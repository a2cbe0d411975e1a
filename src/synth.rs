//! Synth模块 - 合成带边界框标注的几何图形场景
//!
//! 该模块负责：
//! - 在固定尺寸画布上随机绘制圆、线段、矩形、三角形
//! - 计算每个图形的轴对齐边界框
//! - 合成"若干干扰图形 + 唯一目标图形"的样本
//! - 叠加真值框与预测框及其标签
//!
//! # 示例
//!
//! ```
//! use shapesynth::{SceneSynthesizer, SynthConfig};
//!
//! let mut synth = SceneSynthesizer::seeded(SynthConfig::default(), 42);
//! let bbox = synth.generate_example().bounding_box;
//! assert!(bbox.left <= bbox.right && bbox.top <= bbox.bottom);
//! synth.draw_bounding_boxes(&bbox.to_array(), &[20.0, 60.0, 20.0, 60.0], 87.3).unwrap();
//! ```

pub mod bounds;
pub mod glyphs;
pub mod random;
pub mod scene;
pub mod shapes;
pub mod surface;

pub use bounds::BoundingBox;
pub use random::{RandomSource, SeededSource, SequenceSource, ThreadSource};
pub use scene::{Example, SceneContext, SceneSynthesizer};
pub use shapes::{Shape, draw_circle, draw_line_segment, draw_rectangle, draw_triangle};
pub use surface::{Color, Label, SceneState, Surface};
