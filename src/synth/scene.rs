use log::{debug, info};

use crate::config::{
    PREDICT_BOX_COLOR, PREDICT_BOX_LINE_WIDTH, SynthConfig, TRUE_BOX_COLOR, TRUE_BOX_LINE_WIDTH,
};
use crate::error::Result;
use crate::model::{Prediction, ShapeClass};
use crate::synth::bounds::BoundingBox;
use crate::synth::random::{RandomSource, SeededSource, ThreadSource};
use crate::synth::shapes::{Shape, outline};
use crate::synth::surface::{Color, SceneState, Surface};

/// 绘图上下文
///
/// 持有画布、随机源和合成参数，所有图形绘制都通过它取随机数和落笔。
pub struct SceneContext {
    surface: Surface,
    rng: Box<dyn RandomSource>,
    config: SynthConfig,
}

impl SceneContext {
    pub fn new(config: SynthConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            surface: Surface::new(config.width, config.height),
            rng,
            config,
        }
    }

    /// 使用固定种子，便于复现
    pub fn seeded(config: SynthConfig, seed: u64) -> Self {
        Self::new(config, Box::new(SeededSource::new(seed)))
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// 画布宽高（浮点）
    pub fn dimensions(&self) -> (f32, f32) {
        (self.config.width as f32, self.config.height as f32)
    }

    pub fn uniform(&mut self) -> f32 {
        self.rng.uniform()
    }

    pub fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.uniform_int(min, max)
    }

    pub fn random_color(&mut self) -> Color {
        Color::random(self.rng.as_mut())
    }
}

/// 一次合成的样本：画布引用 + 目标边界框
#[derive(Debug)]
pub struct Example<'a> {
    pub surface: &'a Surface,
    pub bounding_box: BoundingBox,
    /// 目标图形类别
    pub class: ShapeClass,
    /// 本次绘制的干扰图形对数
    pub decoy_pairs: usize,
}

/// 场景合成器
///
/// 每次 `generate_example` 都会清空画布，先画若干对干扰图形（圆 + 线段），
/// 再画唯一的目标图形，并把目标的边界框作为真值返回。
pub struct SceneSynthesizer {
    ctx: SceneContext,
}

impl SceneSynthesizer {
    pub fn new(ctx: SceneContext) -> Self {
        Self { ctx }
    }

    /// 使用线程随机源
    pub fn with_config(config: SynthConfig) -> Self {
        Self::new(SceneContext::new(config, Box::new(ThreadSource)))
    }

    pub fn seeded(config: SynthConfig, seed: u64) -> Self {
        Self::new(SceneContext::seeded(config, seed))
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.ctx
    }

    pub fn surface(&self) -> &Surface {
        self.ctx.surface()
    }

    /// 合成一个新样本
    pub fn generate_example(&mut self) -> Example<'_> {
        self.ctx.surface_mut().clear();

        let (min, max) = self.ctx.config().decoy_pairs;
        let pairs = self.ctx.uniform_int(min, max).max(0) as usize;
        for _ in 0..pairs {
            Shape::random_circle().draw(&mut self.ctx);
            Shape::random_line_segment().draw(&mut self.ctx);
        }

        let class = self.ctx.config().target;
        let target = match class {
            ShapeClass::Rectangle => Shape::random_rectangle(),
            ShapeClass::Triangle => Shape::random_triangle(),
        };
        let bounding_box = target.draw(&mut self.ctx);
        self.ctx.surface_mut().set_state(SceneState::Synthesized);
        debug!("example with {pairs} decoy pairs, target {class:?} at {bounding_box:?}");

        Example {
            surface: self.ctx.surface(),
            bounding_box,
            class,
            decoy_pairs: pairs,
        }
    }

    /// 叠加真值框与预测框
    ///
    /// 两个框都必须恰好4个分量，否则返回错误且不做任何绘制。
    /// 真值框红色，左上角标注 "true"；预测框蓝色，左下角标注置信度（保留1位小数）。
    pub fn draw_bounding_boxes(
        &mut self,
        true_box: &[f32],
        predict_box: &[f32],
        confidence_percentage: f32,
    ) -> Result<()> {
        let true_box = BoundingBox::parse(true_box, "true")?;
        let predict_box = BoundingBox::parse(predict_box, "predicted")?;

        let surface = self.ctx.surface_mut();
        let true_color = Color::from_array(TRUE_BOX_COLOR);
        surface.stroke(&outline(&true_box), true_color, TRUE_BOX_LINE_WIDTH);
        surface.draw_label("true", true_box.left, true_box.top, true_color);

        let predict_color = Color::from_array(PREDICT_BOX_COLOR);
        surface.stroke(&outline(&predict_box), predict_color, PREDICT_BOX_LINE_WIDTH);
        let text = format!("predicted: {confidence_percentage:.1}%");
        surface.draw_label(&text, predict_box.left, predict_box.bottom, predict_color);

        surface.set_state(SceneState::Annotated);
        info!("overlay true={:?} predicted={:?} ({text})", true_box, predict_box);
        Ok(())
    }

    /// 按模型输出叠加预测框，置信度取真值与预测框的交并比
    pub fn draw_prediction(&mut self, true_box: &BoundingBox, prediction: &Prediction) -> Result<()> {
        let confidence = true_box.iou(&prediction.bounding_box) * 100.0;
        self.draw_bounding_boxes(
            &true_box.to_array(),
            &prediction.bounding_box.to_array(),
            confidence,
        )
    }
}
