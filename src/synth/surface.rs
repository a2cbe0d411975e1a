use image::{DynamicImage, GenericImageView, ImageBuffer, imageops::FilterType};
use ndarray::{Array, Array4};
use raqote::{DrawOptions, DrawTarget, LineJoin, Path, SolidSource, Source, StrokeStyle};

use crate::config::LABEL_SCALE;
use crate::error::{Result, SynthError};
use crate::synth::glyphs::{GLYPH_HEIGHT, lit_cells};
use crate::synth::random::RandomSource;

/// 不透明 RGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_array([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }

    /// 每个通道独立取 `round(u * 255)`，按 r、g、b 顺序取随机数
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        let mut channel = || (rng.uniform() * 255.0).round() as u8;
        let r = channel();
        let g = channel();
        let b = channel();
        Self { r, g, b }
    }

    fn source(&self) -> Source<'static> {
        Source::Solid(SolidSource { r: self.r, g: self.g, b: self.b, a: 0xFF })
    }
}

/// 画布上的文字标注
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// 基线起点
    pub x: f32,
    pub y: f32,
    pub color: Color,
}

/// 场景所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// 刚清空
    Blank,
    /// 已合成场景
    Synthesized,
    /// 已叠加边界框标注
    Annotated,
}

/// 固定尺寸的绘图画布
///
/// 像素以 `raqote` 的预乘 ARGB 格式保存，每次落笔时临时包装成 `DrawTarget`，
/// 这样画布本身可以跨线程移动。额外记录已写入的文字标签和当前场景阶段。
pub struct Surface {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    labels: Vec<Label>,
    state: SceneState,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height) as usize],
            width,
            height,
            labels: Vec::new(),
            state: SceneState::Blank,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: SceneState) {
        self.state = state;
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn target(&mut self) -> DrawTarget<&mut [u32]> {
        DrawTarget::from_backing(self.width as i32, self.height as i32, &mut self.pixels[..])
    }

    /// 清空为全透明并丢弃所有标签
    pub fn clear(&mut self) {
        self.target().clear(SolidSource { r: 0, g: 0, b: 0, a: 0 });
        self.labels.clear();
        self.state = SceneState::Blank;
    }

    pub fn fill(&mut self, path: &Path, color: Color) {
        self.target().fill(path, &color.source(), &DrawOptions::new());
    }

    pub fn stroke(&mut self, path: &Path, color: Color, width: f32) {
        self.target().stroke(
            path,
            &color.source(),
            &StrokeStyle {
                join: LineJoin::Round,
                width,
                ..StrokeStyle::default()
            },
            &DrawOptions::new(),
        );
    }

    /// 以 `(x, y)` 为基线起点书写点阵文字
    pub fn draw_label(&mut self, text: &str, x: f32, y: f32, color: Color) {
        let top = y - GLYPH_HEIGHT as f32 * LABEL_SCALE;
        let source = color.source();
        let options = DrawOptions::new();
        {
            let mut target = self.target();
            for (col, row) in lit_cells(text) {
                target.fill_rect(
                    x + col as f32 * LABEL_SCALE,
                    top + row as f32 * LABEL_SCALE,
                    LABEL_SCALE,
                    LABEL_SCALE,
                    &source,
                    &options,
                );
            }
        }
        self.labels.push(Label { text: text.to_string(), x, y, color });
    }

    /// 读取单个像素，返回 RGBA；越界返回 None
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let argb = self.pixels[(y * self.width + x) as usize];
        let [b, g, r, a] = argb.to_le_bytes();
        Some([r, g, b, a])
    }

    /// 将画布内容导出为图像
    pub fn to_image(&self) -> Result<DynamicImage> {
        // DrawTarget 内部为 BGRA 小端序
        let pixels: Vec<u8> = self
            .pixels
            .iter()
            .flat_map(|&pixel| {
                let [b, g, r, a] = pixel.to_le_bytes();
                [r, g, b, a]
            })
            .collect();

        ImageBuffer::from_raw(self.width, self.height, pixels)
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(|| SynthError::Image("rendered buffer does not match surface size".into()))
    }

    /// 将画布转换为模型输入张量
    ///
    /// 1. 必要时用 CatmullRom 插值缩放到 `input_size × input_size`
    /// 2. 每个通道归一化为 `(v - 127.5) / 127.5`，即 `[-1, 1]`
    /// 3. 维度顺序为 NHWC，形状 `(1, input_size, input_size, 3)`
    pub fn to_tensor(&self, input_size: usize) -> Result<Array4<f32>> {
        let mut img = self.to_image()?;
        if img.width() as usize != input_size || img.height() as usize != input_size {
            img = img.resize_exact(input_size as u32, input_size as u32, FilterType::CatmullRom);
        }

        let rgb = img.to_rgb8().into_raw();
        let mut tensor: Array4<f32> =
            Array::from_shape_vec((1, input_size, input_size, 3), rgb)?.mapv(f32::from);
        tensor.par_mapv_inplace(|v| (v - 127.5) / 127.5);
        Ok(tensor)
    }

    /// 保存为 PNG 等格式（按扩展名推断）
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.to_image()?.save(path)?;
        Ok(())
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("state", &self.state)
            .field("labels", &self.labels)
            .finish()
    }
}
