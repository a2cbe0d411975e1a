//! 图形绘制
//!
//! 四种基本图形：圆、线段、矩形、等边三角形。每个参数都可由调用方给定，
//! 留空（`None`）时从场景的随机源取值。绘制完成后返回该图形的轴对齐边界框。

use std::f32::consts::PI;

use log::debug;
use raqote::PathBuilder;

use crate::config::LINE_SEGMENT_WIDTH;
use crate::synth::bounds::BoundingBox;
use crate::synth::scene::SceneContext;

/// 图形参数，字段为 `None` 时随机生成
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle {
        center_x: Option<f32>,
        center_y: Option<f32>,
        radius: Option<f32>,
    },
    LineSegment {
        x0: Option<f32>,
        y0: Option<f32>,
        x1: Option<f32>,
        y1: Option<f32>,
    },
    Rectangle {
        center_x: Option<f32>,
        center_y: Option<f32>,
        width: Option<f32>,
        height: Option<f32>,
    },
    Triangle {
        center_x: Option<f32>,
        center_y: Option<f32>,
        side: Option<f32>,
        angle: Option<f32>,
    },
}

impl Shape {
    pub const fn random_circle() -> Self {
        Shape::Circle { center_x: None, center_y: None, radius: None }
    }

    pub const fn random_line_segment() -> Self {
        Shape::LineSegment { x0: None, y0: None, x1: None, y1: None }
    }

    pub const fn random_rectangle() -> Self {
        Shape::Rectangle { center_x: None, center_y: None, width: None, height: None }
    }

    pub const fn random_triangle() -> Self {
        Shape::Triangle { center_x: None, center_y: None, side: None, angle: None }
    }

    /// 在场景画布上绘制并返回边界框
    pub fn draw(&self, ctx: &mut SceneContext) -> BoundingBox {
        match *self {
            Shape::Circle { center_x, center_y, radius } => draw_circle(ctx, center_x, center_y, radius),
            Shape::LineSegment { x0, y0, x1, y1 } => draw_line_segment(ctx, x0, y0, x1, y1),
            Shape::Rectangle { center_x, center_y, width, height } => {
                draw_rectangle(ctx, center_x, center_y, width, height)
            }
            Shape::Triangle { center_x, center_y, side, angle } => {
                draw_triangle(ctx, center_x, center_y, side, angle)
            }
        }
    }
}

/// 在区间 `[side/2, dim - side/2]` 内均匀选取中心；边长超过画布时退化为画布中点
pub fn place_center(dim: f32, side: f32, u: f32) -> f32 {
    if side > dim {
        dim / 2.0
    } else {
        (dim - side) * u + side / 2.0
    }
}

/// 等边三角形外接圆半径 `side / (2·cos 30°)`
pub fn triangle_circumradius(side: f32) -> f32 {
    side / 2.0 / (PI / 6.0).cos()
}

/// 三角形三个顶点：以中心为圆心、外接圆半径为距离，
/// 从 `angle + 90°` 起每隔 120° 取一个
pub fn triangle_vertices(center_x: f32, center_y: f32, side: f32, angle: f32) -> [(f32, f32); 3] {
    let ctr_to_vertex = triangle_circumradius(side);
    let step = PI / 3.0 * 2.0;
    let alpha = angle + PI / 2.0;
    std::array::from_fn(|k| {
        let a = alpha + step * k as f32;
        (center_x + a.cos() * ctr_to_vertex, center_y + a.sin() * ctr_to_vertex)
    })
}

/// 绘制实心圆
///
/// 返回圆的外接正方形 `[cx - r, cx + r, cy - r, cy + r]`。
pub fn draw_circle(
    ctx: &mut SceneContext,
    center_x: Option<f32>,
    center_y: Option<f32>,
    radius: Option<f32>,
) -> BoundingBox {
    let (w, h) = ctx.dimensions();
    let (r_min, r_max) = ctx.config().circle_radius;
    let center_x = center_x.unwrap_or_else(|| w * ctx.uniform());
    let center_y = center_y.unwrap_or_else(|| h * ctx.uniform());
    let radius = radius.unwrap_or_else(|| r_min + (r_max - r_min) * ctx.uniform());
    let color = ctx.random_color();

    let mut pb = PathBuilder::new();
    pb.arc(center_x, center_y, radius, 0.0, PI * 2.0);
    ctx.surface_mut().fill(&pb.finish(), color);

    debug!("circle at ({center_x:.1}, {center_y:.1}) r={radius:.1}");
    BoundingBox::from_center(center_x, center_y, radius * 2.0, radius * 2.0)
}

/// 绘制线段，端点各自独立随机
pub fn draw_line_segment(
    ctx: &mut SceneContext,
    x0: Option<f32>,
    y0: Option<f32>,
    x1: Option<f32>,
    y1: Option<f32>,
) -> BoundingBox {
    let (w, h) = ctx.dimensions();
    let x0 = x0.unwrap_or_else(|| ctx.uniform() * w);
    let y0 = y0.unwrap_or_else(|| ctx.uniform() * h);
    let x1 = x1.unwrap_or_else(|| ctx.uniform() * w);
    let y1 = y1.unwrap_or_else(|| ctx.uniform() * h);
    let color = ctx.random_color();

    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    pb.line_to(x1, y1);
    ctx.surface_mut().stroke(&pb.finish(), color, LINE_SEGMENT_WIDTH);

    debug!("line ({x0:.1}, {y0:.1}) -> ({x1:.1}, {y1:.1})");
    BoundingBox::from_points(&[(x0, y0), (x1, y1)])
}

/// 绘制实心矩形，矩形始终完整落在画布内（边长不超过画布时）
pub fn draw_rectangle(
    ctx: &mut SceneContext,
    center_x: Option<f32>,
    center_y: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
) -> BoundingBox {
    let (w, h) = ctx.dimensions();
    let (side_min, side_max) = ctx.config().rectangle_side;
    let width = width.unwrap_or_else(|| ctx.uniform() * (side_max - side_min) + side_min);
    let height = height.unwrap_or_else(|| ctx.uniform() * (side_max - side_min) + side_min);
    let center_x = center_x.unwrap_or_else(|| place_center(w, width, ctx.uniform()));
    let center_y = center_y.unwrap_or_else(|| place_center(h, height, ctx.uniform()));
    let color = ctx.random_color();

    let bbox = BoundingBox::from_center(center_x, center_y, width, height);
    let mut pb = PathBuilder::new();
    pb.move_to(bbox.left, bbox.top);
    pb.line_to(bbox.right, bbox.top);
    pb.line_to(bbox.right, bbox.bottom);
    pb.line_to(bbox.left, bbox.bottom);
    pb.close();
    ctx.surface_mut().fill(&pb.finish(), color);

    debug!("rectangle {bbox:?}");
    bbox
}

/// 绘制实心等边三角形，旋转角在 `[0, 120°)` 内
///
/// 中心按外接圆直径留边，任意旋转角下顶点都落在画布内。
pub fn draw_triangle(
    ctx: &mut SceneContext,
    center_x: Option<f32>,
    center_y: Option<f32>,
    side: Option<f32>,
    angle: Option<f32>,
) -> BoundingBox {
    let (w, h) = ctx.dimensions();
    let (side_min, side_max) = ctx.config().triangle_side;
    let side = side.unwrap_or_else(|| side_min + (side_max - side_min) * ctx.uniform());
    let extent = 2.0 * triangle_circumradius(side);
    let center_x = center_x.unwrap_or_else(|| place_center(w, extent, ctx.uniform()));
    let center_y = center_y.unwrap_or_else(|| place_center(h, extent, ctx.uniform()));
    let angle = angle.unwrap_or_else(|| PI / 3.0 * 2.0 * ctx.uniform());
    let color = ctx.random_color();

    let vertices = triangle_vertices(center_x, center_y, side, angle);
    let mut pb = PathBuilder::new();
    pb.move_to(vertices[0].0, vertices[0].1);
    pb.line_to(vertices[1].0, vertices[1].1);
    pb.line_to(vertices[2].0, vertices[2].1);
    pb.close();
    ctx.surface_mut().fill(&pb.finish(), color);

    let bbox = BoundingBox::from_points(&vertices);
    debug!("triangle side={side:.1} angle={angle:.3} {bbox:?}");
    bbox
}

/// 边界框的闭合描边路径
pub(crate) fn outline(bbox: &BoundingBox) -> raqote::Path {
    let mut pb = PathBuilder::new();
    pb.move_to(bbox.left, bbox.top);
    pb.line_to(bbox.right, bbox.top);
    pb.line_to(bbox.right, bbox.bottom);
    pb.line_to(bbox.left, bbox.bottom);
    pb.line_to(bbox.left, bbox.top);
    pb.finish()
}
