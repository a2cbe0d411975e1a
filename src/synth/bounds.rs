use crate::error::SynthError;

/// 边界框结构
///
/// 轴对齐矩形，字段顺序与 `[left, right, top, bottom]` 数组一致，坐标单位为画布像素。
/// 由图形绘制产生的边界框总满足 `left <= right` 且 `top <= bottom`。
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct BoundingBox {
    /// 左边界x坐标
    pub left: f32,
    /// 右边界x坐标
    pub right: f32,
    /// 上边界y坐标
    pub top: f32,
    /// 下边界y坐标
    pub bottom: f32,
}

impl BoundingBox {
    /// 创建一个新的边界框
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }

    /// 由一组点求紧致包围框
    ///
    /// 点集为空时返回全零边界框。
    pub fn from_points(points: &[(f32, f32)]) -> Self {
        let Some(&(x0, y0)) = points.first() else {
            return Self::default();
        };
        points.iter().skip(1).fold(Self::new(x0, x0, y0, y0), |acc, &(x, y)| Self {
            left: acc.left.min(x),
            right: acc.right.max(x),
            top: acc.top.min(y),
            bottom: acc.bottom.max(y),
        })
    }

    /// 以中心点和宽高构造
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cx + width / 2.0, cy - height / 2.0, cy + height / 2.0)
    }

    /// 计算边界框的宽度
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// 计算边界框的高度
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// 计算边界框的面积
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// 检查左右、上下是否有序
    pub fn is_ordered(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// 检查边界框是否完整落在 `[0, width] × [0, height]` 内
    pub fn contains_within(&self, width: f32, height: f32) -> bool {
        self.left >= 0.0 && self.right <= width && self.top >= 0.0 && self.bottom <= height
    }

    /// 计算两个边界框的交集面积
    pub fn intersection(&self, other: &BoundingBox) -> f32 {
        let x_left = self.left.max(other.left);
        let y_top = self.top.max(other.top);
        let x_right = self.right.min(other.right);
        let y_bottom = self.bottom.min(other.bottom);

        if x_right <= x_left || y_bottom <= y_top {
            0.0
        } else {
            (x_right - x_left) * (y_bottom - y_top)
        }
    }

    /// 交并比，并集面积为0时返回0
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let inter = self.intersection(other);
        let union_area = self.area() + other.area() - inter;
        if union_area <= 0.0 { 0.0 } else { inter / union_area }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.left, self.right, self.top, self.bottom]
    }

    /// 从任意长度的切片解析，长度不为4时返回 `InvalidBoxArity`
    ///
    /// `which` 仅用于错误信息，标明是哪一个框（如 "true"、"predicted"）。
    pub fn parse(values: &[f32], which: &'static str) -> Result<Self, SynthError> {
        match values {
            &[left, right, top, bottom] => Ok(Self { left, right, top, bottom }),
            _ => Err(SynthError::InvalidBoxArity { which, len: values.len() }),
        }
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from([left, right, top, bottom]: [f32; 4]) -> Self {
        Self { left, right, top, bottom }
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_array()
    }
}

impl TryFrom<&[f32]> for BoundingBox {
    type Error = SynthError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        Self::parse(values, "bounding box")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_takes_tight_extents() {
        let bbox = BoundingBox::from_points(&[(3.0, 9.0), (-1.0, 4.0), (7.5, 2.0)]);
        assert_eq!(bbox, BoundingBox::new(-1.0, 7.5, 2.0, 9.0));
        assert!(bbox.is_ordered());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = BoundingBox::parse(&[1.0, 2.0, 3.0], "true").unwrap_err();
        assert!(matches!(err, SynthError::InvalidBoxArity { which: "true", len: 3 }));
        assert!(BoundingBox::try_from(&[0.0_f32; 5][..]).is_err());
    }

    #[test]
    fn iou_of_overlapping_boxes() {
        let a = BoundingBox::new(0.0, 10.0, 0.0, 10.0);
        let b = BoundingBox::new(5.0, 15.0, 0.0, 10.0);
        assert_eq!(a.intersection(&b), 50.0);
        assert!((a.iou(&b) - 50.0 / 150.0).abs() < 1e-6);
        assert_eq!(a.iou(&BoundingBox::new(20.0, 30.0, 20.0, 30.0)), 0.0);
    }
}
