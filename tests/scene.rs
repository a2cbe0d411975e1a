use shapesynth::synth::shapes::{draw_rectangle, draw_triangle, triangle_vertices};
use shapesynth::synth::{
    BoundingBox, SceneContext, SceneSynthesizer, SequenceSource, Shape, draw_circle,
};
use shapesynth::{Prediction, ShapeClass, SynthConfig, SynthError};

#[cfg(test)]
mod tests {
    use super::*;

    fn context(width: u32, height: u32, seed: u64) -> SceneContext {
        SceneContext::seeded(SynthConfig::default().with_size(width, height), seed)
    }

    #[test]
    fn rectangles_stay_inside_surface() {
        let config = SynthConfig::default()
            .with_size(300, 300)
            .with_rectangle_side(40.0, 100.0);
        let mut ctx = SceneContext::seeded(config, 1);

        for _ in 0..500 {
            let bbox = draw_rectangle(&mut ctx, None, None, None, None);
            assert!(bbox.is_ordered(), "{bbox:?}");
            assert!(bbox.width() >= 40.0 - 1e-3 && bbox.width() <= 100.0 + 1e-3, "{bbox:?}");
            assert!(bbox.height() >= 40.0 - 1e-3 && bbox.height() <= 100.0 + 1e-3, "{bbox:?}");
            assert!(bbox.contains_within(300.0 + 1e-3, 300.0 + 1e-3), "{bbox:?}");
            assert!(bbox.left >= -1e-3 && bbox.top >= -1e-3, "{bbox:?}");
        }
    }

    #[test]
    fn oversized_rectangle_collapses_to_center() {
        let config = SynthConfig::default().with_size(50, 50).with_rectangle_side(80.0, 80.0);
        let mut ctx = SceneContext::seeded(config, 9);
        let bbox = draw_rectangle(&mut ctx, None, None, None, None);
        assert_eq!(bbox.center(), (25.0, 25.0));
        assert_eq!(bbox.width(), 80.0);
    }

    #[test]
    fn triangle_box_is_tight_and_equilateral() {
        let mut ctx = context(224, 224, 5);
        for _ in 0..200 {
            let bbox = draw_triangle(&mut ctx, None, None, None, None);
            let (cx, cy) = bbox.center();
            assert!(bbox.is_ordered());
            assert!(cx > 0.0 && cy > 0.0);
        }

        // 固定参数，检查顶点
        let (cx, cy, side, angle) = (100.0, 90.0, 60.0, 0.7);
        let vertices = triangle_vertices(cx, cy, side, angle);
        let bbox = draw_triangle(&mut ctx, Some(cx), Some(cy), Some(side), Some(angle));
        assert_eq!(bbox, BoundingBox::from_points(&vertices));

        let radius = side / 3.0_f32.sqrt();
        for &(x, y) in &vertices {
            assert!(((x - cx).hypot(y - cy) - radius).abs() < 1e-3);
        }
        for k in 0..3 {
            let (a, b) = (vertices[k], vertices[(k + 1) % 3]);
            assert!(((a.0 - b.0).hypot(a.1 - b.1) - side).abs() < 1e-3);
        }
    }

    fn within(bbox: &BoundingBox, width: f32, height: f32) -> bool {
        const EPS: f32 = 1e-3;
        bbox.left >= -EPS && bbox.top >= -EPS && bbox.right <= width + EPS && bbox.bottom <= height + EPS
    }

    #[test]
    fn triangles_stay_inside_surface() {
        for (width, height) in [(224, 224), (300, 160)] {
            let mut ctx = context(width, height, 21);
            for _ in 0..2000 {
                let bbox = draw_triangle(&mut ctx, None, None, None, None);
                assert!(within(&bbox, width as f32, height as f32), "{width}x{height} {bbox:?}");
            }
        }
    }

    #[test]
    fn largest_triangle_at_bottom_edge_touches_but_stays_inside() {
        // 最大边长、中心取区间上端、顶点朝下
        let mut values = vec![1.0; 3];
        values.extend([0.0; 4]);
        let config = SynthConfig::default().with_triangle_side(99.9, 99.9);
        let mut ctx = SceneContext::new(config, Box::new(SequenceSource::new(values)));
        let bbox = draw_triangle(&mut ctx, None, None, None, None);
        assert!(within(&bbox, 224.0, 224.0), "{bbox:?}");
        assert!(bbox.bottom > 223.0, "{bbox:?}");
    }

    #[test]
    fn triangle_first_vertex_starts_at_ninety_degrees() {
        let vertices = triangle_vertices(0.0, 0.0, 30.0, 0.0);
        assert!(vertices[0].0.abs() < 1e-4);
        assert!(vertices[0].1 > 0.0);
    }

    /// 旧行为返回 `[0, cx, cy, 0]`，这里改为真实的外接正方形
    #[test]
    fn circle_returns_real_bounds_not_center_tuple() {
        let mut ctx = context(224, 224, 2);
        let bbox = draw_circle(&mut ctx, Some(50.0), Some(60.0), Some(10.0));
        assert_eq!(bbox, BoundingBox::new(40.0, 60.0, 50.0, 70.0));
        assert_ne!(bbox.to_array(), [0.0, 50.0, 60.0, 0.0]);
    }

    #[test]
    fn line_segment_box_is_ordered() {
        let mut ctx = context(100, 100, 3);
        let bbox = Shape::LineSegment { x0: Some(80.0), y0: Some(10.0), x1: Some(20.0), y1: Some(70.0) }
            .draw(&mut ctx);
        assert_eq!(bbox, BoundingBox::new(20.0, 80.0, 10.0, 70.0));
    }

    #[test]
    fn same_seed_same_example() {
        let mut a = SceneSynthesizer::seeded(SynthConfig::default(), 1234);
        let mut b = SceneSynthesizer::seeded(SynthConfig::default(), 1234);
        for _ in 0..5 {
            let ea = a.generate_example();
            let (box_a, pairs_a) = (ea.bounding_box, ea.decoy_pairs);
            let eb = b.generate_example();
            assert_eq!(box_a, eb.bounding_box);
            assert_eq!(pairs_a, eb.decoy_pairs);
        }
        assert_eq!(a.surface().to_image().unwrap(), b.surface().to_image().unwrap());
    }

    #[test]
    fn sequence_source_drives_exact_rectangle() {
        // 首个取值 0.0 -> 2 对干扰图形，每对消耗 13 个取值（圆 3+3，线段 4+3）
        let mut values = vec![0.0];
        values.extend([0.5; 26]);
        // 矩形：宽、高、中心x、中心y，然后是颜色
        values.extend([0.0, 1.0, 0.0, 0.0]);
        values.extend([0.5; 3]);
        let ctx = SceneContext::new(SynthConfig::default(), Box::new(SequenceSource::new(values)));
        let mut synth = SceneSynthesizer::new(ctx);
        let example = synth.generate_example();

        assert_eq!(example.decoy_pairs, 2);
        let bbox = example.bounding_box;
        assert_eq!((bbox.left, bbox.right, bbox.top), (0.0, 40.0, 0.0));
        assert!((bbox.bottom - 100.0).abs() < 1e-3, "{bbox:?}");
    }

    #[test]
    fn generated_targets_are_valid() {
        let mut synth = SceneSynthesizer::seeded(SynthConfig::default(), 77);
        for _ in 0..100 {
            let example = synth.generate_example();
            assert!((2..10).contains(&example.decoy_pairs));
            assert!(example.bounding_box.is_ordered());
            assert!(example.bounding_box.contains_within(224.0, 224.0));
        }
    }

    #[test]
    fn triangle_target_is_ground_truth() {
        let config = SynthConfig::default().with_target(ShapeClass::Triangle);
        let mut synth = SceneSynthesizer::seeded(config, 31);
        for _ in 0..200 {
            let example = synth.generate_example();
            assert_eq!(example.class, ShapeClass::Triangle);
            let bbox = example.bounding_box;
            assert!(bbox.is_ordered());
            assert!(bbox.width() > 0.0 && bbox.height() > 0.0);
            assert!(within(&bbox, 224.0, 224.0), "{bbox:?}");
        }
    }

    #[test]
    fn prediction_label_reports_overlap_percentage() {
        let mut synth = SceneSynthesizer::seeded(SynthConfig::default(), 4);
        let truth = BoundingBox::new(0.0, 10.0, 0.0, 10.0);

        let exact = Prediction { bounding_box: truth, class_score: 200.0 };
        synth.draw_prediction(&truth, &exact).unwrap();
        assert_eq!(synth.surface().labels()[1].text, "predicted: 100.0%");

        synth.context_mut().surface_mut().clear();
        let shifted = Prediction {
            bounding_box: BoundingBox::new(5.0, 15.0, 0.0, 10.0),
            class_score: 200.0,
        };
        synth.draw_prediction(&truth, &shifted).unwrap();
        assert_eq!(synth.surface().labels()[1].text, "predicted: 33.3%");

        synth.context_mut().surface_mut().clear();
        let disjoint = Prediction {
            bounding_box: BoundingBox::new(50.0, 60.0, 50.0, 60.0),
            class_score: 200.0,
        };
        synth.draw_prediction(&truth, &disjoint).unwrap();
        assert_eq!(synth.surface().labels()[1].text, "predicted: 0.0%");
    }

    #[test]
    fn overlay_draws_labelled_boxes() {
        let mut synth = SceneSynthesizer::seeded(SynthConfig::default().with_size(100, 100), 8);
        synth.context_mut().surface_mut().clear();
        synth
            .draw_bounding_boxes(&[10.0, 50.0, 10.0, 50.0], &[20.0, 60.0, 20.0, 60.0], 87.3)
            .unwrap();

        let labels = synth.surface().labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text, "true");
        assert_eq!((labels[0].x, labels[0].y), (10.0, 10.0));
        assert!(labels[1].text.contains("87.3%"));
        assert_eq!((labels[1].x, labels[1].y), (20.0, 60.0));

        // 真值框左边（红）与预测框左边（蓝）
        let [r, _, b, a] = synth.surface().pixel(10, 30).unwrap();
        assert!(r > 200 && b < 50 && a > 200);
        let [r, _, b, a] = synth.surface().pixel(20, 40).unwrap();
        assert!(b > 200 && r < 50 && a > 200);
    }

    #[test]
    fn overlay_rejects_wrong_arity() {
        let mut synth = SceneSynthesizer::seeded(SynthConfig::default(), 8);
        let err = synth
            .draw_bounding_boxes(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0], 50.0)
            .unwrap_err();
        assert!(matches!(err, SynthError::InvalidBoxArity { which: "true", len: 3 }));

        let err = synth
            .draw_bounding_boxes(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0, 5.0], 50.0)
            .unwrap_err();
        assert!(matches!(err, SynthError::InvalidBoxArity { which: "predicted", len: 5 }));
        assert!(synth.surface().labels().is_empty());
    }
}
