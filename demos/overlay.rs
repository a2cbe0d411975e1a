use shapesynth::{SceneSynthesizer, SynthConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("shapesynth 叠加示例");
    println!("===================");

    let mut synth = SceneSynthesizer::seeded(SynthConfig::default(), 2024);
    let example = synth.generate_example();
    let true_box = example.bounding_box;
    println!(
        "{} 对干扰图形，目标 {}: ({:.1}, {:.1}, {:.1}, {:.1})",
        example.decoy_pairs, example.class, true_box.left, true_box.right, true_box.top, true_box.bottom
    );

    // 模拟一个略有偏移的预测框
    let predicted = [true_box.left + 6.0, true_box.right + 6.0, true_box.top - 4.0, true_box.bottom - 4.0];
    let confidence = true_box.iou(&predicted.into()) * 100.0;
    synth.draw_bounding_boxes(&true_box.to_array(), &predicted, confidence)?;

    std::fs::create_dir_all("results")?;
    let output_path = "results/overlay.png";
    synth.surface().save(output_path)?;
    println!("结果已保存到: {}", output_path);

    println!("\n颜色说明:");
    println!("- 红色框: 真值");
    println!("- 蓝色框: 预测");
    Ok(())
}
