use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, error, info};

use shapesynth::{SceneSynthesizer, ShapeClass, SynthConfig, Visualizer, VisualizerConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Target {
    Rectangle,
    Triangle,
}

impl From<Target> for ShapeClass {
    fn from(target: Target) -> Self {
        match target {
            Target::Rectangle => ShapeClass::Rectangle,
            Target::Triangle => ShapeClass::Triangle,
        }
    }
}

/// 合成几何图形检测样本，并叠加真值框与预测框
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// 画布宽度
    #[arg(long, default_value_t = shapesynth::config::DEFAULT_CANVAS_WIDTH)]
    width: u32,
    /// 画布高度
    #[arg(long, default_value_t = shapesynth::config::DEFAULT_CANVAS_HEIGHT)]
    height: u32,
    /// 随机种子，不指定时使用线程随机源
    #[arg(long)]
    seed: Option<u64>,
    /// 目标图形
    #[arg(long, value_enum, default_value_t = Target::Rectangle)]
    target: Target,
    /// ONNX 模型路径，不指定时不做推理
    #[arg(long)]
    model: Option<PathBuf>,
    /// 手动触发的轮数
    #[arg(long, default_value_t = 1)]
    cycles: usize,
    /// 以定时模式运行，直到预测出错或 Ctrl-C
    #[arg(long)]
    watch: bool,
    /// 定时间隔（毫秒）
    #[arg(long, default_value_t = shapesynth::config::DEFAULT_INTERVAL_MS)]
    interval_ms: u64,
    /// 输出目录
    #[arg(long, default_value = "results")]
    output: PathBuf,
}

fn setup_logger() {
    let mut builder = env_logger::Builder::new();
    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else if cfg!(debug_assertions) {
        builder.filter(Some("shapesynth"), LevelFilter::Debug);
    } else {
        builder.filter(Some("shapesynth"), LevelFilter::Info);
    }
    builder.init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();
    let args = Args::parse();

    let config = SynthConfig::default()
        .with_size(args.width, args.height)
        .with_target(args.target.into());
    let synth = match args.seed {
        Some(seed) => SceneSynthesizer::seeded(config, seed),
        None => SceneSynthesizer::with_config(config),
    };

    let mut visualizer_config = VisualizerConfig::default().with_interval_ms(args.interval_ms);
    if let Some(model) = &args.model {
        visualizer_config = visualizer_config.with_model_path(model);
    }
    let mut visualizer = Visualizer::load(synth, visualizer_config);
    info!("{}", visualizer.ui().status);

    std::fs::create_dir_all(&args.output)?;

    if args.watch {
        if !visualizer.start() {
            error!("{}, not starting", visualizer.ui().status);
            return Ok(());
        }
        let interrupted = tokio::select! {
            result = visualizer.join() => {
                result?;
                false
            }
            _ = tokio::signal::ctrl_c() => true,
        };
        if interrupted {
            visualizer.stop();
            visualizer.join().await?;
        }
        let path = args.output.join("last.png");
        visualizer.with_surface(|surface| surface.save(&path)).await?;
        info!("saved {}", path.display());
        return Ok(());
    }

    for i in 0..args.cycles {
        match visualizer.run_cycle().await {
            Ok(Some(report)) => {
                info!(
                    "cycle {i}: true {} {:?}, predicted {:?}, {:.2} ms",
                    report.true_class,
                    report.true_box,
                    report.predicted_class,
                    report.inference_time.as_secs_f64() * 1000.0
                );
            }
            Ok(None) => continue,
            Err(e) => {
                error!("cycle {i} failed: {e}");
                continue;
            }
        }
        let path = args.output.join(format!("example_{i}.png"));
        visualizer.with_surface(|surface| surface.save(&path)).await?;
        info!("saved {}", path.display());
    }

    Ok(())
}
