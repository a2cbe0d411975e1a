//! 可视化控制器
//!
//! 一轮流程：合成样本 → 转换张量 → 推理（计时）→ 叠加边界框 → 比较类别。
//! 定时器与手动触发共用同一轮流程；同一时刻只允许一轮在跑，重叠的调用直接跳过。
//! 预测类别与真值不符时停止定时器并禁用手动触发。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::config::VisualizerConfig;
use crate::error::{Result, SynthError};
use crate::model::{InferenceModel, NullModel, OnnxModel, Prediction, ShapeClass};
use crate::synth::{BoundingBox, SceneSynthesizer, Surface};

pub const STATUS_LOADING: &str = "Loading model ...";
pub const STATUS_LOADED: &str = "Loaded model successfully. Now click \"Test Model\".";
pub const STATUS_LOAD_FAILED: &str = "Failed to load model";

/// 对外展示的界面状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub status: String,
    /// 手动触发是否可用
    pub test_enabled: bool,
    /// 最近一次推理耗时（毫秒）
    pub inference_ms: Option<f64>,
    pub true_class: Option<ShapeClass>,
    pub predicted_class: Option<ShapeClass>,
    /// 最近一次预测是否正确
    pub correct: Option<bool>,
}

/// 一轮流程的结果
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub true_box: BoundingBox,
    pub true_class: ShapeClass,
    /// 模型没有给出结果时为 None，本轮不做叠加
    pub prediction: Option<Prediction>,
    pub predicted_class: Option<ShapeClass>,
    pub inference_time: Duration,
}

impl CycleReport {
    pub fn is_mismatch(&self) -> bool {
        self.predicted_class.is_some_and(|class| class != self.true_class)
    }
}

struct Cycle {
    synth: SceneSynthesizer,
    model: Box<dyn InferenceModel>,
    input_size: usize,
}

impl Cycle {
    fn run(&mut self) -> Result<CycleReport> {
        let example = self.synth.generate_example();
        let (true_box, true_class) = (example.bounding_box, example.class);
        let input = example.surface.to_tensor(self.input_size)?;

        let start_time = Instant::now();
        let prediction = self.model.infer(&input)?;
        let inference_time = start_time.elapsed();
        debug!("inference took {inference_time:?}");

        let predicted_class = match &prediction {
            Some(prediction) => {
                self.synth.draw_prediction(&true_box, prediction)?;
                Some(prediction.class(self.synth.surface().width()))
            }
            None => None,
        };

        Ok(CycleReport {
            true_box,
            true_class,
            prediction,
            predicted_class,
            inference_time,
        })
    }
}

/// 定时任务与手动触发共享的状态
#[derive(Clone)]
struct Shared {
    cycle: Arc<AsyncMutex<Cycle>>,
    ui: Arc<Mutex<UiState>>,
    running: Arc<AtomicBool>,
}

impl Shared {
    fn update_ui<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        let mut ui = self.ui.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ui)
    }

    async fn run_cycle(&self) -> Result<Option<CycleReport>> {
        let Ok(mut guard) = Arc::clone(&self.cycle).try_lock_owned() else {
            warn!("previous cycle still running, skipping");
            return Ok(None);
        };

        let report = tokio::task::spawn_blocking(move || guard.run())
            .await
            .map_err(|e| SynthError::Task(e.to_string()))??;

        let mismatch = report.is_mismatch();
        self.update_ui(|ui| {
            ui.inference_ms = Some(report.inference_time.as_secs_f64() * 1000.0);
            ui.true_class = Some(report.true_class);
            if report.predicted_class.is_some() {
                ui.predicted_class = report.predicted_class;
                ui.correct = Some(!mismatch);
            }
            if mismatch {
                ui.test_enabled = false;
            }
        });

        if mismatch {
            // 断路：停止定时器
            self.running.store(false, Ordering::SeqCst);
            info!(
                "predicted {:?} but true class is {}, stopping",
                report.predicted_class, report.true_class
            );
        }
        Ok(Some(report))
    }
}

/// 可视化控制器
pub struct Visualizer {
    shared: Shared,
    config: VisualizerConfig,
    handle: Option<JoinHandle<()>>,
}

impl Visualizer {
    /// 使用已就绪的模型创建，手动触发立即可用
    pub fn new(synth: SceneSynthesizer, model: Box<dyn InferenceModel>, config: VisualizerConfig) -> Self {
        let cycle = Cycle { synth, model, input_size: config.input_size };
        let ui = UiState {
            status: STATUS_LOADED.to_string(),
            test_enabled: true,
            ..UiState::default()
        };
        Self {
            shared: Shared {
                cycle: Arc::new(AsyncMutex::new(cycle)),
                ui: Arc::new(Mutex::new(ui)),
                running: Arc::new(AtomicBool::new(false)),
            },
            config,
            handle: None,
        }
    }

    /// 按配置加载模型
    ///
    /// 未配置模型路径时使用 `NullModel`；加载失败时同样退回 `NullModel`，
    /// 状态改为加载失败并禁用手动触发。
    pub fn load(synth: SceneSynthesizer, config: VisualizerConfig) -> Self {
        info!("{STATUS_LOADING}");
        let loaded: Result<Box<dyn InferenceModel>> = match &config.model_path {
            Some(path) => OnnxModel::from_file(path).map(|m| Box::new(m) as Box<dyn InferenceModel>),
            None => Ok(Box::new(NullModel)),
        };

        match loaded {
            Ok(model) => {
                info!("{STATUS_LOADED}");
                Self::new(synth, model, config)
            }
            Err(e) => {
                warn!("{STATUS_LOAD_FAILED}: {e}");
                let visualizer = Self::new(synth, Box::new(NullModel), config);
                visualizer.shared.update_ui(|ui| {
                    ui.status = STATUS_LOAD_FAILED.to_string();
                    ui.test_enabled = false;
                });
                visualizer
            }
        }
    }

    pub fn ui(&self) -> UiState {
        self.shared.update_ui(|ui| ui.clone())
    }

    /// 执行一轮；若已有一轮在进行则返回 `Ok(None)`
    pub async fn run_cycle(&self) -> Result<Option<CycleReport>> {
        self.shared.run_cycle().await
    }

    /// 手动触发，断路后不再响应
    pub async fn trigger(&self) -> Result<Option<CycleReport>> {
        if !self.ui().test_enabled {
            debug!("trigger disabled");
            return Ok(None);
        }
        self.run_cycle().await
    }

    /// 启动定时循环，首轮立即执行
    ///
    /// 已在运行、模型加载失败或已断路时返回 false。
    pub fn start(&mut self) -> bool {
        if !self.ui().test_enabled {
            warn!("model unavailable or prediction failed, not starting");
            return false;
        }
        if self.shared.running.swap(true, Ordering::SeqCst) {
            return false;
        }

        let shared = self.shared.clone();
        let period = Duration::from_millis(self.config.interval_ms.max(1));
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            while shared.running.load(Ordering::SeqCst) {
                ticker.tick().await;
                if !shared.running.load(Ordering::SeqCst) {
                    break;
                }
                if let Err(e) = shared.run_cycle().await {
                    error!("cycle failed: {e}");
                }
            }
            debug!("periodic loop stopped");
        }));
        true
    }

    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// 等待定时任务结束
    pub async fn join(&mut self) -> Result<()> {
        if let Some(handle) = self.handle.take() {
            handle.await.map_err(|e| SynthError::Task(e.to_string()))?;
        }
        Ok(())
    }

    /// 在当前画布上执行只读操作（如保存图像）
    pub async fn with_surface<R>(&self, f: impl FnOnce(&Surface) -> R) -> R {
        let cycle = self.shared.cycle.lock().await;
        f(cycle.synth.surface())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SynthConfig;
    use ndarray::Array4;

    fn synth() -> SceneSynthesizer {
        SceneSynthesizer::seeded(SynthConfig::default(), 11)
    }

    #[tokio::test]
    async fn null_model_renders_nothing() {
        let visualizer = Visualizer::new(synth(), Box::new(NullModel), VisualizerConfig::default());
        let report = visualizer.run_cycle().await.unwrap().unwrap();
        assert!(report.prediction.is_none());
        assert!(!report.is_mismatch());
        let labels = visualizer.with_surface(|s| s.labels().len()).await;
        assert_eq!(labels, 0);
        assert!(visualizer.ui().test_enabled);
    }

    #[tokio::test]
    async fn overlapping_cycle_is_skipped() {
        let visualizer = Visualizer::new(synth(), Box::new(NullModel), VisualizerConfig::default());
        let _held = visualizer.shared.cycle.lock().await;
        assert!(visualizer.run_cycle().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mismatch_trips_breaker() {
        // 分数为0恒判为三角形，而目标是矩形
        let model = |_: &Array4<f32>| -> Result<Option<Prediction>> {
            Ok(Some(Prediction {
                bounding_box: BoundingBox::new(10.0, 50.0, 10.0, 50.0),
                class_score: 0.0,
            }))
        };
        let config = VisualizerConfig::default().with_interval_ms(10);
        let mut visualizer = Visualizer::new(synth(), Box::new(model), config);
        assert!(visualizer.start());
        visualizer.join().await.unwrap();

        let ui = visualizer.ui();
        assert!(!visualizer.is_running());
        assert!(!ui.test_enabled);
        assert_eq!(ui.correct, Some(false));
        assert_eq!(ui.predicted_class, Some(ShapeClass::Triangle));
        assert!(visualizer.trigger().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn correct_prediction_keeps_loop_running() {
        // 分数超过半宽恒判为矩形，与目标一致
        let model = |_: &Array4<f32>| -> Result<Option<Prediction>> {
            Ok(Some(Prediction {
                bounding_box: BoundingBox::new(10.0, 50.0, 10.0, 50.0),
                class_score: 200.0,
            }))
        };
        let config = VisualizerConfig::default().with_interval_ms(5);
        let mut visualizer = Visualizer::new(synth(), Box::new(model), config);
        assert!(visualizer.start());
        assert!(!visualizer.start());
        for _ in 0..200 {
            if visualizer.ui().correct.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let ui = visualizer.ui();
        assert!(visualizer.is_running());
        assert!(ui.test_enabled);
        assert_eq!(ui.correct, Some(true));
        assert_eq!(ui.true_class, Some(ShapeClass::Rectangle));
        assert_eq!(ui.predicted_class, Some(ShapeClass::Rectangle));

        visualizer.stop();
        visualizer.join().await.unwrap();
        assert!(!visualizer.is_running());

        // 定时任务结束后手动触发仍可用，且一次完成叠加
        let report = visualizer.trigger().await.unwrap().unwrap();
        assert!(!report.is_mismatch());
        let labels = visualizer.with_surface(|s| s.labels().len()).await;
        assert_eq!(labels, 2);
    }

    #[tokio::test]
    async fn tripped_breaker_refuses_restart() {
        let model = |_: &Array4<f32>| -> Result<Option<Prediction>> {
            Ok(Some(Prediction {
                bounding_box: BoundingBox::new(10.0, 50.0, 10.0, 50.0),
                class_score: 0.0,
            }))
        };
        let config = VisualizerConfig::default().with_interval_ms(10);
        let mut visualizer = Visualizer::new(synth(), Box::new(model), config);
        assert!(visualizer.start());
        visualizer.join().await.unwrap();

        assert!(!visualizer.start());
        assert!(!visualizer.is_running());
    }

    #[tokio::test]
    async fn missing_model_file_downgrades_status() {
        let config = VisualizerConfig::default().with_model_path("does/not/exist.onnx");
        let mut visualizer = Visualizer::load(synth(), config);
        let ui = visualizer.ui();
        assert_eq!(ui.status, STATUS_LOAD_FAILED);
        assert!(!ui.test_enabled);
        assert!(!visualizer.start());
        assert!(!visualizer.is_running());
    }
}
