//! 随机数来源
//!
//! 所有图形参数都从 `RandomSource` 取值，测试时可替换为固定种子或固定序列。

use rand::{Rng, SeedableRng, rngs::ThreadRng};
use rand_pcg::Pcg64;

/// 随机数能力接口
pub trait RandomSource: Send {
    /// `[0, 1)` 上的均匀浮点数
    fn uniform(&mut self) -> f32;

    /// `[min, max)` 上的均匀整数；`max <= min` 时返回 `min`
    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = (max - min) as f32;
        // 浮点舍入可能恰好落在上界，夹回区间内
        min + ((self.uniform() * span).floor() as i64).min(max - min - 1)
    }
}

/// 基于 PCG 的可复现随机源
pub struct SeededSource {
    rng: Pcg64,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self { rng: Pcg64::seed_from_u64(seed) }
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self) -> f32 {
        self.rng.gen_range(0.0..1.0)
    }

    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min { min } else { self.rng.gen_range(min..max) }
    }
}

/// 每次取值都走线程本地随机数生成器
///
/// `ThreadRng` 不是 `Send`，因此不持有它，只在取值时临时获取。
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSource;

impl ThreadSource {
    fn rng() -> ThreadRng {
        rand::thread_rng()
    }
}

impl RandomSource for ThreadSource {
    fn uniform(&mut self) -> f32 {
        Self::rng().gen_range(0.0..1.0)
    }

    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min { min } else { Self::rng().gen_range(min..max) }
    }
}

/// 循环回放一组固定取值，用于精确控制图形参数
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    /// `values` 为空时恒返回0；取值会被夹到 `[0, 1)`
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// 已经取出的数量
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn uniform(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self) -> f32 {
        (**self).uniform()
    }

    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        (**self).uniform_int(min, max)
    }
}
