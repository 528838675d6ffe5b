//! 2x2 色度 DC Hadamard 变换 (4:2:0).
//!
//! 色度 4 个 4x4 块的 DC 系数组成 2x2 块, 做一次 Hadamard 变换后量化
//! (H.264 Recommendation (03/2005) 8.6.3). DC 路径全部使用 NORM_ADJUST
//! 的 (0,0) 位置乘数; 前向舍入偏置为普通系数的两倍, 移位多一位.
//!
//! 反向的移位量与 QP 无关: 先左移 QP/6 再统一右移 5.

use super::{ParamId, TransformMode};

/// 2x2 DC 前向变换器
pub struct ForwardTransformDc2x2 {
    mode: TransformMode,
    q: i32,
    qm: usize,
    qe: i32,
    f: i32,
    scale: i32,
}

/// DC 位置量化乘数, 行 = QP % 6
const FWD_NORM_ADJUST: [i32; 6] = [13107, 11916, 10082, 9362, 8192, 7282];

impl Default for ForwardTransformDc2x2 {
    fn default() -> Self {
        Self::new()
    }
}

impl ForwardTransformDc2x2 {
    pub fn new() -> Self {
        let mut t = Self {
            mode: TransformMode::default(),
            q: 1,
            qm: 1,
            qe: 0,
            f: 0,
            scale: 0,
        };
        t.update_quant();
        t
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TransformMode) {
        self.mode = mode;
    }

    /// 设置参数, 与 DC 量化无关的标识静默忽略
    pub fn set_parameter(&mut self, id: ParamId, value: i32) {
        match id {
            ParamId::Quant => {
                if value != self.q {
                    self.q = value;
                    self.update_quant();
                }
            }
            ParamId::IntraFlag => {}
        }
    }

    pub fn parameter(&self, id: ParamId) -> i32 {
        match id {
            ParamId::Quant | ParamId::IntraFlag => self.q,
        }
    }

    fn update_quant(&mut self) {
        self.qm = (self.q % 6) as usize;
        self.qe = self.q / 6;
        self.f = 2 * ((1 << (15 + self.qe)) / 3);
        self.scale = 16 + self.qe;
    }

    #[inline]
    fn quantize(&self, x: i32) -> i16 {
        let level = (x.abs() * FWD_NORM_ADJUST[self.qm] + self.f) >> self.scale;
        if x < 0 { -level as i16 } else { level as i16 }
    }

    /// 原地变换一个 2x2 DC 块 (光栅序)
    pub fn transform(&self, block: &mut [i16; 4]) {
        if self.mode == TransformMode::QuantOnly {
            for v in block.iter_mut() {
                *v = self.quantize(i32::from(*v));
            }
            return;
        }

        let b: [i32; 4] = [
            i32::from(block[0]),
            i32::from(block[1]),
            i32::from(block[2]),
            i32::from(block[3]),
        ];
        let s0 = b[0] + b[1];
        let s2 = b[0] - b[1];
        let s1 = b[2] + b[3];
        let s3 = b[2] - b[3];

        if self.mode == TransformMode::TransformAndQuant {
            block[0] = self.quantize(s0 + s1);
            block[2] = self.quantize(s0 - s1);
            block[1] = self.quantize(s2 + s3);
            block[3] = self.quantize(s2 - s3);
        } else {
            block[0] = (s0 + s1) as i16;
            block[2] = (s0 - s1) as i16;
            block[1] = (s2 + s3) as i16;
            block[3] = (s2 - s3) as i16;
        }
    }

    /// 从 `src` 读入, 变换结果写入 `dst`, `src` 不被修改
    pub fn transform_to(&self, src: &[i16; 4], dst: &mut [i16; 4]) {
        dst.copy_from_slice(src);
        self.transform(dst);
    }
}

/// 2x2 DC 反向变换器
pub struct InverseTransformDc2x2 {
    mode: TransformMode,
    q: i32,
    qm: usize,
    qe: i32,
    weight_scale: [i32; 4],
    level_scale: [[i32; 4]; 6],
}

/// DC 位置反量化乘数, 行 = QP % 6
const INV_NORM_ADJUST: [i32; 6] = [10, 11, 13, 14, 16, 18];

impl Default for InverseTransformDc2x2 {
    fn default() -> Self {
        Self::new()
    }
}

impl InverseTransformDc2x2 {
    pub fn new() -> Self {
        let mut t = Self {
            mode: TransformMode::default(),
            q: 1,
            qm: 1,
            qe: 0,
            weight_scale: [16; 4],
            level_scale: [[0; 4]; 6],
        };
        t.rebuild_level_scale();
        t
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TransformMode) {
        self.mode = mode;
    }

    pub fn set_parameter(&mut self, id: ParamId, value: i32) {
        match id {
            ParamId::Quant => {
                if value != self.q {
                    self.q = value;
                    self.qm = (self.q % 6) as usize;
                    self.qe = self.q / 6;
                }
            }
            ParamId::IntraFlag => {}
        }
    }

    pub fn parameter(&self, id: ParamId) -> i32 {
        match id {
            ParamId::Quant | ParamId::IntraFlag => self.q,
        }
    }

    /// 设置 2x2 加权矩阵并重建 levelScale 表
    pub fn set_scale(&mut self, weights: &[i32; 4]) {
        self.weight_scale = *weights;
        self.rebuild_level_scale();
    }

    pub fn scale(&self) -> &[i32; 4] {
        &self.weight_scale
    }

    fn rebuild_level_scale(&mut self) {
        for (qm, row) in self.level_scale.iter_mut().enumerate() {
            for (pos, entry) in row.iter_mut().enumerate() {
                *entry = INV_NORM_ADJUST[qm] * self.weight_scale[pos];
            }
        }
    }

    #[inline]
    fn normalize(&self, x: i32) -> i16 {
        ((x << self.qe) >> 5) as i16
    }

    /// 原地反变换一个 2x2 DC 块 (光栅序)
    pub fn transform(&self, block: &mut [i16; 4]) {
        let ls = &self.level_scale[self.qm];

        if self.mode == TransformMode::QuantOnly {
            for (pos, v) in block.iter_mut().enumerate() {
                *v = self.normalize(i32::from(*v) * ls[pos]);
            }
            return;
        }

        let b: [i32; 4] = [
            i32::from(block[0]),
            i32::from(block[1]),
            i32::from(block[2]),
            i32::from(block[3]),
        ];
        let s0 = b[0] + b[1];
        let s2 = b[0] - b[1];
        let s1 = b[2] + b[3];
        let s3 = b[2] - b[3];

        if self.mode == TransformMode::TransformAndQuant {
            block[0] = self.normalize((s0 + s1) * ls[0]);
            block[2] = self.normalize((s0 - s1) * ls[2]);
            block[1] = self.normalize((s2 + s3) * ls[1]);
            block[3] = self.normalize((s2 - s3) * ls[3]);
        } else {
            block[0] = (s0 + s1) as i16;
            block[2] = (s0 - s1) as i16;
            block[1] = (s2 + s3) as i16;
            block[3] = (s2 - s3) as i16;
        }
    }

    /// 从 `src` 读入, 反变换结果写入 `dst`, `src` 不被修改
    pub fn transform_to(&self, src: &[i16; 4], dst: &mut [i16; 4]) {
        dst.copy_from_slice(src);
        self.transform(dst);
    }
}
