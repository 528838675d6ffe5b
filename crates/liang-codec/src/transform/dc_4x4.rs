//! 4x4 亮度 DC Hadamard 变换 (intra16x16).
//!
//! intra16x16 宏块 16 个 4x4 块的 DC 系数组成 4x4 块, 做二维 Hadamard
//! 变换 (H.264 Recommendation (03/2005) 8.6.3). 前向在列变换输出端先
//! 右移一位再量化; 反向先做两趟蝶形, 再按 levelScale 放大并归一,
//! QP >= 36 时切换为左移放大.

use super::{ParamId, TransformMode};

/// DC 位置量化乘数, 行 = QP % 6
const FWD_NORM_ADJUST: [i32; 6] = [13107, 11916, 10082, 9362, 8192, 7282];

/// DC 位置反量化乘数, 行 = QP % 6
const INV_NORM_ADJUST: [i32; 6] = [10, 11, 13, 14, 16, 18];

/// 4x4 DC 前向变换器
pub struct ForwardTransformDc4x4 {
    mode: TransformMode,
    q: i32,
    qm: usize,
    qe: i32,
    f: i32,
    scale: i32,
}

impl Default for ForwardTransformDc4x4 {
    fn default() -> Self {
        Self::new()
    }
}

impl ForwardTransformDc4x4 {
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

    /// 原地变换一个 4x4 DC 块 (光栅序)
    pub fn transform(&self, block: &mut [i16; 16]) {
        if self.mode == TransformMode::QuantOnly {
            for v in block.iter_mut() {
                *v = self.quantize(i32::from(*v));
            }
            return;
        }

        let mut b = [0i32; 16];
        for (dst, src) in b.iter_mut().zip(block.iter()) {
            *dst = i32::from(*src);
        }

        // 行 Hadamard
        for j in (0..16).step_by(4) {
            let s0 = b[j] + b[j + 3];
            let s3 = b[j] - b[j + 3];
            let s1 = b[j + 1] + b[j + 2];
            let s2 = b[j + 1] - b[j + 2];
            b[j] = s0 + s1;
            b[j + 2] = s0 - s1;
            b[j + 1] = s2 + s3;
            b[j + 3] = s3 - s2;
        }

        // 列 Hadamard, 输出端先折半
        for j in 0..4 {
            let s0 = b[j] + b[j + 12];
            let s3 = b[j] - b[j + 12];
            let s1 = b[j + 4] + b[j + 8];
            let s2 = b[j + 4] - b[j + 8];
            let x0 = (s0 + s1) >> 1;
            let x2 = (s0 - s1) >> 1;
            let x1 = (s2 + s3) >> 1;
            let x3 = (s3 - s2) >> 1;

            if self.mode == TransformMode::TransformAndQuant {
                block[j] = self.quantize(x0);
                block[j + 8] = self.quantize(x2);
                block[j + 4] = self.quantize(x1);
                block[j + 12] = self.quantize(x3);
            } else {
                block[j] = x0 as i16;
                block[j + 8] = x2 as i16;
                block[j + 4] = x1 as i16;
                block[j + 12] = x3 as i16;
            }
        }
    }

    /// 从 `src` 读入, 变换结果写入 `dst`, `src` 不被修改
    pub fn transform_to(&self, src: &[i16; 16], dst: &mut [i16; 16]) {
        dst.copy_from_slice(src);
        self.transform(dst);
    }
}

/// 4x4 DC 反向变换器
pub struct InverseTransformDc4x4 {
    mode: TransformMode,
    q: i32,
    qm: usize,
    qe: i32,
    weight_scale: [i32; 16],
    level_scale: [[i32; 16]; 6],
}

impl Default for InverseTransformDc4x4 {
    fn default() -> Self {
        Self::new()
    }
}

impl InverseTransformDc4x4 {
    pub fn new() -> Self {
        let mut t = Self {
            mode: TransformMode::default(),
            q: 1,
            qm: 1,
            qe: 0,
            weight_scale: [16; 16],
            level_scale: [[0; 16]; 6],
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

    /// 设置 4x4 加权矩阵并重建 levelScale 表
    pub fn set_scale(&mut self, weights: &[i32; 16]) {
        self.weight_scale = *weights;
        self.rebuild_level_scale();
    }

    pub fn scale(&self) -> &[i32; 16] {
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
        // QP < 36 时 (x + f) >> (6 - qe), 否则左移 qe - 6
        if self.q < 36 {
            ((x + (1 << (5 - self.qe))) >> (6 - self.qe)) as i16
        } else {
            (x << (self.qe - 6)) as i16
        }
    }

    /// 原地反变换一个 4x4 DC 块 (光栅序)
    pub fn transform(&self, block: &mut [i16; 16]) {
        let ls = &self.level_scale[self.qm];

        if self.mode == TransformMode::QuantOnly {
            for (pos, v) in block.iter_mut().enumerate() {
                *v = self.normalize(i32::from(*v) * ls[pos]);
            }
            return;
        }

        let mut b = [0i32; 16];
        for (dst, src) in b.iter_mut().zip(block.iter()) {
            *dst = i32::from(*src);
        }

        // 列 Hadamard
        for j in 0..4 {
            let s0 = b[j] + b[8 + j];
            let s1 = b[j] - b[8 + j];
            let s2 = b[4 + j] - b[12 + j];
            let s3 = b[4 + j] + b[12 + j];
            b[j] = s0 + s3;
            b[12 + j] = s0 - s3;
            b[4 + j] = s1 + s2;
            b[8 + j] = s1 - s2;
        }

        // 行 Hadamard, 合并反量化时在输出端放大并归一
        for j in (0..16).step_by(4) {
            let s0 = b[j] + b[2 + j];
            let s1 = b[j] - b[2 + j];
            let s2 = b[1 + j] - b[3 + j];
            let s3 = b[1 + j] + b[3 + j];
            let x0 = s0 + s3;
            let x3 = s0 - s3;
            let x1 = s1 + s2;
            let x2 = s1 - s2;

            if self.mode == TransformMode::TransformAndQuant {
                block[j] = self.normalize(x0 * ls[j]);
                block[3 + j] = self.normalize(x3 * ls[3 + j]);
                block[1 + j] = self.normalize(x1 * ls[1 + j]);
                block[2 + j] = self.normalize(x2 * ls[2 + j]);
            } else {
                block[j] = x0 as i16;
                block[3 + j] = x3 as i16;
                block[1 + j] = x1 as i16;
                block[2 + j] = x2 as i16;
            }
        }
    }

    /// 从 `src` 读入, 反变换结果写入 `dst`, `src` 不被修改
    pub fn transform_to(&self, src: &[i16; 16], dst: &mut [i16; 16]) {
        dst.copy_from_slice(src);
        self.transform(dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_constant_block() {
        // QP = 0, 常数块 16: 二维 Hadamard 后 DC = 256, 折半 128,
        // level = (128*13107 + 21844) >> 16 = 25
        let mut t = ForwardTransformDc4x4::new();
        t.set_parameter(ParamId::Quant, 0);

        let mut block = [16i16; 16];
        t.transform(&mut block);
        assert_eq!(block[0], 25);
        assert!(block[1..].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_forward_transform_only_halves() {
        let mut t = ForwardTransformDc4x4::new();
        t.set_mode(TransformMode::TransformOnly);

        let mut block = [16i16; 16];
        t.transform(&mut block);
        assert_eq!(block[0], 128);
        assert!(block[1..].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_inverse_dc_only() {
        // QP = 0: DC 级 4 -> 每个位置 (4*160 + 32) >> 6 = 10
        let mut t = InverseTransformDc4x4::new();
        t.set_parameter(ParamId::Quant, 0);

        let mut block = [0i16; 16];
        block[0] = 4;
        t.transform(&mut block);
        assert_eq!(block, [10i16; 16]);
    }

    #[test]
    fn test_inverse_high_qp_left_shift() {
        // QP = 36: qe = 6, 左移路径, 移位量为 0
        let mut t = InverseTransformDc4x4::new();
        t.set_parameter(ParamId::Quant, 36);

        let mut block = [0i16; 16];
        block[0] = 1;
        t.transform(&mut block);
        assert_eq!(block, [160i16; 16]);
    }

    #[test]
    fn test_inverse_quant_only() {
        let mut t = InverseTransformDc4x4::new();
        t.set_mode(TransformMode::QuantOnly);
        t.set_parameter(ParamId::Quant, 0);

        let mut block = [0i16; 16];
        block[0] = 1;
        t.transform(&mut block);
        assert_eq!(block[0], 3);
        assert!(block[1..].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_set_scale_doubles_output() {
        let mut t = InverseTransformDc4x4::new();
        t.set_parameter(ParamId::Quant, 0);
        t.set_scale(&[32; 16]);

        let mut block = [0i16; 16];
        block[0] = 4;
        t.transform(&mut block);
        // ls = 10*32 = 320, (4*320 + 32) >> 6 = 20
        assert_eq!(block, [20i16; 16]);
    }

    #[test]
    fn test_negative_dc_symmetry() {
        let t = ForwardTransformDc4x4::new();
        let mut pos = [6i16; 16];
        let mut neg = [-6i16; 16];
        t.transform(&mut pos);
        t.transform(&mut neg);
        for i in 0..16 {
            assert_eq!(neg[i], -pos[i], "pos {i}");
        }
    }
}
