//! 反向 4x4 整数变换与反量化.
//!
//! 量化级先按 levelScale[QP%6][pos] 放大并按 QP/6 移位, 再做两趟蝶形
//! 反变换, 最后 (x + 32) >> 6 归一 (H.264 Recommendation (03/2005) 8.6.2).
//!
//! levelScale 由标准乘数与 4x4 加权矩阵的逐点乘积构成, 在构造与
//! `set_scale` 时对 QP%6 的全部 6 个余数一次性预计算.

use super::{ParamId, TransformMode};

/// 反量化乘数表, 行 = QP % 6, 列按系数位置分类
const NORM_ADJUST: [[i32; 3]; 6] = [
    [10, 16, 13],
    [11, 18, 14],
    [13, 20, 16],
    [14, 23, 18],
    [16, 25, 20],
    [18, 29, 23],
];

const COL_SELECTOR: [usize; 16] = [0, 2, 0, 2, 2, 1, 2, 1, 0, 2, 0, 2, 2, 1, 2, 1];

/// 反向 4x4 变换器
pub struct InverseTransform4x4 {
    mode: TransformMode,
    q: i32,
    qm: usize,
    qe: i32,
    f: i32,
    left_scale: i32,
    right_scale: i32,
    weight_scale: [i32; 16],
    level_scale: [[i32; 16]; 6],
}

impl Default for InverseTransform4x4 {
    fn default() -> Self {
        Self::new()
    }
}

impl InverseTransform4x4 {
    pub fn new() -> Self {
        let mut t = Self {
            mode: TransformMode::default(),
            q: 1,
            qm: 1,
            qe: 0,
            f: 0,
            left_scale: 0,
            right_scale: 0,
            weight_scale: [16; 16],
            level_scale: [[0; 16]; 6],
        };
        t.rebuild_level_scale();
        t.update_quant();
        t
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TransformMode) {
        self.mode = mode;
    }

    /// 设置参数. 帧内标志与反变换无关, 静默忽略.
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

    /// 读取参数, 未区分的标识回落为 QP
    pub fn parameter(&self, id: ParamId) -> i32 {
        match id {
            ParamId::Quant | ParamId::IntraFlag => self.q,
        }
    }

    /// 设置 4x4 加权矩阵并重建全部 levelScale 表
    pub fn set_scale(&mut self, weights: &[i32; 16]) {
        self.weight_scale = *weights;
        self.rebuild_level_scale();
    }

    /// 当前加权矩阵
    pub fn scale(&self) -> &[i32; 16] {
        &self.weight_scale
    }

    fn rebuild_level_scale(&mut self) {
        for (qm, row) in self.level_scale.iter_mut().enumerate() {
            for (pos, entry) in row.iter_mut().enumerate() {
                *entry = NORM_ADJUST[qm][COL_SELECTOR[pos]] * self.weight_scale[pos];
            }
        }
    }

    fn update_quant(&mut self) {
        self.qm = (self.q % 6) as usize;
        self.qe = self.q / 6;
        // QP < 24 时右移归一, 否则左移放大, 移位量不为负
        if self.q < 24 {
            self.f = 1 << (3 - self.qe);
            self.right_scale = 4 - self.qe;
            self.left_scale = 0;
        } else {
            self.f = 0;
            self.right_scale = 0;
            self.left_scale = self.qe - 4;
        }
    }

    #[inline]
    fn rescale(&self, level: i32, pos: usize) -> i32 {
        let x = level * self.level_scale[self.qm][pos];
        if self.q < 24 {
            (x + self.f) >> self.right_scale
        } else {
            x << self.left_scale
        }
    }

    /// 原地反变换一个 4x4 系数块 (光栅序)
    pub fn transform(&self, block: &mut [i16; 16]) {
        match self.mode {
            TransformMode::QuantOnly => {
                for pos in 0..16 {
                    block[pos] = self.rescale(i32::from(block[pos]), pos) as i16;
                }
                return;
            }
            TransformMode::TransformAndQuant | TransformMode::TransformOnly => {}
        }

        let rescale = self.mode == TransformMode::TransformAndQuant;
        let mut b = [0i32; 16];
        for (pos, (dst, src)) in b.iter_mut().zip(block.iter()).enumerate() {
            *dst = if rescale {
                self.rescale(i32::from(*src), pos)
            } else {
                i32::from(*src)
            };
        }

        // 行变换
        for j in (0..16).step_by(4) {
            let x0 = b[j];
            let x1 = b[j + 1];
            let x2 = b[j + 2];
            let x3 = b[j + 3];
            let s0 = x0 + x2;
            let s1 = x0 - x2;
            let s2 = (x1 >> 1) - x3;
            let s3 = x1 + (x3 >> 1);
            b[j] = s0 + s3;
            b[j + 3] = s0 - s3;
            b[j + 1] = s1 + s2;
            b[j + 2] = s1 - s2;
        }

        // 列变换, 输出端 (x + 32) >> 6 归一
        for j in 0..4 {
            let s0 = b[j] + b[j + 8];
            let s1 = b[j] - b[j + 8];
            let s2 = (b[j + 4] >> 1) - b[j + 12];
            let s3 = b[j + 4] + (b[j + 12] >> 1);
            block[j] = ((s0 + s3 + 32) >> 6) as i16;
            block[j + 12] = ((s0 - s3 + 32) >> 6) as i16;
            block[j + 4] = ((s1 + s2 + 32) >> 6) as i16;
            block[j + 8] = ((s1 - s2 + 32) >> 6) as i16;
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
    use crate::transform::ForwardTransform4x4;

    #[test]
    fn test_dc_only_reconstruction() {
        // QP = 0: DC 级 4 -> levelScale 160 -> 40 -> 全 1 块
        let mut t = InverseTransform4x4::new();
        t.set_parameter(ParamId::Quant, 0);

        let mut block = [0i16; 16];
        block[0] = 4;
        t.transform(&mut block);
        assert_eq!(block, [1i16; 16]);
    }

    #[test]
    fn test_forward_inverse_roundtrip_within_one() {
        // QP = 6 时前向/反向级联, 重建误差不超过 ±1
        let mut fwd = ForwardTransform4x4::new();
        let mut inv = InverseTransform4x4::new();
        fwd.set_parameter(ParamId::Quant, 6);
        inv.set_parameter(ParamId::Quant, 6);

        let mut block = [0i16; 16];
        block[0] = 16;
        fwd.transform(&mut block);
        assert_eq!(block, [3, 4, 3, 2, 4, 5, 4, 2, 3, 4, 3, 2, 2, 2, 2, 1]);

        inv.transform(&mut block);
        assert_eq!(block[0], 16);
        for (i, &v) in block.iter().enumerate().skip(1) {
            assert!(v.abs() <= 1, "pos {i}: {v}");
        }
    }

    #[test]
    fn test_high_qp_left_shift_path() {
        // QP = 24: qe = 4, 放大路径, 移位量为 0
        let mut t = InverseTransform4x4::new();
        t.set_parameter(ParamId::Quant, 24);
        assert_eq!(t.parameter(ParamId::Quant), 24);

        let mut block = [0i16; 16];
        block[0] = 1;
        t.transform(&mut block);
        // DC 级 1 -> 160, 两趟蝶形后 (160+32)>>6 = 3
        assert_eq!(block, [3i16; 16]);
    }

    #[test]
    fn test_transform_only_ignores_scale() {
        let mut t = InverseTransform4x4::new();
        t.set_mode(TransformMode::TransformOnly);

        let mut block = [0i16; 16];
        block[0] = 64;
        t.transform(&mut block);
        // 两趟蝶形后 (64 + 32) >> 6 = 1
        assert_eq!(block, [1i16; 16]);
    }

    #[test]
    fn test_quant_only_rescales() {
        let mut t = InverseTransform4x4::new();
        t.set_mode(TransformMode::QuantOnly);
        t.set_parameter(ParamId::Quant, 0);

        let mut block = [0i16; 16];
        block[0] = 2;
        block[1] = 1;
        t.transform(&mut block);
        // (2*160 + 8) >> 4 = 20, (1*208 + 8) >> 4 = 13
        assert_eq!(block[0], 20);
        assert_eq!(block[1], 13);
    }

    #[test]
    fn test_set_scale_rebuilds_level_scale() {
        let mut t = InverseTransform4x4::new();
        t.set_parameter(ParamId::Quant, 0);

        let mut weights = [16i32; 16];
        weights[0] = 32;
        t.set_scale(&weights);
        assert_eq!(t.scale()[0], 32);

        let mut t2 = InverseTransform4x4::new();
        t2.set_parameter(ParamId::Quant, 0);
        t2.set_mode(TransformMode::QuantOnly);
        t.set_mode(TransformMode::QuantOnly);

        let mut a = [0i16; 16];
        a[0] = 1;
        let mut b = a;
        t.transform(&mut a);
        t2.transform(&mut b);
        // 权重翻倍, 反量化结果随之翻倍 (舍入前)
        assert_eq!(a[0], 20);
        assert_eq!(b[0], 10);
    }

    #[test]
    fn test_intra_flag_is_ignored() {
        let mut t = InverseTransform4x4::new();
        let q = t.parameter(ParamId::Quant);
        t.set_parameter(ParamId::IntraFlag, 0);
        assert_eq!(t.parameter(ParamId::Quant), q);
        assert_eq!(t.parameter(ParamId::IntraFlag), q);
    }
}
