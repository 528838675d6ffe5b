//! 前向 4x4 整数变换与量化.
//!
//! 蝶形结构的 4x4 整数 DCT 近似 (H.264 Recommendation (03/2005) 8.6.1),
//! 量化合并在列变换的输出端完成: level = (|coeff| * MF + f) >> (15 + QP/6),
//! MF 按系数位置从 NORM_ADJUST[QP%6] 中选取. 负值先取绝对值量化再取负,
//! 与正值的舍入不对称.

use super::{ParamId, TransformMode};

/// 量化乘数表, 行 = QP % 6, 列按 (偶偶 / 奇奇 / 混合) 位置分类
const NORM_ADJUST: [[i32; 3]; 6] = [
    [13107, 5243, 8066],
    [11916, 4660, 7490],
    [10082, 4194, 6554],
    [9362, 3647, 5825],
    [8192, 3355, 5243],
    [7282, 2893, 4559],
];

/// 位置 -> NORM_ADJUST 列的映射, 按光栅序
const COL_SELECTOR: [usize; 16] = [0, 2, 0, 2, 2, 1, 2, 1, 0, 2, 0, 2, 2, 1, 2, 1];

/// 前向 4x4 变换器
///
/// 量化常数在 QP 或帧内标志变更时重算一次, 之后的 `transform` 调用只做
/// 乘加与移位.
pub struct ForwardTransform4x4 {
    mode: TransformMode,
    intra: i32,
    q: i32,
    qm: usize,
    qe: i32,
    f: i32,
    scale: i32,
}

impl Default for ForwardTransform4x4 {
    fn default() -> Self {
        Self::new()
    }
}

impl ForwardTransform4x4 {
    pub fn new() -> Self {
        let mut t = Self {
            mode: TransformMode::default(),
            intra: 1,
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

    /// 设置参数. 未识别的参数标识静默忽略; QP 仅在值变化时触发重算.
    pub fn set_parameter(&mut self, id: ParamId, value: i32) {
        match id {
            ParamId::Quant => {
                if value != self.q {
                    self.q = value;
                    self.update_quant();
                }
            }
            ParamId::IntraFlag => {
                self.intra = value;
                self.update_quant();
            }
        }
    }

    /// 读取参数. 未识别的标识回落为 QP.
    pub fn parameter(&self, id: ParamId) -> i32 {
        match id {
            ParamId::IntraFlag => self.intra,
            ParamId::Quant => self.q,
        }
    }

    fn update_quant(&mut self) {
        self.qm = (self.q % 6) as usize;
        self.qe = self.q / 6;
        // 帧内块舍入偏置 2^bits/3, 帧间 2^bits/6
        let bits = 15 + self.qe;
        self.f = if self.intra != 0 {
            (1 << bits) / 3
        } else {
            (1 << bits) / 6
        };
        self.scale = bits;
    }

    #[inline]
    fn quantize(&self, x: i32, pos: usize) -> i16 {
        let mf = NORM_ADJUST[self.qm][COL_SELECTOR[pos]];
        let level = (x.abs() * mf + self.f) >> self.scale;
        if x < 0 { -level as i16 } else { level as i16 }
    }

    /// 原地变换一个 4x4 残差块 (光栅序)
    pub fn transform(&self, block: &mut [i16; 16]) {
        match self.mode {
            TransformMode::QuantOnly => {
                for pos in 0..16 {
                    block[pos] = self.quantize(i32::from(block[pos]), pos);
                }
                return;
            }
            TransformMode::TransformAndQuant | TransformMode::TransformOnly => {}
        }

        let mut b = [0i32; 16];
        for (dst, src) in b.iter_mut().zip(block.iter()) {
            *dst = i32::from(*src);
        }

        // 行变换
        for j in (0..16).step_by(4) {
            let s0 = b[j] + b[j + 3];
            let s3 = b[j] - b[j + 3];
            let s1 = b[j + 1] + b[j + 2];
            let s2 = b[j + 1] - b[j + 2];
            b[j] = s0 + s1;
            b[j + 2] = s0 - s1;
            b[j + 1] = s2 + (s3 << 1);
            b[j + 3] = s3 - (s2 << 1);
        }

        // 列变换, 合并量化时直接写出 level
        for j in 0..4 {
            let s0 = b[j] + b[j + 12];
            let s3 = b[j] - b[j + 12];
            let s1 = b[j + 4] + b[j + 8];
            let s2 = b[j + 4] - b[j + 8];
            let c0 = s0 + s1;
            let c2 = s0 - s1;
            let c1 = s2 + (s3 << 1);
            let c3 = s3 - (s2 << 1);

            if self.mode == TransformMode::TransformAndQuant {
                block[j] = self.quantize(c0, j);
                block[j + 8] = self.quantize(c2, j + 8);
                block[j + 4] = self.quantize(c1, j + 4);
                block[j + 12] = self.quantize(c3, j + 12);
            } else {
                block[j] = c0 as i16;
                block[j + 8] = c2 as i16;
                block[j + 4] = c1 as i16;
                block[j + 12] = c3 as i16;
            }
        }
    }

    /// 从 `src` 读入, 变换结果写入 `dst`, `src` 不被修改
    pub fn transform_to(&self, src: &[i16; 16], dst: &mut [i16; 16]) {
        dst.copy_from_slice(src);
        self.transform(dst);
    }
}
