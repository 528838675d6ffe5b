//! coeff_token 编解码器.
//!
//! CAVLC 的首个语法元素: 把 (totalCoeffs, trailingOnes) 两个相关符号合并为
//! 一次码表查询. 上下文由邻块非零系数数 nC 选择, 共六张码表
//! (H.264 Recommendation (03/2005) 表 9-5):
//! nC 0-1 / 2-3 / 4-7 / >=8 四组, 外加 2x2 与 2x4 色度 DC 两个特殊上下文.
//!
//! 行列边界: trailingOnes 0..3, totalCoeffs 0..16 (色度 DC 上下文为 0..4 /
//! 0..8). 越界索引属调用方违约, 此处直接 panic (等价于断言).

use liang_core::{BitReader, LiangResult};

use super::{VlcCode, c, read_prefix_code};

/// coeff_token 上下文, 决定使用哪张码表
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoeffTokenContext {
    /// 亮度或色度 AC 块, 携带邻块非零系数数 nC (>= 0)
    Neighbours(u32),
    /// 2x2 色度 DC 块 (4:2:0), 对应 nC = -1
    ChromaDc2x2,
    /// 2x4 色度 DC 块 (4:2:2), 对应 nC = -2
    ChromaDc2x4,
}

/// coeff_token 解码结果
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoeffToken {
    /// 块内非零系数总数
    pub total_coeffs: u32,
    /// 块尾 ±1 系数个数 (0..3)
    pub trailing_ones: u32,
}

/// coeff_token 编码器
#[derive(Default)]
pub struct CoeffTokenEncoder {
    num_code_bits: u32,
    bit_code: u32,
}

impl CoeffTokenEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次编码的码字位数
    pub fn num_coded_bits(&self) -> u32 {
        self.num_code_bits
    }

    /// 最近一次编码的码字
    pub fn code(&self) -> u32 {
        self.bit_code
    }

    /// 编码 (totalCoeffs, trailingOnes), 返回码字位数
    pub fn encode(&mut self, total_coeffs: u32, trailing_ones: u32, ctx: CoeffTokenContext) -> u32 {
        let to = trailing_ones as usize;
        let tc = total_coeffs as usize;

        let entry = match ctx {
            CoeffTokenContext::Neighbours(0 | 1) => NC_0_TO_1[to][tc],
            CoeffTokenContext::Neighbours(2 | 3) => NC_2_TO_3[to][tc],
            CoeffTokenContext::Neighbours(4..=7) => NC_4_TO_7[to][tc],
            CoeffTokenContext::Neighbours(_) => NC_8_UP[to][tc],
            CoeffTokenContext::ChromaDc2x2 => NC_CHROMA_DC_2X2[to][tc],
            CoeffTokenContext::ChromaDc2x4 => NC_CHROMA_DC_2X4[to][tc],
        };

        self.num_code_bits = entry.num_bits;
        self.bit_code = entry.code_word;
        self.num_code_bits
    }
}

/// coeff_token 解码器
///
/// 逐位读取并与所选码表做前缀匹配, 与标准判决树位精确一致.
#[derive(Default)]
pub struct CoeffTokenDecoder {
    num_code_bits: u32,
}

impl CoeffTokenDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次解码消费的位数 (0 表示解码失败)
    pub fn num_decoded_bits(&self) -> u32 {
        self.num_code_bits
    }

    /// 从码流解出 (totalCoeffs, trailingOnes)
    ///
    /// 读满所选码表的最大码长仍无匹配时返回全零 token 并把
    /// `num_decoded_bits` 置 0.
    pub fn decode(
        &mut self,
        br: &mut BitReader<'_>,
        ctx: CoeffTokenContext,
    ) -> LiangResult<CoeffToken> {
        self.num_code_bits = 0;

        let result = match ctx {
            CoeffTokenContext::Neighbours(0 | 1) => decode_from_table(br, &NC_0_TO_1)?,
            CoeffTokenContext::Neighbours(2 | 3) => decode_from_table(br, &NC_2_TO_3)?,
            CoeffTokenContext::Neighbours(4..=7) => decode_from_table(br, &NC_4_TO_7)?,
            CoeffTokenContext::Neighbours(_) => decode_from_table(br, &NC_8_UP)?,
            CoeffTokenContext::ChromaDc2x2 => decode_from_table(br, &NC_CHROMA_DC_2X2)?,
            CoeffTokenContext::ChromaDc2x4 => decode_from_table(br, &NC_CHROMA_DC_2X4)?,
        };

        match result {
            Some((token, len)) => {
                self.num_code_bits = len;
                Ok(token)
            }
            None => {
                log::debug!("coeff_token 解码失败, ctx={ctx:?}");
                Ok(CoeffToken::default())
            }
        }
    }
}

fn decode_from_table<const W: usize>(
    br: &mut BitReader<'_>,
    table: &'static [[VlcCode; W]; 4],
) -> LiangResult<Option<(CoeffToken, u32)>> {
    let max_bits = table
        .iter()
        .flatten()
        .map(|e| e.num_bits)
        .max()
        .unwrap_or(0);

    read_prefix_code(br, max_bits, |len, code| {
        for (to, row) in table.iter().enumerate() {
            for (tc, entry) in row.iter().enumerate() {
                if entry.num_bits == len && entry.code_word == code {
                    return Some(CoeffToken {
                        total_coeffs: tc as u32,
                        trailing_ones: to as u32,
                    });
                }
            }
        }
        None
    })
}

/*
---------------------------------------------------------------------------
    码表常量. 行 = trailingOnes (0..3), 列 = totalCoeffs.
---------------------------------------------------------------------------
*/

/// nC 0..1
static NC_0_TO_1: [[VlcCode; 17]; 4] = [
    [c( 1, 1), c( 6, 5), c( 8, 7), c( 9, 7), c(10, 7), c(11, 7), c(13,15), c(13,11), c(13, 8), c(14,15), c(14,11), c(15,15), c(15,11), c(16,15), c(16,11), c(16, 7), c(16, 4)],
    [c( 0, 0), c( 2, 1), c( 6, 4), c( 8, 6), c( 9, 6), c(10, 6), c(11, 6), c(13,14), c(13,10), c(14,14), c(14,10), c(15,14), c(15,10), c(15, 1), c(16,14), c(16,10), c(16, 6)],
    [c( 0, 0), c( 0, 0), c( 3, 1), c( 7, 5), c( 8, 5), c( 9, 5), c(10, 5), c(11, 5), c(13,13), c(13, 9), c(14,13), c(14, 9), c(15,13), c(15, 9), c(16,13), c(16, 9), c(16, 5)],
    [c( 0, 0), c( 0, 0), c( 0, 0), c( 5, 3), c( 6, 3), c( 7, 4), c( 8, 4), c( 9, 4), c(10, 4), c(11, 4), c(13,12), c(14,12), c(14, 8), c(15,12), c(15, 8), c(16,12), c(16, 8)],
];

/// nC 2..3
static NC_2_TO_3: [[VlcCode; 17]; 4] = [
    [c( 2, 3), c( 6,11), c( 6, 7), c( 7, 7), c( 8, 7), c( 8, 4), c( 9, 7), c(11,15), c(11,11), c(12,15), c(12,11), c(12, 8), c(13,15), c(13,11), c(13, 7), c(14, 9), c(14, 7)],
    [c( 0, 0), c( 2, 2), c( 5, 7), c( 6,10), c( 6, 6), c( 7, 6), c( 8, 6), c( 9, 6), c(11,14), c(11,10), c(12,14), c(12,10), c(13,14), c(13,10), c(14,11), c(14, 8), c(14, 6)],
    [c( 0, 0), c( 0, 0), c( 3, 3), c( 6, 9), c( 6, 5), c( 7, 5), c( 8, 5), c( 9, 5), c(11,13), c(11, 9), c(12,13), c(12, 9), c(13,13), c(13, 9), c(13, 6), c(14,10), c(14, 5)],
    [c( 0, 0), c( 0, 0), c( 0, 0), c( 4, 5), c( 4, 4), c( 5, 6), c( 6, 8), c( 6, 4), c( 7, 4), c( 9, 4), c(11,12), c(11, 8), c(12,12), c(13,12), c(13, 8), c(13, 1), c(14, 4)],
];

/// nC 4..7
static NC_4_TO_7: [[VlcCode; 17]; 4] = [
    [c( 4,15), c( 6,15), c( 6,11), c( 6, 8), c( 7,15), c( 7,11), c( 7, 9), c( 7, 8), c( 8,15), c( 8,11), c( 9,15), c( 9,11), c( 9, 8), c(10,13), c(10, 9), c(10, 5), c(10, 1)],
    [c( 0, 0), c( 4,14), c( 5,15), c( 5,12), c( 5,10), c( 5, 8), c( 6,14), c( 6,10), c( 7,14), c( 8,14), c( 8,10), c( 9,14), c( 9,10), c( 9, 7), c(10,12), c(10, 8), c(10, 4)],
    [c( 0, 0), c( 0, 0), c( 4,13), c( 5,14), c( 5,11), c( 5, 9), c( 6,13), c( 6, 9), c( 7,13), c( 7,10), c( 8,13), c( 8, 9), c( 9,13), c( 9, 9), c(10,11), c(10, 7), c(10, 3)],
    [c( 0, 0), c( 0, 0), c( 0, 0), c( 4,12), c( 4,11), c( 4,10), c( 4, 9), c( 4, 8), c( 5,13), c( 6,12), c( 7,12), c( 8,12), c( 8, 8), c( 9,12), c(10,10), c(10, 6), c(10, 2)],
];

/// nC >= 8: 定长 6 位码
static NC_8_UP: [[VlcCode; 17]; 4] = [
    [c( 6, 3), c( 6, 0), c( 6, 4), c( 6, 8), c( 6,12), c( 6,16), c( 6,20), c( 6,24), c( 6,28), c( 6,32), c( 6,36), c( 6,40), c( 6,44), c( 6,48), c( 6,52), c( 6,56), c( 6,60)],
    [c( 0, 0), c( 6, 1), c( 6, 5), c( 6, 9), c( 6,13), c( 6,17), c( 6,21), c( 6,25), c( 6,29), c( 6,33), c( 6,37), c( 6,41), c( 6,45), c( 6,49), c( 6,53), c( 6,57), c( 6,61)],
    [c( 0, 0), c( 0, 0), c( 6, 6), c( 6,10), c( 6,14), c( 6,18), c( 6,22), c( 6,26), c( 6,30), c( 6,34), c( 6,38), c( 6,42), c( 6,46), c( 6,50), c( 6,54), c( 6,58), c( 6,62)],
    [c( 0, 0), c( 0, 0), c( 0, 0), c( 6,11), c( 6,15), c( 6,19), c( 6,23), c( 6,27), c( 6,31), c( 6,35), c( 6,39), c( 6,43), c( 6,47), c( 6,51), c( 6,55), c( 6,59), c( 6,63)],
];

/// nC = -1: 2x2 色度 DC, totalCoeffs 0..4
static NC_CHROMA_DC_2X2: [[VlcCode; 5]; 4] = [
    [c( 2, 1), c( 6, 7), c( 6, 4), c( 6, 3), c( 6, 2)],
    [c( 0, 0), c( 1, 1), c( 6, 6), c( 7, 3), c( 8, 3)],
    [c( 0, 0), c( 0, 0), c( 3, 1), c( 7, 2), c( 8, 2)],
    [c( 0, 0), c( 0, 0), c( 0, 0), c( 6, 5), c( 7, 0)],
];

/// nC = -2: 2x4 色度 DC (4:2:2), totalCoeffs 0..8
static NC_CHROMA_DC_2X4: [[VlcCode; 9]; 4] = [
    [c( 1, 1), c( 7,15), c( 7,14), c( 9, 7), c( 9, 6), c(10, 7), c(11, 7), c(12, 7), c(13, 7)],
    [c( 0, 0), c( 2, 1), c( 7,13), c( 7,12), c( 9, 5), c(10, 6), c(11, 6), c(12, 6), c(12, 5)],
    [c( 0, 0), c( 0, 0), c( 3, 1), c( 7,11), c( 7,10), c( 9, 4), c(10, 5), c(11, 5), c(12, 4)],
    [c( 0, 0), c( 0, 0), c( 0, 0), c( 5, 1), c( 6, 1), c( 7, 9), c( 7, 8), c(10, 4), c(11, 4)],
];
