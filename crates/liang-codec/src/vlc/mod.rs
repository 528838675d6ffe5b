//! H.264 CAVLC 变长码编解码器族.
//!
//! 每个编解码器都是一个小型状态机: 每次 Encode/Decode 调用覆盖上一次的
//! (num_bits, code_word) 结果, 调用方随后通过访问器读取. 调用之间不保留
//! 任何其它状态, 多个实例可在不同线程中独立使用.
//!
//! 错误约定 (与码表一致): `num_bits == 0` 表示 "该符号组合无效 / 编码失败",
//! 不抛错误; 只有码流读取本身的问题 (EOF, 前导零溢出) 才通过 `Result` 传播.

pub mod coeff_token;
pub mod exp_golomb;
pub mod run_before;
pub mod total_zeros;

pub use coeff_token::{CoeffToken, CoeffTokenContext, CoeffTokenDecoder, CoeffTokenEncoder};
pub use exp_golomb::{
    ExpGolombSignedDecoder, ExpGolombSignedEncoder, ExpGolombTruncDecoder, ExpGolombTruncEncoder,
    ExpGolombUnsignedDecoder, ExpGolombUnsignedEncoder,
};
pub use run_before::{RunBeforeDecoder, RunBeforeEncoder};
pub use total_zeros::{
    TotalZeros2x2Decoder, TotalZeros2x2Encoder, TotalZeros2x4Decoder, TotalZeros2x4Encoder,
    TotalZeros4x4Decoder, TotalZeros4x4Encoder,
};

use liang_core::{BitReader, LiangResult};

/// VLC 码表单元
///
/// `num_bits == 0` 表示该 (行, 列) 组合在标准中不存在, 受约束的调用方
/// 不会选中它.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VlcCode {
    /// 码字位数
    pub num_bits: u32,
    /// 码字 (MSB 在前, 低 num_bits 位有效)
    pub code_word: u32,
}

/// 构造码表单元的简写, 仅供本模块的常量表使用
const fn c(num_bits: u32, code_word: u32) -> VlcCode {
    VlcCode {
        num_bits,
        code_word,
    }
}

/// 表驱动前缀码解码.
///
/// 从码流中逐位读取, 每读一位就把累积前缀交给 `lookup` 做一次精确匹配
/// (长度与码字都须相等). 同一上下文内的有效码字互为前缀自由, 因此匹配
/// 唯一, 行为与标准的逐位判决树位精确一致.
///
/// 读满 `max_bits` 位仍无匹配时返回 `None`, 调用方以 `num_bits == 0`
/// 示败; 此时已消费的位数与判决树走到无效叶子时相同.
pub(crate) fn read_prefix_code<S>(
    br: &mut BitReader<'_>,
    max_bits: u32,
    lookup: impl Fn(u32, u32) -> Option<S>,
) -> LiangResult<Option<(S, u32)>> {
    let mut code = 0u32;
    for len in 1..=max_bits {
        code = (code << 1) | br.read_bit()?;
        if let Some(symbol) = lookup(len, code) {
            return Ok(Some((symbol, len)));
        }
    }
    Ok(None)
}
