//! CAVLC 熵编码流水.
//!
//! 把一个 4x4 残差块的全部语法元素按标准顺序写入同一码流再解出,
//! 验证各编解码器在连续码流中的协同与位数守恒.

use liang::codec::vlc::{
    CoeffToken, CoeffTokenContext, CoeffTokenDecoder, CoeffTokenEncoder, ExpGolombSignedDecoder,
    ExpGolombSignedEncoder, RunBeforeDecoder, RunBeforeEncoder, TotalZeros4x4Decoder,
    TotalZeros4x4Encoder,
};
use liang::core::{BitReader, BitWriter};

/// 一个 4x4 块按 zigzag 扫描后的符号序列
struct BlockSymbols {
    total_coeffs: u32,
    trailing_ones: u32,
    trailing_one_signs: Vec<u32>,
    levels: Vec<i32>,
    total_zeros: u32,
    runs: Vec<u32>,
}

/// 扫描序列 [7, -2, 0, 1, -1, 0, 0, 1] 的语法元素:
/// 非零系数 5 个, 末尾三个 ±1 为 trailing ones, 其余级为 7, -2,
/// 最后一个非零系数前共 3 个零.
fn sample_block() -> BlockSymbols {
    BlockSymbols {
        total_coeffs: 5,
        trailing_ones: 3,
        // 逆扫描序: 1(+), -1(-), 1(+)
        trailing_one_signs: vec![0, 1, 0],
        levels: vec![-2, 7],
        total_zeros: 3,
        runs: vec![2, 0, 1, 0],
    }
}

fn encode_block(symbols: &BlockSymbols, ctx: CoeffTokenContext) -> Vec<u8> {
    let mut bw = BitWriter::new();

    let mut coeff_token = CoeffTokenEncoder::new();
    let n = coeff_token.encode(symbols.total_coeffs, symbols.trailing_ones, ctx);
    assert!(n > 0);
    bw.write_bits(coeff_token.code(), n);

    for &sign in &symbols.trailing_one_signs {
        bw.write_bit(sign);
    }

    let mut level = ExpGolombSignedEncoder::new();
    for &l in &symbols.levels {
        let n = level.encode(l);
        assert!(n > 0);
        bw.write_bits(level.code(), n);
    }

    let mut total_zeros = TotalZeros4x4Encoder::new();
    let n = total_zeros.encode(symbols.total_zeros, symbols.total_coeffs);
    assert!(n > 0);
    bw.write_bits(total_zeros.code(), n);

    // zerosLeft 为 0 后 runBefore 必为 0, 不占码流
    let mut run_before = RunBeforeEncoder::new();
    let mut zeros_left = symbols.total_zeros;
    for &run in &symbols.runs {
        let n = run_before.encode(run, zeros_left);
        bw.write_bits(run_before.code(), n);
        zeros_left -= run;
    }

    bw.finish()
}

#[test]
fn test_block_symbols_roundtrip() {
    let symbols = sample_block();
    let ctx = CoeffTokenContext::Neighbours(1);
    let data = encode_block(&symbols, ctx);

    let mut br = BitReader::new(&data);

    let mut coeff_token = CoeffTokenDecoder::new();
    let token = coeff_token.decode(&mut br, ctx).unwrap();
    assert_eq!(
        token,
        CoeffToken {
            total_coeffs: 5,
            trailing_ones: 3
        }
    );

    for &sign in &symbols.trailing_one_signs {
        assert_eq!(br.read_bit().unwrap(), sign);
    }

    let mut level = ExpGolombSignedDecoder::new();
    for &l in &symbols.levels {
        assert_eq!(level.decode(&mut br).unwrap(), l);
    }

    let mut total_zeros = TotalZeros4x4Decoder::new();
    assert_eq!(
        total_zeros.decode(&mut br, token.total_coeffs).unwrap(),
        symbols.total_zeros
    );

    let mut run_before = RunBeforeDecoder::new();
    let mut zeros_left = symbols.total_zeros;
    for &run in &symbols.runs {
        assert_eq!(run_before.decode(&mut br, zeros_left).unwrap(), run);
        zeros_left -= run;
    }
    assert_eq!(zeros_left, 0);
}

#[test]
fn test_bit_count_conservation() {
    // 编码端报告的位数之和等于解码端消费的位数之和
    let symbols = sample_block();
    let ctx = CoeffTokenContext::Neighbours(4);

    let mut encoded_bits = 0u32;
    let mut coeff_token = CoeffTokenEncoder::new();
    encoded_bits += coeff_token.encode(symbols.total_coeffs, symbols.trailing_ones, ctx);
    encoded_bits += symbols.trailing_one_signs.len() as u32;
    let mut level = ExpGolombSignedEncoder::new();
    for &l in &symbols.levels {
        encoded_bits += level.encode(l);
    }
    let mut total_zeros = TotalZeros4x4Encoder::new();
    encoded_bits += total_zeros.encode(symbols.total_zeros, symbols.total_coeffs);
    let mut run_before = RunBeforeEncoder::new();
    let mut zeros_left = symbols.total_zeros;
    for &run in &symbols.runs {
        encoded_bits += run_before.encode(run, zeros_left);
        zeros_left -= run;
    }

    let data = encode_block(&symbols, ctx);

    let mut br = BitReader::new(&data);
    let mut dec_coeff_token = CoeffTokenDecoder::new();
    dec_coeff_token.decode(&mut br, ctx).unwrap();
    for _ in &symbols.trailing_one_signs {
        br.read_bit().unwrap();
    }
    let mut dec_level = ExpGolombSignedDecoder::new();
    for _ in &symbols.levels {
        dec_level.decode(&mut br).unwrap();
    }
    let mut dec_total_zeros = TotalZeros4x4Decoder::new();
    dec_total_zeros.decode(&mut br, symbols.total_coeffs).unwrap();
    let mut dec_run_before = RunBeforeDecoder::new();
    let mut zeros_left = symbols.total_zeros;
    for &run in &symbols.runs {
        assert_eq!(dec_run_before.decode(&mut br, zeros_left).unwrap(), run);
        zeros_left -= run;
    }

    assert_eq!(br.bits_read(), encoded_bits as usize);
}

#[test]
fn test_chroma_dc_block_roundtrip() {
    // 2x2 色度 DC 块: coeff_token 使用 nC = -1 上下文
    let ctx = CoeffTokenContext::ChromaDc2x2;
    let mut bw = BitWriter::new();

    let mut coeff_token = CoeffTokenEncoder::new();
    let n = coeff_token.encode(2, 1, ctx);
    bw.write_bits(coeff_token.code(), n);

    let mut level = ExpGolombSignedEncoder::new();
    let n = level.encode(3);
    bw.write_bits(level.code(), n);

    let data = bw.finish();
    let mut br = BitReader::new(&data);

    let mut dec = CoeffTokenDecoder::new();
    let token = dec.decode(&mut br, ctx).unwrap();
    assert_eq!(token.total_coeffs, 2);
    assert_eq!(token.trailing_ones, 1);

    let mut level_dec = ExpGolombSignedDecoder::new();
    assert_eq!(level_dec.decode(&mut br).unwrap(), 3);
}
