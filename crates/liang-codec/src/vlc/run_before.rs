//! run_before 编解码器.
//!
//! 编码一个非零系数之前连续零的个数, 码表按剩余零数 zerosLeft 选列
//! (H.264 Recommendation (03/2005) 表 9-10). zerosLeft > 6 时共用第 7 列,
//! 该列对 runBefore 7..14 使用 "N 个前导零 + 1" 形式的码字.

use liang_core::{BitReader, LiangResult};

use super::{VlcCode, c, read_prefix_code};

/// run_before 编码器
#[derive(Default)]
pub struct RunBeforeEncoder {
    num_code_bits: u32,
    bit_code: u32,
}

impl RunBeforeEncoder {
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

    /// 编码 runBefore, 返回码字位数 (0 表示该组合不分配码字)
    pub fn encode(&mut self, run_before: u32, zeros_left: u32) -> u32 {
        self.num_code_bits = 0;
        self.bit_code = 0;

        let run = run_before as usize;
        let col = zeros_left.min(7) as usize;
        if run >= RUN_BEFORE.len() || col == 0 {
            return 0;
        }

        let entry = RUN_BEFORE[run][col];
        self.num_code_bits = entry.num_bits;
        self.bit_code = entry.code_word;
        self.num_code_bits
    }
}

/// run_before 解码器
#[derive(Default)]
pub struct RunBeforeDecoder {
    num_code_bits: u32,
}

impl RunBeforeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次解码消费的位数 (0 表示解码失败)
    pub fn num_decoded_bits(&self) -> u32 {
        self.num_code_bits
    }

    /// 从码流解出 runBefore.
    ///
    /// zerosLeft == 0 时 runBefore 必为 0, 不消费任何位.
    pub fn decode(&mut self, br: &mut BitReader<'_>, zeros_left: u32) -> LiangResult<u32> {
        self.num_code_bits = 0;

        let col = zeros_left.min(7) as usize;
        if col == 0 {
            return Ok(0);
        }

        let max_bits = RUN_BEFORE
            .iter()
            .map(|row| row[col].num_bits)
            .max()
            .unwrap_or(0);

        let result = read_prefix_code(br, max_bits, |len, code| {
            RUN_BEFORE
                .iter()
                .position(|row| row[col].num_bits == len && row[col].code_word == code)
        })?;

        match result {
            Some((run, len)) => {
                self.num_code_bits = len;
                Ok(run as u32)
            }
            None => Ok(0),
        }
    }
}

/// 码表, 行 = runBefore, 列 = min(zerosLeft, 7)
static RUN_BEFORE: [[VlcCode; 8]; 15] = [
    [c(0, 0), c(1, 1), c(1, 1), c(2, 3), c(2, 3), c(2, 3), c(2, 3), c(3, 7)],
    [c(0, 0), c(1, 0), c(2, 1), c(2, 2), c(2, 2), c(2, 2), c(3, 0), c(3, 6)],
    [c(0, 0), c(0, 0), c(2, 0), c(2, 1), c(2, 1), c(3, 3), c(3, 1), c(3, 5)],
    [c(0, 0), c(0, 0), c(0, 0), c(2, 0), c(3, 1), c(3, 2), c(3, 3), c(3, 4)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(3, 0), c(3, 1), c(3, 2), c(3, 3)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(3, 0), c(3, 5), c(3, 2)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(3, 4), c(3, 1)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(4, 1)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(5, 1)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(6, 1)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(7, 1)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(8, 1)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(9, 1)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(10, 1)],
    [c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(11, 1)],
];

#[cfg(test)]
mod tests {
    use super::*;
    use liang_core::BitWriter;

    #[test]
    fn test_golden_values() {
        let mut enc = RunBeforeEncoder::new();

        // zerosLeft = 1: 单位码
        assert_eq!(enc.encode(0, 1), 1);
        assert_eq!(enc.code(), 1);
        assert_eq!(enc.encode(1, 1), 1);
        assert_eq!(enc.code(), 0);

        // zerosLeft >= 7 共用第 7 列
        assert_eq!(enc.encode(14, 7), 11);
        assert_eq!(enc.code(), 1);
        assert_eq!(enc.encode(14, 100), 11);
        assert_eq!(enc.code(), 1);
        assert_eq!(enc.encode(6, 14), 3);
        assert_eq!(enc.code(), 1);
    }

    #[test]
    fn test_clamp_equivalence() {
        // zerosLeft > 6 的所有值编码结果与列 7 相同
        let mut enc_a = RunBeforeEncoder::new();
        let mut enc_b = RunBeforeEncoder::new();
        for zl in [8u32, 9, 15, 1000] {
            for run in 0..15u32 {
                let na = enc_a.encode(run, zl);
                let nb = enc_b.encode(run, 7);
                assert_eq!(na, nb, "zl={zl} run={run}");
                assert_eq!(enc_a.code(), enc_b.code(), "zl={zl} run={run}");
            }
        }
    }

    #[test]
    fn test_invalid_combinations() {
        let mut enc = RunBeforeEncoder::new();
        // runBefore > zerosLeft (zerosLeft <= 6 时) 不分配码字
        assert_eq!(enc.encode(2, 1), 0);
        assert_eq!(enc.encode(6, 5), 0);
        assert_eq!(enc.encode(15, 7), 0);
        assert_eq!(enc.num_coded_bits(), 0);
    }

    #[test]
    fn test_roundtrip_all_columns() {
        let mut enc = RunBeforeEncoder::new();
        let mut dec = RunBeforeDecoder::new();

        for zl in 1u32..=7 {
            let max_run = if zl < 7 { zl } else { 14 };
            for run in 0..=max_run {
                let n = enc.encode(run, zl);
                assert!(n > 0, "zl={zl} run={run}");

                let mut bw = BitWriter::new();
                bw.write_bits(enc.code(), n);
                let data = bw.finish();

                let mut br = BitReader::new(&data);
                assert_eq!(dec.decode(&mut br, zl).unwrap(), run, "zl={zl} run={run}");
                assert_eq!(dec.num_decoded_bits(), n);
            }
        }
    }

    #[test]
    fn test_decode_zeros_left_zero() {
        let data = [0b11111111];
        let mut br = BitReader::new(&data);
        let mut dec = RunBeforeDecoder::new();
        assert_eq!(dec.decode(&mut br, 0).unwrap(), 0);
        assert_eq!(dec.num_decoded_bits(), 0);
        assert_eq!(br.bits_read(), 0);
    }
}
