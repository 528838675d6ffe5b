//! total_zeros 编解码器.
//!
//! 编码块内最后一个非零系数之前的零系数总数, 码表按 totalCoeffs 选列
//! (H.264 Recommendation (03/2005) 表 9-7 / 9-8 / 9-9). 三种块型各一张表:
//! 4x4 亮度 / 色度 AC, 2x4 色度 DC (4:2:2), 2x2 色度 DC (4:2:0).
//!
//! 表布局: 行 = totalZeros, 列 = totalCoeffs. totalCoeffs 为 0 或达到块内
//! 系数总数时 totalZeros 可直接推出, 标准不为其分配码字, 编码返回 0,
//! 解码不消费任何位.

use liang_core::{BitReader, LiangResult};

use super::{VlcCode, c, read_prefix_code};

macro_rules! total_zeros_pair {
    (
        $(#[$enc_meta:meta])* $encoder:ident,
        $(#[$dec_meta:meta])* $decoder:ident,
        $table:ident, $width:expr
    ) => {
        $(#[$enc_meta])*
        #[derive(Default)]
        pub struct $encoder {
            num_code_bits: u32,
            bit_code: u32,
        }

        impl $encoder {
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

            /// 编码 totalZeros, 返回码字位数 (0 表示该组合不分配码字)
            pub fn encode(&mut self, total_zeros: u32, total_coeffs: u32) -> u32 {
                self.num_code_bits = 0;
                self.bit_code = 0;

                let tz = total_zeros as usize;
                let tc = total_coeffs as usize;
                if tc == 0 || tc >= $width || tz >= $width {
                    return 0;
                }

                let entry = $table[tz][tc];
                self.num_code_bits = entry.num_bits;
                self.bit_code = entry.code_word;
                self.num_code_bits
            }
        }

        $(#[$dec_meta])*
        #[derive(Default)]
        pub struct $decoder {
            num_code_bits: u32,
        }

        impl $decoder {
            pub fn new() -> Self {
                Self::default()
            }

            /// 最近一次解码消费的位数 (0 表示解码失败)
            pub fn num_decoded_bits(&self) -> u32 {
                self.num_code_bits
            }

            /// 从码流解出 totalZeros.
            ///
            /// totalCoeffs 越界时不消费任何位, 返回 0 并把
            /// `num_decoded_bits` 置 0.
            pub fn decode(
                &mut self,
                br: &mut BitReader<'_>,
                total_coeffs: u32,
            ) -> LiangResult<u32> {
                self.num_code_bits = 0;

                let tc = total_coeffs as usize;
                if tc == 0 || tc >= $width {
                    return Ok(0);
                }

                let max_bits = $table
                    .iter()
                    .map(|row| row[tc].num_bits)
                    .max()
                    .unwrap_or(0);

                let result = read_prefix_code(br, max_bits, |len, code| {
                    $table.iter().position(|row| {
                        row[tc].num_bits == len && row[tc].code_word == code
                    })
                })?;

                match result {
                    Some((tz, len)) => {
                        self.num_code_bits = len;
                        Ok(tz as u32)
                    }
                    None => Ok(0),
                }
            }
        }
    };
}

total_zeros_pair!(
    /// 4x4 块 total_zeros 编码器 (totalCoeffs 1..15)
    TotalZeros4x4Encoder,
    /// 4x4 块 total_zeros 解码器
    TotalZeros4x4Decoder,
    TZ_4X4,
    16
);

total_zeros_pair!(
    /// 2x4 色度 DC 块 total_zeros 编码器 (totalCoeffs 1..7)
    TotalZeros2x4Encoder,
    /// 2x4 色度 DC 块 total_zeros 解码器
    TotalZeros2x4Decoder,
    TZ_2X4,
    8
);

total_zeros_pair!(
    /// 2x2 色度 DC 块 total_zeros 编码器 (totalCoeffs 1..3)
    TotalZeros2x2Encoder,
    /// 2x2 色度 DC 块 total_zeros 解码器
    TotalZeros2x2Decoder,
    TZ_2X2,
    4
);

/// 4x4 块码表, 行 = totalZeros, 列 = totalCoeffs
static TZ_4X4: [[VlcCode; 16]; 16] = [
    [c(0, 0), c(1, 1), c(3, 7), c(4, 5), c(5, 3), c(4, 5), c(6, 1), c(6, 1), c(6, 1), c(6, 1), c(5, 1), c(4, 0), c(4, 0), c(3, 0), c(2, 0), c(1, 0)],
    [c(0, 0), c(3, 3), c(3, 6), c(3, 7), c(3, 7), c(4, 4), c(5, 1), c(5, 1), c(4, 1), c(6, 0), c(5, 0), c(4, 1), c(4, 1), c(3, 1), c(2, 1), c(1, 1)],
    [c(0, 0), c(3, 2), c(3, 5), c(3, 6), c(4, 5), c(4, 3), c(3, 7), c(3, 5), c(5, 1), c(4, 1), c(3, 1), c(3, 1), c(2, 1), c(1, 1), c(1, 1), c(0, 0)],
    [c(0, 0), c(4, 3), c(3, 4), c(3, 5), c(4, 4), c(3, 7), c(3, 6), c(3, 4), c(3, 3), c(2, 3), c(2, 3), c(3, 2), c(1, 1), c(2, 1), c(0, 0), c(0, 0)],
    [c(0, 0), c(4, 2), c(3, 3), c(4, 4), c(3, 6), c(3, 6), c(3, 5), c(3, 3), c(2, 3), c(2, 2), c(2, 2), c(1, 1), c(3, 1), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(5, 3), c(4, 5), c(4, 3), c(3, 5), c(3, 5), c(3, 4), c(2, 3), c(2, 2), c(3, 1), c(2, 1), c(3, 3), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(5, 2), c(4, 4), c(3, 4), c(3, 4), c(3, 4), c(3, 3), c(3, 2), c(3, 2), c(2, 1), c(4, 1), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(6, 3), c(4, 3), c(3, 3), c(4, 3), c(3, 3), c(3, 2), c(4, 1), c(3, 1), c(5, 1), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(6, 2), c(4, 2), c(4, 2), c(3, 3), c(4, 2), c(4, 1), c(3, 1), c(6, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(7, 3), c(5, 3), c(5, 3), c(4, 2), c(5, 1), c(3, 1), c(6, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(7, 2), c(5, 2), c(5, 2), c(5, 2), c(4, 1), c(6, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(8, 3), c(6, 3), c(6, 1), c(5, 1), c(5, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(8, 2), c(6, 2), c(5, 1), c(5, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(9, 3), c(6, 1), c(6, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(9, 2), c(6, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(9, 1), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
];

/// 2x4 色度 DC 块码表 (4:2:2)
static TZ_2X4: [[VlcCode; 8]; 8] = [
    [c(0, 0), c(1, 1), c(3, 0), c(3, 0), c(3, 6), c(2, 0), c(2, 0), c(1, 0)],
    [c(0, 0), c(3, 2), c(2, 1), c(3, 1), c(2, 0), c(2, 1), c(2, 1), c(1, 1)],
    [c(0, 0), c(3, 3), c(3, 1), c(2, 1), c(2, 1), c(2, 2), c(1, 1), c(0, 0)],
    [c(0, 0), c(4, 2), c(3, 4), c(2, 2), c(2, 2), c(2, 3), c(0, 0), c(0, 0)],
    [c(0, 0), c(4, 3), c(3, 5), c(3, 6), c(3, 7), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(4, 1), c(3, 6), c(3, 7), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(5, 1), c(3, 7), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
    [c(0, 0), c(5, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0), c(0, 0)],
];

/// 2x2 色度 DC 块码表 (4:2:0)
static TZ_2X2: [[VlcCode; 4]; 4] = [
    [c(0, 0), c(1, 1), c(1, 1), c(1, 1)],
    [c(0, 0), c(2, 1), c(2, 1), c(1, 0)],
    [c(0, 0), c(3, 1), c(2, 0), c(0, 0)],
    [c(0, 0), c(3, 0), c(0, 0), c(0, 0)],
];
