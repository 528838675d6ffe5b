//! Exp-Golomb 指数哥伦布码.
//!
//! H.264 Recommendation (03/2005) 表 9-2 定义的无符号码, 以及截断 (te) 与
//! 有符号 (se) 两个变体. 码字结构: N 个前导零 + 1 + N 位后缀, 符号 0 编为
//! 单个 `1` 位.
//!
//! 码长 (前导零数) 用整数最高有效位计算求得, 不使用浮点 log(): 浮点路径在
//! 2 的幂附近存在舍入误判的隐患.

use liang_core::{BitReader, LiangError, LiangResult};

/// 无符号 Exp-Golomb 编码器
///
/// 保存最近一次编码的 (num_bits, code_word), 由访问器读取;
/// 每次 `encode` 调用覆盖前一次结果.
#[derive(Default)]
pub struct ExpGolombUnsignedEncoder {
    num_code_bits: u32,
    bit_code: u32,
}

impl ExpGolombUnsignedEncoder {
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

    /// 编码一个无符号整数, 返回码字位数.
    ///
    /// 码长超过 32 位时返回 0 表示编码失败, 调用方不得把 0 当作零长度的
    /// 有效码.
    pub fn encode(&mut self, symbol: u32) -> u32 {
        self.bit_code = 0;
        self.num_code_bits = 0;

        if symbol == 0 {
            self.bit_code = 1;
            self.num_code_bits = 1;
            return 1;
        }

        // 整数位扫描求 floor(log2(x))
        let x = u64::from(symbol) + 1;
        let leading_zeros = 63 - x.leading_zeros();
        let num_bits = 2 * leading_zeros + 1;
        if num_bits <= 32 {
            let a = 1u64 << leading_zeros;
            self.bit_code = ((x - a) | a) as u32;
            self.num_code_bits = num_bits;
        } else {
            log::debug!("Exp-Golomb 码长超过 32 位, symbol={symbol}");
        }

        self.num_code_bits
    }
}

/// 无符号 Exp-Golomb 解码器
#[derive(Default)]
pub struct ExpGolombUnsignedDecoder {
    num_code_bits: u32,
}

impl ExpGolombUnsignedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次解码消费的位数
    pub fn num_decoded_bits(&self) -> u32 {
        self.num_code_bits
    }

    /// 从码流解出一个无符号整数
    pub fn decode(&mut self, br: &mut BitReader<'_>) -> LiangResult<u32> {
        self.num_code_bits = 0;

        let mut leading_zeros = 0u32;
        while br.read_bit()? == 0 {
            leading_zeros += 1;
            if leading_zeros > 31 {
                return Err(LiangError::InvalidData("Exp-Golomb 前导零过多".into()));
            }
        }
        self.num_code_bits = 2 * leading_zeros + 1;

        if leading_zeros == 0 {
            return Ok(0);
        }
        let suffix = br.read_bits(leading_zeros)?;
        Ok((1 << leading_zeros) - 1 + suffix)
    }
}

/// 截断 Exp-Golomb 编码器
///
/// 取值范围 [0..range]. `range == 1` 时退化为单个取反位,
/// 否则按无符号 Exp-Golomb 编码.
#[derive(Default)]
pub struct ExpGolombTruncEncoder {
    inner: ExpGolombUnsignedEncoder,
}

impl ExpGolombTruncEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次编码的码字位数
    pub fn num_coded_bits(&self) -> u32 {
        self.inner.num_code_bits
    }

    /// 最近一次编码的码字
    pub fn code(&self) -> u32 {
        self.inner.bit_code
    }

    /// 编码取值范围为 [0..range] 的无符号整数, 返回码字位数
    pub fn encode(&mut self, value: u32, range: u32) -> u32 {
        if range == 1 {
            self.inner.num_code_bits = 1;
            self.inner.bit_code = u32::from(value == 0);
            return 1;
        }
        self.inner.encode(value)
    }
}

/// 截断 Exp-Golomb 解码器
#[derive(Default)]
pub struct ExpGolombTruncDecoder {
    inner: ExpGolombUnsignedDecoder,
}

impl ExpGolombTruncDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次解码消费的位数
    pub fn num_decoded_bits(&self) -> u32 {
        self.inner.num_code_bits
    }

    /// 解码取值范围为 [0..range] 的无符号整数
    pub fn decode(&mut self, br: &mut BitReader<'_>, range: u32) -> LiangResult<u32> {
        if range == 1 {
            self.inner.num_code_bits = 1;
            return Ok(u32::from(br.read_bit()? == 0));
        }
        self.inner.decode(br)
    }
}

/// 有符号 Exp-Golomb 编码器
///
/// 映射到无符号码: v > 0 编为 2v-1 (奇), v <= 0 编为 -2v (偶).
#[derive(Default)]
pub struct ExpGolombSignedEncoder {
    inner: ExpGolombUnsignedEncoder,
}

impl ExpGolombSignedEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次编码的码字位数
    pub fn num_coded_bits(&self) -> u32 {
        self.inner.num_code_bits
    }

    /// 最近一次编码的码字
    pub fn code(&self) -> u32 {
        self.inner.bit_code
    }

    /// 编码一个有符号整数, 返回码字位数 (0 表示失败)
    pub fn encode(&mut self, symbol: i32) -> u32 {
        let x = 2 * i64::from(symbol);
        let mapped = if x <= 0 { -x } else { x - 1 };
        if mapped > i64::from(u32::MAX) {
            // 超出 32 位码字所能表达的范围
            self.inner.num_code_bits = 0;
            self.inner.bit_code = 0;
            return 0;
        }
        self.inner.encode(mapped as u32)
    }
}

/// 有符号 Exp-Golomb 解码器
#[derive(Default)]
pub struct ExpGolombSignedDecoder {
    inner: ExpGolombUnsignedDecoder,
}

impl ExpGolombSignedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次解码消费的位数
    pub fn num_decoded_bits(&self) -> u32 {
        self.inner.num_code_bits
    }

    /// 从码流解出一个有符号整数
    pub fn decode(&mut self, br: &mut BitReader<'_>) -> LiangResult<i32> {
        let code = self.inner.decode(br)?;
        let value = code.div_ceil(2) as i32;
        if code & 1 == 1 { Ok(value) } else { Ok(-value) }
    }
}
