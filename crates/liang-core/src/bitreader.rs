//! 比特流读取器.
//!
//! 提供从字节缓冲区中按位读取数据的能力, 是 VLC 解码器的基础设施.
//!
//! 按大端位序读取 (MSB first), 与 H.264 码流的位序一致.

use crate::{LiangError, LiangResult};

/// 比特流读取器
///
/// 从字节缓冲区中按位读取数据, 使用大端位序 (MSB first).
///
/// # 示例
/// ```
/// use liang_core::bitreader::BitReader;
///
/// let data = [0b10110001, 0b01010101];
/// let mut br = BitReader::new(&data);
/// assert_eq!(br.read_bits(4).unwrap(), 0b1011);
/// assert_eq!(br.read_bits(4).unwrap(), 0b0001);
/// assert_eq!(br.read_bits(8).unwrap(), 0b01010101);
/// ```
pub struct BitReader<'a> {
    /// 源数据
    data: &'a [u8],
    /// 当前字节索引
    byte_pos: usize,
    /// 当前字节中的位位置 (0-7, 0 表示最高位)
    bit_pos: u8,
}

impl<'a> BitReader<'a> {
    /// 创建新的比特流读取器
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_pos: 0,
        }
    }

    /// 获取已读取的总位数
    pub fn bits_read(&self) -> usize {
        self.byte_pos * 8 + self.bit_pos as usize
    }

    /// 获取剩余可读位数
    pub fn bits_left(&self) -> usize {
        if self.byte_pos >= self.data.len() {
            return 0;
        }
        (self.data.len() - self.byte_pos) * 8 - self.bit_pos as usize
    }

    /// 是否已到达末尾
    pub fn is_eof(&self) -> bool {
        self.bits_left() == 0
    }

    /// 读取 1 个位
    pub fn read_bit(&mut self) -> LiangResult<u32> {
        if self.byte_pos >= self.data.len() {
            return Err(LiangError::Eof);
        }

        let bit = (self.data[self.byte_pos] >> (7 - self.bit_pos)) & 1;
        self.bit_pos += 1;
        if self.bit_pos >= 8 {
            self.bit_pos = 0;
            self.byte_pos += 1;
        }

        Ok(u32::from(bit))
    }

    /// 读取 N 个位 (最多 32 位)
    ///
    /// 按大端位序读取, 返回值的低 N 位有效.
    pub fn read_bits(&mut self, n: u32) -> LiangResult<u32> {
        if n == 0 {
            return Ok(0);
        }
        if n > 32 {
            return Err(LiangError::InvalidArgument(format!(
                "read_bits 最多读取 32 位, 请求了 {n} 位"
            )));
        }

        let mut value = 0u32;
        for _ in 0..n {
            value = (value << 1) | self.read_bit()?;
        }
        Ok(value)
    }
}
