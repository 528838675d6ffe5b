//! 比特流写入器.
//!
//! 提供向字节缓冲区按位写入数据的能力, 是 VLC 编码器的基础设施.
//!
//! 按大端位序写入 (MSB first), 与 BitReader 对应. VLC 编码器产出的
//! (码字, 位数) 对通过 `write_bits` 原样写入.

/// 比特流写入器
///
/// 向字节缓冲区按位写入数据, 使用大端位序 (MSB first).
///
/// # 示例
/// ```
/// use liang_core::bitwriter::BitWriter;
///
/// let mut bw = BitWriter::new();
/// bw.write_bits(0b1011, 4);
/// bw.write_bits(0b0001, 4);
/// bw.write_bits(0b01010101, 8);
/// let data = bw.finish();
/// assert_eq!(data, vec![0b10110001, 0b01010101]);
/// ```
#[derive(Default)]
pub struct BitWriter {
    /// 输出缓冲区
    data: Vec<u8>,
    /// 当前字节 (正在填充)
    current_byte: u8,
    /// 当前字节中已填充的位数 (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// 创建新的比特流写入器
    pub fn new() -> Self {
        Self::default()
    }

    /// 以指定容量创建比特流写入器
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            current_byte: 0,
            bit_count: 0,
        }
    }

    /// 获取已写入的总位数
    pub fn bits_written(&self) -> usize {
        self.data.len() * 8 + self.bit_count as usize
    }

    /// 写入 1 个位
    pub fn write_bit(&mut self, bit: u32) {
        self.current_byte = (self.current_byte << 1) | (bit & 1) as u8;
        self.bit_count += 1;
        if self.bit_count >= 8 {
            self.data.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    /// 写入 N 个位 (最多 32 位), 取 `bits` 的低 N 位按大端位序写出
    pub fn write_bits(&mut self, bits: u32, n: u32) {
        debug_assert!(n <= 32);
        for i in (0..n).rev() {
            self.write_bit((bits >> i) & 1);
        }
    }

    /// 结束写入, 返回字节缓冲区
    ///
    /// 末尾不足一字节的部分以 0 填充.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.current_byte <<= 8 - self.bit_count;
            self.data.push(self.current_byte);
        }
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitreader::BitReader;

    #[test]
    fn test_write_bits_basic() {
        let mut bw = BitWriter::new();
        bw.write_bits(0b1011, 4);
        bw.write_bits(0b0001, 4);
        assert_eq!(bw.bits_written(), 8);
        assert_eq!(bw.finish(), vec![0b10110001]);
    }

    #[test]
    fn test_partial_byte_padding() {
        let mut bw = BitWriter::new();
        bw.write_bits(0b101, 3);
        assert_eq!(bw.finish(), vec![0b10100000]);
    }

    #[test]
    fn test_roundtrip_with_reader() {
        let codes = [(0x1u32, 1u32), (0x2, 3), (0x3, 3), (0x4, 5), (0x1F, 9)];
        let mut bw = BitWriter::new();
        for &(code, n) in &codes {
            bw.write_bits(code, n);
        }
        let data = bw.finish();

        let mut br = BitReader::new(&data);
        for &(code, n) in &codes {
            assert_eq!(br.read_bits(n).unwrap(), code);
        }
    }
}
