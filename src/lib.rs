//! # Liang (量)
//!
//! 纯 Rust 实现的 H.264 基线档次熵编码与变换量化核心.
//!
//! Liang 提供宏块编码层所需的两类底层构件:
//!
//! - **CAVLC 熵编码**: Exp-Golomb 码 (ue / te / se), coeff_token,
//!   total_zeros (4x4 / 2x4 / 2x2), run_before, 编码与解码成对
//! - **定点变换量化**: 前向/反向 4x4 整数变换, 2x2 与 4x4 Hadamard DC
//!   变换, 量化缩放可与变换合并执行
//!
//! # 快速开始
//!
//! ```rust
//! use liang::codec::vlc::{ExpGolombUnsignedDecoder, ExpGolombUnsignedEncoder};
//! use liang::core::{BitReader, BitWriter};
//!
//! let mut enc = ExpGolombUnsignedEncoder::new();
//! let mut bw = BitWriter::new();
//! let n = enc.encode(5);
//! bw.write_bits(enc.code(), n);
//! let data = bw.finish();
//!
//! let mut dec = ExpGolombUnsignedDecoder::new();
//! let mut br = BitReader::new(&data);
//! assert_eq!(dec.decode(&mut br).unwrap(), 5);
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `liang-core` | 位流读写与错误类型 |
//! | `liang-codec` | CAVLC 变长码与定点变换量化 |

/// 位流读写与错误类型
pub use liang_core as core;

/// CAVLC 变长码与定点变换量化
pub use liang_codec as codec;

pub mod logging;

/// 获取 Liang 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
