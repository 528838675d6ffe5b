//! # liang-codec
//!
//! H.264 基线档次 (Baseline Profile) 熵编码与变换量化内核.
//!
//! 两个独立的层, 彼此不相互调用, 由外部的宏块编码层驱动:
//!
//! - **`vlc`**: CAVLC 变长码编解码器族: Exp-Golomb 码, coeff_token,
//!   total_zeros (4x4 / 2x4 / 2x2 三种块型), run_before. 全部表驱动,
//!   码表为编译期常量, 与 H.264 Recommendation (03/2005) 第 9 章位精确.
//! - **`transform`**: 定点前向/反向 4x4 整数变换与 2x2 / 4x4 Hadamard DC
//!   变换, 量化缩放与变换可合并执行.
//!
//! ## 使用示例
//!
//! ```rust
//! use liang_codec::vlc::ExpGolombUnsignedEncoder;
//! use liang_core::BitWriter;
//!
//! let mut enc = ExpGolombUnsignedEncoder::new();
//! let mut bw = BitWriter::new();
//! assert_eq!(enc.encode(2), 3);
//! bw.write_bits(enc.code(), enc.num_coded_bits());
//! assert_eq!(bw.finish(), vec![0b01100000]);
//! ```

pub mod transform;
pub mod vlc;

// 重导出常用类型
pub use transform::{ParamId, TransformMode};
pub use vlc::VlcCode;
