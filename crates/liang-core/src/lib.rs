//! # liang-core
//!
//! Liang H.264 核心库的基础设施 crate, 提供错误处理与比特流读写工具.
//!
//! 熵编码层只依赖这里定义的比特流读写契约: 按大端位序 (MSB first)
//! 逐位读出 / 以 (码字, 位数) 对写入.

pub mod bitreader;
pub mod bitwriter;
pub mod error;

// 重导出常用类型
pub use bitreader::BitReader;
pub use bitwriter::BitWriter;
pub use error::{LiangError, LiangResult};
