//! 统一错误类型定义.
//!
//! 所有 Liang crate 共用的错误类型, 支持跨模块传播.
//!
//! 注意: VLC 符号域之外的组合不是错误, 编解码器以 `num_bits == 0`
//! 哨兵值表达 (见 liang-codec), 只有码流本身的问题才走 `Result`.

use thiserror::Error;

/// Liang 框架统一错误类型
#[derive(Debug, Error)]
pub enum LiangError {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 编解码器错误
    #[error("编解码器错误: {0}")]
    Codec(String),

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 已到达流末尾
    #[error("已到达流末尾")]
    Eof,

    /// 无效数据 (损坏的码流等)
    #[error("无效数据: {0}")]
    InvalidData(String),
}

/// Liang 框架统一 Result 类型
pub type LiangResult<T> = Result<T, LiangError>;
