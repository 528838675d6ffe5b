//! 定点整数变换与量化.
//!
//! 前向/反向 4x4 整数变换 (残差块), 以及 intra16x16 亮度 DC 与色度 DC 的
//! 2x2 / 4x4 Hadamard 变换. 所有运算为纯整数定点算术, 量化缩放可与变换
//! 合并在一次遍历中完成, 也可按 [`TransformMode`] 单独执行其中一半.
//!
//! 变换器在构造和参数变更时预计算量化常数, `transform` 调用本身不做任何
//! 除法或表重建.

pub mod dc_2x2;
pub mod dc_4x4;
pub mod forward_4x4;
pub mod inverse_4x4;

pub use dc_2x2::{ForwardTransformDc2x2, InverseTransformDc2x2};
pub use dc_4x4::{ForwardTransformDc4x4, InverseTransformDc4x4};
pub use forward_4x4::ForwardTransform4x4;
pub use inverse_4x4::InverseTransform4x4;

/// 变换器工作模式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransformMode {
    /// 变换与量化合并执行
    #[default]
    TransformAndQuant,
    /// 仅变换, 跳过量化缩放
    TransformOnly,
    /// 仅量化缩放, 跳过变换
    QuantOnly,
}

/// 变换器可调参数的标识
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamId {
    /// 量化参数 QP (0..51)
    Quant,
    /// 帧内/帧间标志, 影响前向量化的舍入偏置
    IntraFlag,
}
