//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中定义帧编解码的错误语义，使连接驱动能够区分“调用方传参错误”“对端发送了不支持的帧形态”
//!   与“底层传输失败”三类情况，并据此记录日志、关闭连接；
//! - 每个错误都携带稳定错误码，便于在指标与日志中聚合。
//!
//! ## 设计要求（What）
//! - 所有错误类型派生 `thiserror::Error`，兼容 `std::error::Error` 与 `?` 传播；
//! - 三类错误在编解码边界都是终止性的，本模块不提供任何重试建议；
//! - `Io` 变体原样保留底层 `std::io::Error`，不做二次包装。

use std::io;

use thiserror::Error;

/// 构造阶段的参数错误。
///
/// 只会在同步构造 [`Frame`](crate::Frame) 时出现，绝不会在协议读写过程中产生。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum InvalidArgument {
    /// 文本负载缺失。
    #[error("payload must not be null")]
    MissingPayload,
    /// 帧类型缺失。
    #[error("type must not be null")]
    MissingType,
    /// 调用方传入了只能由解码器产生的保留类型。
    #[error("reserved opcode {opcode:#x} cannot be used to build a frame")]
    ReservedType {
        /// 保留类型携带的 4 位 opcode。
        opcode: u8,
    },
    /// 负载超过 16 位扩展长度可表达的上限。
    #[error("payload length {len} exceeds the 65535 byte frame limit")]
    PayloadTooLarge {
        /// 调用方提供的负载字节数。
        len: usize,
    },
}

/// 解码时遇到本编解码器刻意排除的帧形态。
///
/// # 教案式说明
/// - **意图 (Why)**：把“为什么拒绝”显式编码到变体中，驱动方可以据此在日志中写明违反了哪条约束；
/// - **契约 (What)**：`Fragmented` 与 `LargeFrame` 在任何配置下都会出现；`ReservedOpcode` 仅在
///   [`OpcodePolicy::RejectReserved`](crate::OpcodePolicy::RejectReserved) 下出现；`BudgetExceeded`
///   仅在设置了 [`DecodeOptions::max_payload_len`](crate::DecodeOptions::max_payload_len) 时出现。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum UnsupportedFrame {
    /// FIN=0 的分片帧。
    #[error("fragmented frames are not supported")]
    Fragmented,
    /// 使用 64 位扩展长度（长度标记 127）的帧。
    #[error("large frames are not supported")]
    LargeFrame,
    /// 严格模式下收到保留 opcode。
    #[error("reserved opcode {opcode:#x} is not supported")]
    ReservedOpcode {
        /// 帧头中的原始 4 位 opcode。
        opcode: u8,
    },
    /// 帧声明的负载长度超出解码预算。
    #[error("payload length {declared} exceeds decode budget {limit}")]
    BudgetExceeded {
        /// 帧头声明的负载字节数。
        declared: usize,
        /// 当前解码预算。
        limit: usize,
    },
}

/// 帧编解码错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：为连接驱动提供单一错误类型，`?` 即可把参数错误、协议错误与 IO 错误向上传播；
/// - **执行 (How)**：`From` 实现覆盖三个子类，`code()` 给出稳定错误码；
/// - **契约 (What)**：任何错误返回时都不会产出部分帧；读取失败后源上的字节对齐不可恢复。
#[derive(Debug, Error)]
pub enum FrameError {
    /// 构造阶段参数非法。
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    /// 对端发送了不支持的帧形态。
    #[error("unsupported frame: {0}")]
    UnsupportedFrame(#[from] UnsupportedFrame),
    /// 字节源或字节汇失败，例如连接被关闭导致的提前 EOF。
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FrameError {
    /// 返回稳定错误码，用于日志字段与指标维度。
    pub fn code(&self) -> &'static str {
        match self {
            FrameError::InvalidArgument(_) => "spark.codec.ws.invalid_argument",
            FrameError::UnsupportedFrame(reason) => match reason {
                UnsupportedFrame::Fragmented => "spark.codec.ws.fragmented",
                UnsupportedFrame::LargeFrame => "spark.codec.ws.large_frame",
                UnsupportedFrame::ReservedOpcode { .. } => "spark.codec.ws.reserved_opcode",
                UnsupportedFrame::BudgetExceeded { .. } => "spark.codec.ws.budget_exceeded",
            },
            FrameError::Io(_) => "spark.codec.ws.io",
        }
    }

    /// 若为协议形态错误，返回具体原因。
    pub fn unsupported_reason(&self) -> Option<&UnsupportedFrame> {
        match self {
            FrameError::UnsupportedFrame(reason) => Some(reason),
            _ => None,
        }
    }

    /// 若为参数错误，返回具体原因。
    pub fn invalid_argument(&self) -> Option<&InvalidArgument> {
        match self {
            FrameError::InvalidArgument(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_per_reason() {
        let cases = [
            (
                FrameError::from(UnsupportedFrame::Fragmented),
                "spark.codec.ws.fragmented",
            ),
            (
                FrameError::from(UnsupportedFrame::LargeFrame),
                "spark.codec.ws.large_frame",
            ),
            (
                FrameError::from(UnsupportedFrame::ReservedOpcode { opcode: 0x3 }),
                "spark.codec.ws.reserved_opcode",
            ),
            (
                FrameError::from(UnsupportedFrame::BudgetExceeded {
                    declared: 10,
                    limit: 4,
                }),
                "spark.codec.ws.budget_exceeded",
            ),
            (
                FrameError::from(InvalidArgument::MissingType),
                "spark.codec.ws.invalid_argument",
            ),
            (
                FrameError::from(io::Error::from(io::ErrorKind::UnexpectedEof)),
                "spark.codec.ws.io",
            ),
        ];
        for (error, code) in cases {
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn display_carries_reason_text() {
        let error = FrameError::from(UnsupportedFrame::Fragmented);
        assert_eq!(
            error.to_string(),
            "unsupported frame: fragmented frames are not supported"
        );

        let error = FrameError::from(InvalidArgument::MissingPayload);
        assert_eq!(
            error.to_string(),
            "invalid argument: payload must not be null"
        );
    }

    #[test]
    fn io_errors_are_transparent() {
        let error = FrameError::from(io::Error::new(io::ErrorKind::BrokenPipe, "peer gone"));
        assert_eq!(error.to_string(), "peer gone");
        assert!(error.unsupported_reason().is_none());
        assert!(error.invalid_argument().is_none());
    }
}
