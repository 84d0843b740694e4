#![deny(unsafe_code)]
#![warn(missing_docs)]

//! `spark-codec-ws` 提供面向“浏览器热刷新通知通道”的极简 WebSocket 帧编解码器。
//!
//! # 教案背景（Why）
//! - 热刷新通道只需要推送少量文本通知并应答 PING/CLOSE，引入完整 WebSocket 协议栈显得过重；
//! - 本 crate 只覆盖 RFC 6455 帧格式的一个子集：六种 opcode、7 位与 16 位长度编码、可解掩码的入站帧；
//! - HTTP 升级握手、连接生命周期、关闭协商均由外部驱动负责，本 crate 只做“一帧进、一帧出”。
//!
//! # 使用概览（How）
//! - 出站：[`Frame::text`] / [`Frame::typed`] 构造帧，再通过 [`Frame::write`] 写入任意 [`ByteSink`]；
//! - 入站：[`Frame::read`] 从阻塞式 [`ByteSource`] 恰好消费一帧字节，需要更严格约束时改用
//!   [`Frame::read_with`] 并传入 [`DecodeOptions`]；
//! - 所有 `std::io::Read` / `std::io::Write` 实现自动满足 `ByteSource` / `ByteSink`，内存切片即可充当测试夹具。
//!
//! # 合约说明（What）
//! - 写出的帧总是 FIN=1、RSV=0、无掩码；
//! - 读取遇到分片帧（FIN=0）或 64 位扩展长度立即失败，不做任何内部重试；
//! - 失败后字节对齐不可恢复，调用方应视连接为不可用并关闭；
//! - 错误统一为 [`FrameError`]，并提供 `spark.codec.ws.*` 命名空间下的稳定错误码。
//!
//! # 风险提示（Trade-offs）
//! - 默认对保留 opcode（0x3–0x7、0xB–0xF）保持宽容，解码为 [`FrameType::Reserved`]；
//!   需要严格校验时显式选择 [`OpcodePolicy::RejectReserved`]；
//! - 单帧负载上限为 65535 字节，超过上限的负载在构造阶段即被拒绝。

mod error;
mod frame;
mod frame_type;
mod io;
mod options;

pub use crate::error::{FrameError, InvalidArgument, UnsupportedFrame};
pub use crate::frame::{Frame, MAX_PAYLOAD_LEN};
pub use crate::frame_type::{FrameType, ReservedOpcode};
pub use crate::io::{ByteSink, ByteSource};
pub use crate::options::{DecodeOptions, OpcodePolicy};

/// 本 crate 统一使用的结果别名。
pub type Result<T, E = FrameError> = core::result::Result<T, E>;
