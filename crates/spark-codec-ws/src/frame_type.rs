//! 帧类型与 opcode 映射。
//!
//! # 教案级总览
//! - **定位 (Why)**：把帧头低 4 位的 opcode 收敛为一个带标签的枚举，读写两侧共用同一张穷举映射表；
//! - **契约 (What)**：六个已知类型可由调用方自由使用；保留 opcode 只会出现在解码结果中，
//!   出站构造函数会以 [`InvalidArgument::ReservedType`](crate::InvalidArgument::ReservedType) 拒绝它们。

use core::fmt;

/// 帧头首字节中 opcode 所占的低 4 位。
pub(crate) const OPCODE_BITS: u8 = 0x0F;

/// WebSocket 帧类型与其固定的线上 opcode。
///
/// # 教案级说明
/// - **意图 (Why)**：opcode 到类型的映射使用穷举 `match`，而不是按位置查表；这样保留 opcode
///   （0x3–0x7、0xB–0xF）在代码中始终是一个显式的决策点；
/// - **契约 (What)**：六个已知变体的 opcode 固定为 CONTINUATION=0x0、TEXT=0x1、BINARY=0x2、
///   CLOSE=0x8、PING=0x9、PONG=0xA；[`FrameType::Reserved`] 只能由解码器在宽容模式下产生，
///   [`ReservedOpcode`] 没有公开构造函数，且 [`Frame`](crate::Frame) 的构造函数拒绝保留类型；
/// - **风险提示 (Trade-offs)**：宽容模式沿用了“未知 opcode 不校验”的既有行为，属于已知缺口，
///   需要严格校验的调用方应启用 [`OpcodePolicy::RejectReserved`](crate::OpcodePolicy::RejectReserved)。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// 分片消息的后续帧（opcode 0x0）。
    Continuation,
    /// UTF-8 文本帧（opcode 0x1）。
    Text,
    /// 二进制帧（opcode 0x2）。
    Binary,
    /// 关闭控制帧（opcode 0x8）。
    Close,
    /// PING 控制帧（opcode 0x9）。
    Ping,
    /// PONG 控制帧（opcode 0xA）。
    Pong,
    /// 线上出现的保留 opcode，仅由解码器生成。
    Reserved(ReservedOpcode),
}

/// 保留 opcode 的不透明包装。
///
/// 字段私有，外部无法伪造；编码时原样写回 4 位 opcode。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReservedOpcode(u8);

impl ReservedOpcode {
    /// 返回原始 4 位 opcode。
    pub fn value(self) -> u8 {
        self.0
    }
}

impl FrameType {
    /// 六个已知帧类型，按 opcode 升序排列。
    pub const KNOWN: [FrameType; 6] = [
        FrameType::Continuation,
        FrameType::Text,
        FrameType::Binary,
        FrameType::Close,
        FrameType::Ping,
        FrameType::Pong,
    ];

    /// 返回该类型在帧头低 4 位中的 opcode。
    pub fn opcode(self) -> u8 {
        match self {
            FrameType::Continuation => 0x0,
            FrameType::Text => 0x1,
            FrameType::Binary => 0x2,
            FrameType::Close => 0x8,
            FrameType::Ping => 0x9,
            FrameType::Pong => 0xA,
            FrameType::Reserved(reserved) => reserved.0,
        }
    }

    /// 查找已知 opcode 对应的类型；保留值与超出 4 位的输入返回 `None`。
    pub fn known(opcode: u8) -> Option<FrameType> {
        if opcode > OPCODE_BITS {
            return None;
        }
        match FrameType::from_wire(opcode) {
            FrameType::Reserved(_) => None,
            known => Some(known),
        }
    }

    /// 把帧头首字节的低 4 位映射为类型。
    ///
    /// 保留值统一映射为 [`FrameType::Reserved`]，是否接受由解码器的 opcode 策略决定。
    pub(crate) fn from_wire(header: u8) -> FrameType {
        match header & OPCODE_BITS {
            0x0 => FrameType::Continuation,
            0x1 => FrameType::Text,
            0x2 => FrameType::Binary,
            0x8 => FrameType::Close,
            0x9 => FrameType::Ping,
            0xA => FrameType::Pong,
            reserved => FrameType::Reserved(ReservedOpcode(reserved)),
        }
    }

    /// 是否为控制帧（CLOSE / PING / PONG 以及 0xB–0xF 保留区间）。
    pub fn is_control(self) -> bool {
        self.opcode() & 0x8 != 0
    }

    /// 是否为保留 opcode。
    pub fn is_reserved(self) -> bool {
        matches!(self, FrameType::Reserved(_))
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameType::Continuation => f.write_str("CONTINUATION"),
            FrameType::Text => f.write_str("TEXT"),
            FrameType::Binary => f.write_str("BINARY"),
            FrameType::Close => f.write_str("CLOSE"),
            FrameType::Ping => f.write_str("PING"),
            FrameType::Pong => f.write_str("PONG"),
            FrameType::Reserved(reserved) => write!(f, "RESERVED({:#x})", reserved.0),
        }
    }
}
