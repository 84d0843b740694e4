/// 保留 opcode 的处理策略。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpcodePolicy {
    /// 接受保留 opcode，解码为 [`FrameType::Reserved`](crate::FrameType::Reserved)。
    #[default]
    Permissive,
    /// 读到保留 opcode 时立即以
    /// [`UnsupportedFrame::ReservedOpcode`](crate::UnsupportedFrame::ReservedOpcode) 失败。
    RejectReserved,
}

/// 读取单帧时的解码配置。
///
/// # 教案式说明
/// - **意图 (Why)**：默认行为与既有热刷新通道完全一致；需要更严格约束的驱动可以在不改动编解码器的
///   前提下收紧 opcode 校验或为单帧负载设置预算；
/// - **契约 (What)**：`Default` 即宽容 opcode + 无额外预算（仍受 16 位长度的 65535 上限约束）；
///   值类型为 `Copy`，可在多个连接间共享；
/// - **执行 (How)**：预算在读取长度字段之后、读取掩码与负载之前检查，超限时不会消费任何负载字节。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    opcode_policy: OpcodePolicy,
    max_payload_len: Option<usize>,
}

impl DecodeOptions {
    /// 默认配置。
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置保留 opcode 策略。
    pub fn with_opcode_policy(mut self, policy: OpcodePolicy) -> Self {
        self.opcode_policy = policy;
        self
    }

    /// 设置单帧负载预算，`None` 表示不额外限制。
    pub fn with_max_payload_len(mut self, limit: Option<usize>) -> Self {
        self.max_payload_len = limit;
        self
    }

    /// 当前 opcode 策略。
    pub fn opcode_policy(&self) -> OpcodePolicy {
        self.opcode_policy
    }

    /// 当前负载预算。
    pub fn max_payload_len(&self) -> Option<usize> {
        self.max_payload_len
    }
}
