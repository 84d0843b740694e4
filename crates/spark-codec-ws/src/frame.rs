//! 单帧的值类型与读写实现。
//!
//! # 教案级总览
//! - **定位 (Why)**：热刷新通道的连接驱动只需要“读一帧 / 写一帧”两个原语，本模块把 RFC 6455 帧格式
//!   中被支持的子集收敛到 [`Frame`] 一个类型上；
//! - **流程 (How)**：写出时先计算总长、一次性填充 `BytesMut`，再对字节汇发起恰好一次写调用；读取时按
//!   “首字节 → 长度字节 → 扩展长度 → 掩码键 → 负载”的顺序逐段读满，绝不多读下一帧的字节；
//! - **契约 (What)**：编码结果总是 FIN=1、RSV=0、无掩码；解码拒绝分片帧与 64 位扩展长度；
//! - **风险提示**：读取失败后字节源的对齐状态不可恢复，驱动必须关闭连接而不是继续读取。

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::error::{FrameError, InvalidArgument, UnsupportedFrame};
use crate::frame_type::{FrameType, OPCODE_BITS};
use crate::io::{ByteSink, ByteSource};
use crate::options::{DecodeOptions, OpcodePolicy};

/// 单帧负载的最大字节数（16 位扩展长度的上限）。
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

const FLAG_FIN: u8 = 0x80;
const FLAG_MASK: u8 = 0x80;
const LENGTH_BITS: u8 = 0x7F;
const MAX_INLINE_LEN: usize = 125;
const LENGTH_EXTENDED_16: u8 = 126;
const LENGTH_EXTENDED_64: u8 = 127;
const MASK_KEY_LEN: usize = 4;

/// 一个完整的、不可变的 WebSocket 帧。
///
/// # 教案级说明
/// - **意图 (Why)**：出站通知与入站控制帧共用一个值类型，驱动层只需匹配 [`FrameType`] 即可分派；
/// - **契约 (What)**：
///   - 负载永不缺失，空负载合法；
///   - 负载长度恒不超过 [`MAX_PAYLOAD_LEN`]，因此任何已存在的帧都可以被编码；
///   - 帧不持有构造它的字节源或写入它的字节汇的任何引用；
/// - **权衡 (Trade-offs)**：负载使用 [`Bytes`] 保存，克隆只增加引用计数，适合同一通知广播给多个连接。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    frame_type: FrameType,
    payload: Bytes,
}

impl Frame {
    /// 以文本构造 TEXT 帧，负载为文本的 UTF-8 字节。
    ///
    /// 文本超过 [`MAX_PAYLOAD_LEN`] 字节时返回 [`InvalidArgument::PayloadTooLarge`]。
    pub fn text(text: impl Into<String>) -> crate::Result<Self> {
        Self::with_payload(FrameType::Text, text.into().into_bytes())
    }

    /// 构造指定类型、空负载的帧，典型用法是 CLOSE / PING / PONG 控制帧。
    ///
    /// 保留类型返回 [`InvalidArgument::ReservedType`]。
    pub fn typed(frame_type: FrameType) -> crate::Result<Self> {
        Self::with_payload(frame_type, Bytes::new())
    }

    /// 以任意字节负载构造帧。
    ///
    /// # 教案式说明
    /// - **What**：类型必须是六个已知类型之一，保留类型只能由解码器产生，传入时返回
    ///   [`InvalidArgument::ReservedType`]；负载超过 [`MAX_PAYLOAD_LEN`] 时返回
    ///   [`InvalidArgument::PayloadTooLarge`]。
    pub fn with_payload(frame_type: FrameType, payload: impl Into<Bytes>) -> crate::Result<Self> {
        if let FrameType::Reserved(reserved) = frame_type {
            return Err(InvalidArgument::ReservedType {
                opcode: reserved.value(),
            }
            .into());
        }
        let payload = payload.into();
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(InvalidArgument::PayloadTooLarge { len: payload.len() }.into());
        }
        Ok(Self {
            frame_type,
            payload,
        })
    }

    /// 面向“可能缺失文本”的调用方的构造入口。
    ///
    /// # 教案式说明
    /// - **Why**：上游可能从配置或反序列化结果中拿到 `Option<&str>`，缺失值必须在构造阶段以参数错误
    ///   的形式同步暴露，而不是延迟到写出时；
    /// - **What**：`None` 返回 [`InvalidArgument::MissingPayload`]（"payload must not be null"），
    ///   其余行为与 [`Frame::text`] 一致。
    pub fn try_text(text: Option<&str>) -> crate::Result<Self> {
        let text = text.ok_or(InvalidArgument::MissingPayload)?;
        Self::text(text)
    }

    /// 面向“可能缺失类型”的调用方的构造入口；`None` 返回 [`InvalidArgument::MissingType`]。
    pub fn try_typed(frame_type: Option<FrameType>) -> crate::Result<Self> {
        let frame_type = frame_type.ok_or(InvalidArgument::MissingType)?;
        Self::typed(frame_type)
    }

    /// 帧类型。
    pub fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    /// 负载字节。
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// 负载长度。
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// 取出负载所有权。
    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// 编码后的总字节数：首字节 + 长度字段（含扩展长度）+ 负载。
    pub fn encoded_len(&self) -> usize {
        let len = self.payload.len();
        let length_field = if len <= MAX_INLINE_LEN { 1 } else { 3 };
        1 + length_field + len
    }

    /// 把帧编码追加到调用方缓冲。
    ///
    /// 先按 [`Frame::encoded_len`] 预留容量，再依次写入首字节、长度字段与原始负载，整个过程不会二次扩容。
    pub fn encode_into(&self, dst: &mut BytesMut) {
        dst.reserve(self.encoded_len());
        dst.put_u8(FLAG_FIN | self.frame_type.opcode());

        let len = self.payload.len();
        if len <= MAX_INLINE_LEN {
            dst.put_u8(len as u8);
        } else {
            // 构造阶段已保证 len <= u16::MAX。
            dst.put_u8(LENGTH_EXTENDED_16);
            dst.put_u16(len as u16);
        }
        dst.put_slice(&self.payload);
    }

    /// 返回帧的完整线上字节。
    pub fn encode(&self) -> Bytes {
        let mut dst = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut dst);
        dst.freeze()
    }

    /// 把帧写入字节汇。
    ///
    /// # 教案式说明
    /// - **Why**：保持“一帧一次写调用”，字节汇自行决定缓冲与 flush 策略；
    /// - **What**：成功返回表示整帧已交给字节汇；失败时原样返回底层 IO 错误；
    /// - **并发约束**：调用方需自行串行化对同一字节汇的并发写入，本方法内部不加锁。
    pub fn write<W>(&self, sink: &mut W) -> crate::Result<()>
    where
        W: ByteSink + ?Sized,
    {
        let encoded = self.encode();
        trace!(
            opcode = self.frame_type.opcode(),
            len = self.payload.len(),
            "writing websocket frame"
        );
        sink.write_bytes(&encoded)?;
        Ok(())
    }

    /// 以默认配置从字节源读取恰好一帧。
    pub fn read<R>(source: &mut R) -> crate::Result<Self>
    where
        R: ByteSource + ?Sized,
    {
        Self::read_with(source, &DecodeOptions::default())
    }

    /// 以指定配置从字节源读取恰好一帧。
    ///
    /// # 教案级说明
    /// - **流程 (How)**：
    ///   1. 读首字节，FIN=0 立即以 [`UnsupportedFrame::Fragmented`] 失败；
    ///   2. 低 4 位映射为 [`FrameType`]，保留 opcode 的去留由 [`OpcodePolicy`] 决定；
    ///   3. 读长度字节：≤125 为内联长度，126 追加读取 2 字节大端长度，127 以
    ///      [`UnsupportedFrame::LargeFrame`] 失败；
    ///   4. 若配置了负载预算且声明长度超限，在读取任何负载字节前失败；
    ///   5. 掩码位置位时读取 4 字节掩码键，负载第 i 字节与 `key[i % 4]` 异或还原；
    /// - **契约 (What)**：只消费本帧字节；任何失败都不会返回部分帧；IO 错误原样传播；
    /// - **风险提示**：本方法没有内部超时，阻塞直到字节到达或字节源报错，超时与取消由连接持有者负责。
    pub fn read_with<R>(source: &mut R, options: &DecodeOptions) -> crate::Result<Self>
    where
        R: ByteSource + ?Sized,
    {
        match decode(source, options) {
            Ok(frame) => Ok(frame),
            Err(error @ FrameError::Io(_)) => {
                debug!(code = error.code(), %error, "websocket frame source failed");
                Err(error)
            }
            Err(error) => {
                debug!(code = error.code(), %error, "rejecting websocket frame");
                Err(error)
            }
        }
    }
}

fn decode<R>(source: &mut R, options: &DecodeOptions) -> crate::Result<Frame>
where
    R: ByteSource + ?Sized,
{
    let header = source.read_byte()?;
    if header & FLAG_FIN == 0 {
        return Err(UnsupportedFrame::Fragmented.into());
    }

    let frame_type = match FrameType::from_wire(header) {
        FrameType::Reserved(_) if options.opcode_policy() == OpcodePolicy::RejectReserved => {
            return Err(UnsupportedFrame::ReservedOpcode {
                opcode: header & OPCODE_BITS,
            }
            .into());
        }
        frame_type => frame_type,
    };

    let mask_and_length = source.read_byte()?;
    let masked = mask_and_length & FLAG_MASK != 0;
    let len = match mask_and_length & LENGTH_BITS {
        LENGTH_EXTENDED_64 => return Err(UnsupportedFrame::LargeFrame.into()),
        LENGTH_EXTENDED_16 => {
            let mut extended = [0u8; 2];
            source.read_fully(&mut extended)?;
            usize::from(u16::from_be_bytes(extended))
        }
        inline => usize::from(inline),
    };

    if let Some(limit) = options.max_payload_len()
        && len > limit
    {
        return Err(UnsupportedFrame::BudgetExceeded {
            declared: len,
            limit,
        }
        .into());
    }

    let mask_key = if masked {
        let mut key = [0u8; MASK_KEY_LEN];
        source.read_fully(&mut key)?;
        Some(key)
    } else {
        None
    };

    let mut payload = BytesMut::zeroed(len);
    source.read_fully(&mut payload)?;
    if let Some(key) = mask_key {
        for (index, byte) in payload.iter_mut().enumerate() {
            *byte ^= key[index % MASK_KEY_LEN];
        }
    }

    trace!(
        opcode = frame_type.opcode(),
        len,
        masked,
        "decoded websocket frame"
    );
    Ok(Frame {
        frame_type,
        payload: payload.freeze(),
    })
}
