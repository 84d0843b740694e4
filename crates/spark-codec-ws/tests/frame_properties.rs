//! 帧编解码性质验证。
//!
//! # 教案级注释概览
//! - **核心目标 (Why)**：用 Proptest 随机生成文本、类型与掩码键，验证“编码后再解码得到原帧”与
//!   “掩码帧解码等价于原始负载”两条性质，覆盖 7 位与 16 位两种长度编码；
//! - **合同与边界 (What)**：文本长度限定在 0..=300 字符，保证同时命中 ≤125 与 ≥126 两个分支；
//!   掩码帧由测试自行构造，编解码器本身从不输出掩码帧。

use proptest::prelude::*;
use spark_codec_ws::{Frame, FrameType};

fn known_type() -> impl Strategy<Value = FrameType> {
    prop::sample::select(FrameType::KNOWN.to_vec())
}

/// 按客户端规则构造一个带掩码的帧。
fn masked_frame(header: u8, payload: &[u8], key: [u8; 4]) -> Vec<u8> {
    let mut bytes = vec![header];
    if payload.len() <= 125 {
        bytes.push(0x80 | payload.len() as u8);
    } else {
        bytes.push(0x80 | 126);
        bytes.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    }
    bytes.extend_from_slice(&key);
    bytes.extend(
        payload
            .iter()
            .enumerate()
            .map(|(index, byte)| byte ^ key[index % 4]),
    );
    bytes
}

proptest! {
    #[test]
    fn text_round_trip(text in ".{0,300}") {
        let frame = Frame::text(text.clone()).expect("长度在上限之内");
        let mut sink = Vec::new();
        frame.write(&mut sink).expect("写入内存汇");

        let mut source: &[u8] = &sink;
        let decoded = Frame::read(&mut source).expect("解码自身输出");
        prop_assert_eq!(decoded.frame_type(), FrameType::Text);
        prop_assert_eq!(decoded.payload(), text.as_bytes());
        prop_assert!(source.is_empty());
    }

    #[test]
    fn empty_typed_round_trip(frame_type in known_type()) {
        let frame = Frame::typed(frame_type).expect("已知类型");
        let encoded = frame.encode();
        let mut source: &[u8] = &encoded;
        let decoded = Frame::read(&mut source).expect("解码自身输出");
        prop_assert_eq!(decoded, frame);
    }

    #[test]
    fn masked_payload_decodes_to_plain_bytes(
        frame_type in known_type(),
        payload in prop::collection::vec(any::<u8>(), 0..400),
        key in any::<[u8; 4]>(),
    ) {
        let bytes = masked_frame(0x80 | frame_type.opcode(), &payload, key);
        let mut source: &[u8] = &bytes;
        let decoded = Frame::read(&mut source).expect("合法掩码帧");
        prop_assert_eq!(decoded.frame_type(), frame_type);
        prop_assert_eq!(decoded.payload(), payload.as_slice());
        prop_assert!(source.is_empty());
    }
}
