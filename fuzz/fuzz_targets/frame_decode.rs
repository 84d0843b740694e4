#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spark_codec_ws::{DecodeOptions, Frame, OpcodePolicy};

/// Fuzz 用例：任意字节流 + 解码配置。
///
/// - **Why**：帧头来自不可信的浏览器连接，解码器面对任意输入都必须返回 `Ok` 或 `Err`，绝不能 panic；
/// - **How**：循环读取直到出错，覆盖“多帧拼接”“截断”“掩码”“保留 opcode”等组合；
/// - **What**：每个成功解码的帧重新编码后再次解码，结果必须与原帧一致（编码器不输出掩码，但语义等价）。
#[derive(Debug, Arbitrary)]
struct DecodeCase {
    stream: Vec<u8>,
    strict_opcodes: bool,
    budget: Option<u16>,
}

fuzz_target!(|case: DecodeCase| {
    let policy = if case.strict_opcodes {
        OpcodePolicy::RejectReserved
    } else {
        OpcodePolicy::Permissive
    };
    let options = DecodeOptions::new()
        .with_opcode_policy(policy)
        .with_max_payload_len(case.budget.map(usize::from));

    let mut source: &[u8] = &case.stream;
    while let Ok(frame) = Frame::read_with(&mut source, &options) {
        let encoded = frame.encode();
        let mut replay: &[u8] = &encoded;
        let decoded = Frame::read(&mut replay).expect("编码器输出必须可被自身解码");
        assert_eq!(decoded, frame);
        assert!(replay.is_empty());
    }
});
