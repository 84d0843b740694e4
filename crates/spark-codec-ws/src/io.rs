//! 字节源 / 字节汇能力抽象。
//!
//! # 设计动机（Why）
//! - 解码器只需要“读满 N 字节或失败”，编码器只需要“写出这些字节”；把两者建模为注入能力，
//!   而非具体的 `TcpStream`，测试即可直接使用内存切片；
//! - 缓冲与 flush 策略属于字节汇本身，编解码器不做任何假设。
//!
//! # 契约说明（What）
//! - 所有 `std::io::Read` 自动实现 [`ByteSource`]，流提前结束时返回 `ErrorKind::UnexpectedEof`；
//! - 所有 `std::io::Write` 自动实现 [`ByteSink`]，使用 `write_all` 且不隐式 flush。

use std::io::{self, Read, Write};

/// 阻塞式字节源。
pub trait ByteSource {
    /// 读满 `buf`，若在读满前遇到流结束或传输错误则失败。
    fn read_fully(&mut self, buf: &mut [u8]) -> io::Result<()>;

    /// 读取单个字节。
    fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        self.read_fully(&mut byte)?;
        Ok(byte[0])
    }
}

impl<R: Read + ?Sized> ByteSource for R {
    fn read_fully(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.read_exact(buf)
    }
}

/// 字节汇。
pub trait ByteSink {
    /// 写出整段字节；每帧恰好调用一次。
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<W: Write + ?Sized> ByteSink for W {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_source_reports_eof() {
        let mut source: &[u8] = &[0x01, 0x02];
        assert_eq!(source.read_byte().expect("首字节"), 0x01);
        let mut buf = [0u8; 2];
        let err = source.read_fully(&mut buf).expect_err("只剩一个字节");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn vec_sink_appends() {
        let mut sink = Vec::new();
        sink.write_bytes(&[1, 2]).expect("写入");
        sink.write_bytes(&[3]).expect("写入");
        assert_eq!(sink, vec![1, 2, 3]);
    }
}
