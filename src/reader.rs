//! ブロッキング I/O からリクエストを読み取る
//!
//! `std::io::Read` からチャンク単位で読み取り、デコーダーが完了するまで `feed()` する。
//! 完了前に `Ok(0)` が返った場合は `Error::IncompleteRequest` になる。

use std::fmt;
use std::io::Read;

use crate::decoder::RequestDecoder;
use crate::error::Error;
use crate::limits::DecoderLimits;
use crate::request::Request;

/// 読み取りの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// 1 回の read で要求する最大バイト数 (デフォルト: 1024)
    pub read_buffer_size: usize,
    /// デコーダーの制限
    pub limits: DecoderLimits,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            read_buffer_size: 1024,
            limits: DecoderLimits::default(),
        }
    }
}

/// 読み取りエラー
#[derive(Debug)]
pub enum ReadError {
    /// I/O エラー
    Io(std::io::Error),
    /// デコードエラー
    Decode(Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "I/O error: {}", e),
            ReadError::Decode(e) => write!(f, "decode error: {}", e),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            ReadError::Decode(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e)
    }
}

impl From<Error> for ReadError {
    fn from(e: Error) -> Self {
        ReadError::Decode(e)
    }
}

/// デフォルト設定でリクエストを 1 つ読み取る
///
/// 制限は [`DecoderLimits::default`] になる。制限なしで読む場合は
/// [`request_from_reader_with`] に [`DecoderLimits::unlimited`] を渡す。
pub fn request_from_reader<R: Read>(reader: R) -> Result<Request, ReadError> {
    request_from_reader_with(reader, &ReaderOptions::default())
}

/// 設定を指定してリクエストを 1 つ読み取る
///
/// 完了した時点で読み取りをやめる。それ以降のデータは読まない。
pub fn request_from_reader_with<R: Read>(
    mut reader: R,
    options: &ReaderOptions,
) -> Result<Request, ReadError> {
    let mut decoder = RequestDecoder::with_limits(options.limits.clone());
    let mut buf = vec![0u8; options.read_buffer_size.max(1)];

    while !decoder.is_done() {
        let n = match reader.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReadError::Io(e)),
        };
        if n == 0 {
            return Err(ReadError::Decode(Error::IncompleteRequest));
        }
        decoder.feed(&buf[..n])?;
    }

    Ok(decoder.into_request()?)
}
