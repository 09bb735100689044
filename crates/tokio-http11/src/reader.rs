//! 非同期 I/O からリクエストを読み取る
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_http11::{ReadOptions, read_request};
//!
//! let (stream, _) = listener.accept().await?;
//! let request = read_request(stream, &ReadOptions::default()).await?;
//! ```

use std::time::Duration;

use http11_request_decoder::{
    DecodeStatus, DecoderLimits, Error as DecodeError, Request, RequestDecoder,
};
use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{Error, Result};

/// 読み取りの設定
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// 1 回の read で要求する最大バイト数 (デフォルト: 8192)
    pub read_buffer_size: usize,
    /// 1 回の read の期限 (デフォルト: 60 秒、`None` で無期限)
    pub read_timeout: Option<Duration>,
    /// デコーダーの制限
    pub limits: DecoderLimits,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            read_buffer_size: 8192,
            read_timeout: Some(Duration::from_secs(60)),
            limits: DecoderLimits::default(),
        }
    }
}

/// リクエストを 1 つ読み取る
///
/// デコーダーが完了するまで read を繰り返す。
/// 完了前に EOF に達した場合は `Error::Http(IncompleteRequest)` を返す。
/// 完了後に同じ read で届いた余分なバイトは捨て、ログに残す。
pub async fn read_request<R>(mut reader: R, options: &ReadOptions) -> Result<Request>
where
    R: AsyncRead + Unpin,
{
    let mut decoder = RequestDecoder::with_limits(options.limits.clone());
    let mut buf = vec![0u8; options.read_buffer_size.max(1)];

    loop {
        let n = match options.read_timeout {
            Some(timeout) => tokio::time::timeout(timeout, reader.read(&mut buf)).await??,
            None => reader.read(&mut buf).await?,
        };

        if n == 0 {
            debug!("EOF before request completed ({:?})", decoder.state());
            return Err(Error::Http(DecodeError::IncompleteRequest));
        }

        match decoder.feed(&buf[..n])? {
            DecodeStatus::Incomplete => {}
            DecodeStatus::Complete { trailing } => {
                if trailing > 0 {
                    warn!("{} trailing bytes after request were ignored", trailing);
                }
                return Ok(decoder.into_request()?);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_read_request_from_slice() {
        let data: &[u8] = b"POST /coffee HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let request = read_request(data, &ReadOptions::default()).await.unwrap();
        assert_eq!(request.method(), "POST");
        assert_eq!(request.target(), "/coffee");
        assert_eq!(request.body, b"hello");
    }

    #[tokio::test]
    async fn test_read_request_small_reads() {
        let data: &[u8] = b"GET / HTTP/1.1\r\nHost: a\r\nHost: b\r\n\r\n";
        let options = ReadOptions {
            read_buffer_size: 1,
            ..Default::default()
        };
        let request = read_request(data, &options).await.unwrap();
        assert_eq!(request.header("host"), "a,b");
    }

    #[tokio::test]
    async fn test_read_request_incomplete() {
        let data: &[u8] = b"POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\nhe";
        let err = read_request(data, &ReadOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_incomplete());
    }

    #[tokio::test]
    async fn test_read_request_decode_error() {
        let data: &[u8] = b"GET / HTTP/2.0\r\n\r\n";
        let err = read_request(data, &ReadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http(DecodeError::MalformedRequestLine)));
    }

    #[tokio::test]
    async fn test_read_request_over_duplex() {
        let (mut client, server) = tokio::io::duplex(64);
        let handle = tokio::spawn(async move {
            read_request(server, &ReadOptions::default()).await
        });

        client.write_all(b"PUT /items HTTP/1.1\r\n").await.unwrap();
        client.write_all(b"Content-Length: 3\r\n\r\n").await.unwrap();
        client.write_all(b"abc").await.unwrap();

        let request = handle.await.unwrap().unwrap();
        assert_eq!(request.method(), "PUT");
        assert_eq!(request.body, b"abc");
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_request_timeout() {
        let (_client, server) = tokio::io::duplex(64);
        let options = ReadOptions {
            read_timeout: Some(Duration::from_millis(100)),
            ..Default::default()
        };
        let err = read_request(server, &options).await.unwrap_err();
        assert!(matches!(err, Error::Timeout));
    }
}
