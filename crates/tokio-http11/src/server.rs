//! TCP リスナー
//!
//! 接続ごとにリクエストを 1 つデコードしてハンドラーに渡す。
//! レスポンスの生成や Keep-Alive は扱わない。ハンドラーが戻ると接続を閉じる。
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_http11::{Listener, Request};
//!
//! let listener = Listener::bind("0.0.0.0:42069").await?;
//! listener
//!     .serve(|request: Request, peer_addr: SocketAddr| async move {
//!         println!("{} {} from {}", request.method(), request.target(), peer_addr);
//!     })
//!     .await?;
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http11_request_decoder::{DecoderLimits, Request};
use log::{debug, info};
use tokio::net::{TcpListener, TcpStream};

use crate::error::Result;
use crate::reader::{ReadOptions, read_request};

/// デコード済みリクエストのハンドラー
pub trait Handler: Send + Sync + 'static {
    /// リクエストを処理する
    fn handle(&self, request: Request, peer_addr: SocketAddr) -> impl Future<Output = ()> + Send;
}

/// 関数からハンドラーを作成
impl<F, Fut> Handler for F
where
    F: Fn(Request, SocketAddr) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send,
{
    fn handle(&self, request: Request, peer_addr: SocketAddr) -> impl Future<Output = ()> + Send {
        (self)(request, peer_addr)
    }
}

/// TCP リスナー
pub struct Listener {
    listener: TcpListener,
    options: ReadOptions,
}

impl Listener {
    /// 指定アドレスにバインド
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            options: ReadOptions::default(),
        })
    }

    /// 1 回の read の期限を設定 (`None` で無期限)
    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.options.read_timeout = timeout;
        self
    }

    /// 読み取りバッファサイズを設定
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.options.read_buffer_size = size;
        self
    }

    /// デコーダーの制限を設定
    pub fn limits(mut self, limits: DecoderLimits) -> Self {
        self.options.limits = limits;
        self
    }

    /// ローカルアドレスを取得
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// 接続の受け付けを開始
    ///
    /// accept に失敗した場合や接続ごとのエラーは標準エラー出力に書いて続行する。
    pub async fn serve<H: Handler>(self, handler: H) -> Result<()> {
        let options = Arc::new(self.options);
        let handler = Arc::new(handler);

        loop {
            let (stream, peer_addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    eprintln!("Failed to accept connection: {}", e);
                    continue;
                }
            };
            let options = options.clone();
            let handler = handler.clone();

            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, peer_addr, &options, &*handler).await {
                    eprintln!("Connection error from {}: {}", peer_addr, e);
                }
            });
        }
    }

    /// 単一の接続を処理 (テスト用)
    pub async fn handle_one<H: Handler>(self, handler: H) -> Result<()> {
        let (stream, peer_addr) = self.listener.accept().await?;
        handle_connection(stream, peer_addr, &self.options, &handler).await
    }
}

/// 接続からリクエストを 1 つ読み取ってハンドラーに渡す
async fn handle_connection<H: Handler>(
    stream: TcpStream,
    peer_addr: SocketAddr,
    options: &ReadOptions,
    handler: &H,
) -> Result<()> {
    info!("connection accepted from {}", peer_addr);

    let request = read_request(stream, options).await?;
    debug!(
        "decoded {} {} from {} ({} headers, {} body bytes)",
        request.method(),
        request.target(),
        peer_addr,
        request.headers.len(),
        request.body.len()
    );

    handler.handle(request, peer_addr).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_listener_bind() {
        let listener = Listener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(addr.port() > 0);
    }

    #[tokio::test]
    async fn test_handle_one() {
        let listener = Listener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        let tx = std::sync::Mutex::new(Some(tx));

        let server = tokio::spawn(listener.handle_one(move |request: Request, _: SocketAddr| {
            if let Some(tx) = tx.lock().unwrap().take() {
                let _ = tx.send(request);
            }
            async {}
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"POST /coffee HTTP/1.1\r\nHost: localhost\r\nContent-Length: 4\r\n\r\n")
            .await
            .unwrap();
        stream.write_all(b"mild").await.unwrap();

        server.await.unwrap().unwrap();
        let request = rx.await.unwrap();
        assert_eq!(request.method(), "POST");
        assert_eq!(request.target(), "/coffee");
        assert_eq!(request.header("host"), "localhost");
        assert_eq!(request.body, b"mild");
    }

    #[tokio::test]
    async fn test_handle_one_closed_early() {
        let listener = Listener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(listener.handle_one(|_: Request, _: SocketAddr| async {}));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(b"GET / HTTP/1.1\r\nHost: a\r\n").await.unwrap();
        drop(stream);

        let err = server.await.unwrap().unwrap_err();
        assert!(err.is_incomplete());
    }
}
