//! tokio_http11 - Tokio integration for http11_request_decoder
//!
//! tokio を使用して非同期 I/O から HTTP/1.1 リクエストを読み取るライブラリ。
//!
//! ## Features
//!
//! - `server` - TCP リスナー機能 (デフォルト有効)
//! - `full` - すべての機能を有効化
//!
//! ## 特徴
//!
//! - **http11_request_decoder ベース**: Sans I/O デコーダーに read ループを被せた設計
//! - **非同期 I/O**: tokio による完全非同期対応
//! - **読み取り期限**: read ごとのタイムアウトを設定できる
//! - **ログ**: `log` クレート経由で接続や余分なバイトを記録
//!
//! ## リクエストの読み取り
//!
//! ```ignore
//! use tokio_http11::{ReadOptions, read_request};
//!
//! let request = read_request(stream, &ReadOptions::default()).await?;
//! println!("{} {}", request.method(), request.target());
//! ```
//!
//! ## リスナー
//!
//! ```ignore
//! use tokio_http11::{Listener, Request};
//!
//! let listener = Listener::bind("0.0.0.0:42069").await?;
//! listener
//!     .serve(|request: Request, peer_addr: SocketAddr| async move {
//!         println!("{} from {}", request.target(), peer_addr);
//!     })
//!     .await?;
//! ```

pub mod error;
pub mod reader;
#[cfg(feature = "server")]
pub mod server;

pub use error::{Error, Result};
pub use reader::{ReadOptions, read_request};
#[cfg(feature = "server")]
pub use server::{Handler, Listener};

// http11_request_decoder の型を re-export
pub use http11_request_decoder::{DecoderLimits, HeaderTable, Request, RequestLine};
