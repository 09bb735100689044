//! # http11_request_decoder
//!
//! 依存なしの HTTP/1.1 リクエストデコーダー (Sans I/O)
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用
//! - **Sans I/O**: I/O を完全に分離した設計
//! - **インクリメンタル**: 任意の大きさのチャンクで `feed()` できる
//!
//! ## 対応範囲
//!
//! - リクエストライン: `GET`, `POST`, `PUT`, `DELETE` と `HTTP/1.1` のみ
//! - ヘッダー: 1 行 1 フィールド、同名ヘッダーはカンマで結合
//! - ボディ: Content-Length による固定長のみ (chunked は非対応)
//! - 値とターゲット: 受信したバイト列のまま保持 (obs-text も受け付ける)
//! - 制限: デフォルトでは [`DecoderLimits`] の上限を適用する。無制限にするには
//!   [`DecoderLimits::unlimited`] を使う
//!
//! ## 使い方
//!
//! ### デコーダーに直接 feed する
//!
//! ```rust
//! use http11_request_decoder::{DecodeStatus, RequestDecoder};
//!
//! let mut decoder = RequestDecoder::new();
//! // 受信データを feed...
//! let status = decoder
//!     .feed(b"POST /coffee HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello")
//!     .unwrap();
//! assert_eq!(status, DecodeStatus::Complete { trailing: 0 });
//!
//! let request = decoder.into_request().unwrap();
//! assert_eq!(request.request_line.target, b"/coffee");
//! assert_eq!(request.headers.get("content-length"), "5");
//! assert_eq!(request.body, b"hello");
//! ```
//!
//! ### `std::io::Read` から読み取る
//!
//! ```rust
//! use http11_request_decoder::request_from_reader;
//!
//! let data: &[u8] = b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";
//! let request = request_from_reader(data).unwrap();
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.header("Host"), "localhost:42069");
//! ```

mod decoder;
mod error;
mod headers;
mod limits;
mod reader;
mod request;

pub use decoder::{DecodeStatus, DecoderState, RequestDecoder};
pub use error::Error;
pub use headers::HeaderTable;
pub use limits::DecoderLimits;
pub use reader::{ReadError, ReaderOptions, request_from_reader, request_from_reader_with};
pub use request::{Request, RequestLine};
