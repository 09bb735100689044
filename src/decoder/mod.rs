//! HTTP/1.1 リクエストデコーダーモジュール
//!
//! Sans I/O 設計に基づくストリーミングデコーダーを提供。
//! 受信したデータを任意の大きさで `feed()` すれば、
//! 行やボディがチャンク境界をまたいでいても続きから再開する。
//!
//! ## 使い方
//!
//! ```rust
//! use http11_request_decoder::{DecoderState, RequestDecoder};
//!
//! let mut decoder = RequestDecoder::new();
//!
//! // 1 バイトずつでも結果は同じ
//! for b in b"GET / HTTP/1.1\r\nHost: a\r\nHost: b\r\n\r\n" {
//!     decoder.feed(&[*b]).unwrap();
//! }
//! assert_eq!(decoder.state(), DecoderState::Done);
//!
//! let request = decoder.request().unwrap();
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.header("host"), "a,b");
//! assert!(request.body.is_empty());
//! ```

mod phase;
mod request;
mod request_line;

// 公開 API
pub use phase::DecoderState;
pub use request::{DecodeStatus, RequestDecoder};
