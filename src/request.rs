use std::borrow::Cow;

use crate::headers::HeaderTable;

/// リクエストライン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// HTTP メソッド (GET, POST, PUT, DELETE)
    pub method: String,
    /// リクエストターゲット (デコードせず受信したバイト列のまま)
    pub target: Vec<u8>,
    /// HTTP バージョン (常に "1.1")
    pub version: String,
}

/// デコード済み HTTP リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// リクエストライン
    pub request_line: RequestLine,
    /// ヘッダー
    pub headers: HeaderTable,
    /// ボディ
    pub body: Vec<u8>,
}

impl Request {
    /// HTTP メソッドを取得
    pub fn method(&self) -> &str {
        &self.request_line.method
    }

    /// リクエストターゲットを取得
    ///
    /// UTF-8 として不正なバイトは U+FFFD に置き換える。
    pub fn target(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.request_line.target)
    }

    /// ヘッダーを取得 (大文字小文字を区別しない)
    ///
    /// 存在しない場合は空文字列を返す。
    pub fn header(&self, name: &str) -> Cow<'_, str> {
        self.headers.get(name)
    }
}
