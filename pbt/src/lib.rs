//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// ヘッダー生成
// ========================================

/// ヘッダー名に使える文字 (英字と記号のみ、数字は不可)
pub fn field_name_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        Just('-'),
        Just('_'),
        Just('.'),
        Just('!'),
        Just('~'),
    ]
}

/// ヘッダー名 (1-16 文字)
pub fn field_name() -> impl Strategy<Value = String> {
    proptest::collection::vec(field_name_char(), 1..=16)
        .prop_map(|chars| chars.into_iter().collect())
}

/// ヘッダー値 (空白を含まない可視文字)
pub fn field_value() -> impl Strategy<Value = String> {
    "[!-~]{1,32}"
}

// ========================================
// リクエストライン生成
// ========================================

/// 受け付けるメソッド
pub fn http_method() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("GET".to_string()),
        Just("POST".to_string()),
        Just("PUT".to_string()),
        Just("DELETE".to_string()),
    ]
}

/// リクエストターゲット (origin-form と asterisk-form)
pub fn http_target() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        Just("*".to_string()),
        "/[a-zA-Z0-9/_.?=&%-]{1,64}".prop_map(|s| s),
    ]
}

// ========================================
// エンコード
// ========================================

/// リクエストをワイヤ形式に組み立てる
///
/// ボディが空でなければ Content-Length を末尾のヘッダーとして付ける。
pub fn encode_request(
    method: &str,
    target: &str,
    headers: &[(String, String)],
    body: &[u8],
) -> Vec<u8> {
    let mut data = format!("{} {} HTTP/1.1\r\n", method, target).into_bytes();
    for (name, value) in headers {
        data.extend(format!("{}: {}\r\n", name, value).as_bytes());
    }
    if !body.is_empty() {
        data.extend(format!("Content-Length: {}\r\n", body.len()).as_bytes());
    }
    data.extend(b"\r\n");
    data.extend(body);
    data
}

/// obs-text (0x80-0xFF) を含むヘッダー値のバイト列
pub fn field_value_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![0x21u8..=0x7e, 0x80u8..=0xff], 1..32)
}
