//! ヘッダーテーブル
//!
//! ヘッダー行を 1 行ずつパースして蓄積する。
//! 名前は小文字に正規化して保持し、同名ヘッダーは値をカンマで結合する。
//! 値は受信したバイト列のまま保持する (obs-text を含んでもよい)。
//!
//! ```rust
//! use http11_request_decoder::HeaderTable;
//!
//! let mut headers = HeaderTable::new();
//! let (n, done) = headers.parse(b"Host: example.com\r\n\r\n").unwrap();
//! assert_eq!(n, 19);
//! assert!(!done);
//! assert_eq!(headers.get("HOST"), "example.com");
//! ```

use std::borrow::Cow;

use crate::error::Error;

/// 行の終端
pub(crate) const CRLF: &[u8] = b"\r\n";

/// ヘッダーテーブル
///
/// 名前は小文字で保持する。`entries()` の順序は初出順だが、意味を持たない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    entries: Vec<(String, Vec<u8>)>,
}

impl HeaderTable {
    /// 空のヘッダーテーブルを作成
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// ヘッダー行を 1 行パース
    ///
    /// 戻り値は `(消費バイト数, ヘッダー終端かどうか)`。
    ///
    /// - CRLF がまだ無い場合は `(0, false)` を返す。呼び出し側は追加データを待つ
    /// - 空行の場合は `(2, true)` を返す
    /// - それ以外は CRLF を含む行の長さを返す
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), Error> {
        let pos = match find_line(data) {
            None => return Ok((0, false)),
            Some(0) => return Ok((CRLF.len(), true)),
            Some(pos) => pos,
        };

        // 連続する空白はまとめて区切りとして扱う
        let fields: Vec<&[u8]> = data[..pos]
            .split(|&b| is_whitespace(b))
            .filter(|field| !field.is_empty())
            .collect();
        let [name, value] = fields[..] else {
            return Err(Error::MalformedFieldLine);
        };

        if !is_valid_field_name(name) {
            return Err(Error::InvalidFieldName);
        }
        // 検証済みなので名前は ASCII のみ
        let name = String::from_utf8_lossy(&name[..name.len() - 1]).to_ascii_lowercase();
        self.set(name, value);

        Ok((pos + CRLF.len(), false))
    }

    // 名前の検索は線形走査。ヘッダー数は DecoderLimits で抑える
    fn set(&mut self, name: String, value: &[u8]) {
        if let Some((_, prev)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            prev.push(b',');
            prev.extend_from_slice(value);
        } else {
            self.entries.push((name, value.to_vec()));
        }
    }

    /// ヘッダーを取得 (大文字小文字を区別しない)
    ///
    /// 存在しない場合は空文字列を返す。
    /// UTF-8 として不正なバイトは U+FFFD に置き換える。元のバイト列は [`HeaderTable::get_bytes`] で取得できる。
    pub fn get(&self, name: &str) -> Cow<'_, str> {
        String::from_utf8_lossy(self.get_bytes(name))
    }

    /// ヘッダーの値をバイト列のまま取得 (大文字小文字を区別しない)
    ///
    /// 存在しない場合は空スライスを返す。
    pub fn get_bytes(&self, name: &str) -> &[u8] {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    /// ヘッダーが存在するか確認
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// すべての `(名前, 値)` を取得
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// 異なるヘッダー名の数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// CRLF で終わる行を探す
pub(crate) fn find_line(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == CRLF)
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// ヘッダー名 (末尾のコロンを含む) が有効か確認
///
/// コロンの前に 1 文字以上が必要で、各文字は英字または
/// `! # $ % & ' * + - . ^ _ ` | ~` のいずれか。
fn is_valid_field_name(name: &[u8]) -> bool {
    match name.split_last() {
        Some((b':', rest)) if !rest.is_empty() => rest.iter().all(|&b| is_field_name_char(b)),
        _ => false,
    }
}

fn is_field_name_char(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'A'..=b'Z' | b'^' | b'_' | b'`' | b'a'..=b'z' | b'|' | b'~'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_header() {
        let mut headers = HeaderTable::new();
        let (n, done) = headers.parse(b"Host: localhost:42069\r\n\r\n").unwrap();
        assert_eq!(n, 23);
        assert!(!done);
        assert_eq!(headers.get("Host"), "localhost:42069");
        assert_eq!(headers.get("HOST"), "localhost:42069");
    }

    #[test]
    fn multiple_headers_then_terminator() {
        let mut headers = HeaderTable::new();
        let mut data: &[u8] = b"Host: localhost:42069\r\nUser-Agent: curl/8.14.1\r\n\r\n";

        let (n, done) = headers.parse(data).unwrap();
        assert_eq!(n, 23);
        assert!(!done);
        data = &data[n..];

        let (n, done) = headers.parse(data).unwrap();
        assert_eq!(n, 25);
        assert!(!done);
        assert_eq!(headers.get("user-agent"), "curl/8.14.1");
        data = &data[n..];

        let (n, done) = headers.parse(data).unwrap();
        assert_eq!(n, 2);
        assert!(done);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn repeated_name_joins_with_comma() {
        let mut headers = HeaderTable::new();
        let data = b"Set-Person: daniel-pessoa\r\nset-person: gabriel-moraes\r\n";
        let (n, _) = headers.parse(data).unwrap();
        assert_eq!(n, 27);
        assert_eq!(headers.get("Set-Person"), "daniel-pessoa");
        let (n, _) = headers.parse(&data[n..]).unwrap();
        assert_eq!(n, 28);
        assert_eq!(headers.get("Set-Person"), "daniel-pessoa,gabriel-moraes");
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let mut headers = HeaderTable::new();
        let (n, done) = headers
            .parse(b"         Host: \t\t localhost:42069\t\t\t\t\r\n\r\n")
            .unwrap();
        assert_eq!(n, 39);
        assert!(!done);
        assert_eq!(headers.get("host"), "localhost:42069");
    }

    #[test]
    fn missing_crlf_needs_more_data() {
        let mut headers = HeaderTable::new();
        assert_eq!(headers.parse(b"Host: localhost").unwrap(), (0, false));
        assert_eq!(headers.parse(b"\r").unwrap(), (0, false));
        assert!(headers.is_empty());
    }

    #[test]
    fn whitespace_before_colon_is_malformed() {
        let mut headers = HeaderTable::new();
        assert_eq!(
            headers.parse(b"Host : localhost:42069\r\n\r\n"),
            Err(Error::MalformedFieldLine)
        );
        assert!(headers.is_empty());
    }

    #[test]
    fn value_with_inner_space_is_malformed() {
        let mut headers = HeaderTable::new();
        assert_eq!(
            headers.parse(b"User-Agent: Mozilla 5.0\r\n"),
            Err(Error::MalformedFieldLine)
        );
    }

    #[test]
    fn missing_separator_is_malformed() {
        let mut headers = HeaderTable::new();
        assert_eq!(
            headers.parse(b"Host\r\n"),
            Err(Error::MalformedFieldLine)
        );
    }

    #[test]
    fn empty_field_name() {
        let mut headers = HeaderTable::new();
        assert_eq!(
            headers.parse(b": localhost:42069\r\n\r\n"),
            Err(Error::InvalidFieldName)
        );
    }

    #[test]
    fn field_name_without_colon() {
        let mut headers = HeaderTable::new();
        assert_eq!(
            headers.parse(b"Host localhost:42069\r\n\r\n"),
            Err(Error::InvalidFieldName)
        );
    }

    #[test]
    fn field_name_with_non_token_characters() {
        let mut headers = HeaderTable::new();
        assert_eq!(
            headers.parse("H©st: localhost:42069\r\n\r\n".as_bytes()),
            Err(Error::InvalidFieldName)
        );
        assert_eq!(
            headers.parse(b"X-Version2: a\r\n"),
            Err(Error::InvalidFieldName)
        );
    }

    #[test]
    fn token_punctuation_is_accepted() {
        let mut headers = HeaderTable::new();
        headers.parse(b"X!#$%&'*+-.^_`|~: ok\r\n").unwrap();
        assert_eq!(headers.get("x!#$%&'*+-.^_`|~"), "ok");
    }

    #[test]
    fn absent_header_is_empty() {
        let headers = HeaderTable::new();
        assert_eq!(headers.get("content-length"), "");
        assert!(!headers.contains("content-length"));
    }

    #[test]
    fn entries_are_lower_cased() {
        let mut headers = HeaderTable::new();
        headers.parse(b"Content-Type: text/plain\r\n").unwrap();
        headers.parse(b"ACCEPT: */*\r\n").unwrap();
        let entries: Vec<_> = headers.entries().collect();
        assert_eq!(
            entries,
            vec![
                ("content-type", &b"text/plain"[..]),
                ("accept", &b"*/*"[..])
            ]
        );
    }

    #[test]
    fn obs_text_value_is_kept_as_bytes() {
        let mut headers = HeaderTable::new();
        let (n, done) = headers.parse(b"X-Name: caf\xe9\r\n").unwrap();
        assert_eq!(n, 14);
        assert!(!done);
        assert_eq!(headers.get_bytes("x-name"), b"caf\xe9");
        assert_eq!(headers.get("x-name"), "caf\u{fffd}");

        headers.parse(b"X-Name: \xff\r\n").unwrap();
        assert_eq!(headers.get_bytes("X-NAME"), b"caf\xe9,\xff");
    }

    #[test]
    fn absent_header_bytes_are_empty() {
        let headers = HeaderTable::new();
        assert_eq!(headers.get_bytes("host"), b"");
    }
}
