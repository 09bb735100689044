//! リクエストラインのパース

use crate::error::Error;
use crate::headers::{CRLF, find_line};
use crate::request::RequestLine;

/// 許可するメソッド
const ALLOWED_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];

/// リクエストラインをパース
///
/// CRLF がまだ無い場合は `None` を返す。
/// 成功時は CRLF を含む消費バイト数を返す。
///
/// Parse: METHOD SP TARGET SP HTTP/1.1 CRLF
pub(crate) fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, Error> {
    let Some(pos) = find_line(data) else {
        return Ok(None);
    };

    let fields: Vec<&[u8]> = data[..pos].split(|&b| b == b' ').collect();
    let [method, target, version] = fields[..] else {
        return Err(Error::MalformedRequestLine);
    };

    let version_parts: Vec<&[u8]> = version.split(|&b| b == b'/').collect();
    let [b"HTTP", b"1.1"] = version_parts[..] else {
        return Err(Error::MalformedRequestLine);
    };

    // メソッドの検証はバージョンの後
    let method = std::str::from_utf8(method).map_err(|_| Error::InvalidHttpMethod)?;
    if !ALLOWED_METHODS.contains(&method) {
        return Err(Error::InvalidHttpMethod);
    }

    let request_line = RequestLine {
        method: method.to_string(),
        target: target.to_vec(),
        version: "1.1".to_string(),
    };
    Ok(Some((request_line, pos + CRLF.len())))
}
