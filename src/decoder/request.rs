//! HTTP リクエストデコーダー

use crate::error::Error;
use crate::headers::{CRLF, HeaderTable};
use crate::limits::DecoderLimits;
use crate::request::{Request, RequestLine};

use super::phase::DecoderState;
use super::request_line::parse_request_line;

/// `feed()` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// 追加データが必要
    Incomplete,
    /// リクエストが完了した
    ///
    /// `trailing` は今回の呼び出しで完了後に届いた余分なバイト数。
    /// 余分なバイトはエラーではなく、バッファにも保持しない。
    Complete { trailing: usize },
}

/// 1 回のステップの結果
enum Step {
    /// 状態が進んだ
    Advanced,
    /// 追加データが必要
    NeedMore,
}

/// HTTP リクエストデコーダー (Sans I/O)
///
/// 1 リクエストにつき 1 つ作成し、使い回さない。
///
/// ```rust
/// use http11_request_decoder::{DecodeStatus, RequestDecoder};
///
/// let mut decoder = RequestDecoder::new();
/// assert_eq!(
///     decoder.feed(b"POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\nhe").unwrap(),
///     DecodeStatus::Incomplete
/// );
/// assert_eq!(
///     decoder.feed(b"llo").unwrap(),
///     DecodeStatus::Complete { trailing: 0 }
/// );
/// let request = decoder.into_request().unwrap();
/// assert_eq!(request.body, b"hello");
/// ```
#[derive(Debug)]
pub struct RequestDecoder {
    buf: Vec<u8>,
    /// buf 内の消費済みバイト数
    cursor: usize,
    state: DecoderState,
    request_line: Option<RequestLine>,
    headers: HeaderTable,
    header_lines: usize,
    content_length: Option<usize>,
    body: Vec<u8>,
    request: Option<Request>,
    trailing: usize,
    failed: Option<Error>,
    limits: DecoderLimits,
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestDecoder {
    /// 新しいデコーダーを作成
    pub fn new() -> Self {
        Self::with_limits(DecoderLimits::default())
    }

    /// 制限付きでデコーダーを作成
    pub fn with_limits(limits: DecoderLimits) -> Self {
        Self {
            buf: Vec::new(),
            cursor: 0,
            state: DecoderState::AwaitingRequestLine,
            request_line: None,
            headers: HeaderTable::new(),
            header_lines: 0,
            content_length: None,
            body: Vec::new(),
            request: None,
            trailing: 0,
            failed: None,
            limits,
        }
    }

    /// 制限設定を取得
    pub fn limits(&self) -> &DecoderLimits {
        &self.limits
    }

    /// 現在の状態を取得
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// リクエストが完了したか確認
    pub fn is_done(&self) -> bool {
        self.state == DecoderState::Done
    }

    /// 完了したリクエストを取得
    ///
    /// 完了前は `None` を返す。
    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    /// 完了したリクエストを取り出す
    ///
    /// 完了前に呼んだ場合は `Error::IncompleteRequest` を返す。
    pub fn into_request(self) -> Result<Request, Error> {
        if let Some(e) = self.failed {
            return Err(e);
        }
        self.request.ok_or(Error::IncompleteRequest)
    }

    /// 未消費のバッファデータを取得
    pub fn buffered(&self) -> &[u8] {
        &self.buf[self.cursor..]
    }

    /// 完了後に届いた余分なバイト数の合計
    pub fn trailing_bytes(&self) -> usize {
        self.trailing
    }

    /// データを追加して状態機械を進める
    ///
    /// 追加データが必要な時点、または完了した時点で戻る。
    /// エラーは終端で、以降の呼び出しは同じエラーを返す。
    pub fn feed(&mut self, data: &[u8]) -> Result<DecodeStatus, Error> {
        if let Some(e) = &self.failed {
            return Err(e.clone());
        }
        if self.is_done() {
            self.trailing += data.len();
            return Ok(DecodeStatus::Complete {
                trailing: data.len(),
            });
        }

        self.buf.extend_from_slice(data);
        match self.run() {
            Ok(status) => Ok(status),
            Err(e) => {
                self.failed = Some(e.clone());
                Err(e)
            }
        }
    }

    fn run(&mut self) -> Result<DecodeStatus, Error> {
        while !self.is_done() {
            match self.step()? {
                Step::Advanced => {}
                Step::NeedMore => {
                    self.compact();
                    if self.buf.len() > self.limits.max_buffer_size {
                        return Err(Error::BufferOverflow {
                            size: self.buf.len(),
                            limit: self.limits.max_buffer_size,
                        });
                    }
                    return Ok(DecodeStatus::Incomplete);
                }
            }
        }

        // 完了後の余りは保持しない
        let trailing = self.buf.len() - self.cursor;
        self.trailing += trailing;
        self.buf.clear();
        self.cursor = 0;
        Ok(DecodeStatus::Complete { trailing })
    }

    /// 消費済みのバイトを解放
    fn compact(&mut self) {
        self.buf.drain(..self.cursor);
        self.cursor = 0;
    }

    fn step(&mut self) -> Result<Step, Error> {
        match self.state {
            DecoderState::AwaitingRequestLine => {
                let Some((request_line, n)) = parse_request_line(&self.buf[self.cursor..])? else {
                    self.check_pending_line()?;
                    return Ok(Step::NeedMore);
                };
                self.check_line_size(n)?;
                self.request_line = Some(request_line);
                self.cursor += n;
                self.state = DecoderState::AwaitingHeaders;
                Ok(Step::Advanced)
            }
            DecoderState::AwaitingHeaders => {
                let (n, done) = self.headers.parse(&self.buf[self.cursor..])?;
                if n == 0 {
                    self.check_pending_line()?;
                    return Ok(Step::NeedMore);
                }
                self.check_line_size(n)?;
                self.cursor += n;
                if done {
                    self.state = DecoderState::AwaitingBody;
                } else {
                    self.header_lines += 1;
                    if self.header_lines > self.limits.max_headers_count {
                        return Err(Error::TooManyHeaders {
                            count: self.header_lines,
                            limit: self.limits.max_headers_count,
                        });
                    }
                }
                Ok(Step::Advanced)
            }
            DecoderState::AwaitingBody => {
                let content_length = match self.content_length {
                    Some(len) => len,
                    None => {
                        let len = self.parse_content_length()?;
                        self.content_length = Some(len);
                        len
                    }
                };

                let remaining = content_length.saturating_sub(self.body.len());
                let available = self.buf.len() - self.cursor;
                let n = remaining.min(available);
                self.body
                    .extend_from_slice(&self.buf[self.cursor..self.cursor + n]);
                self.cursor += n;

                if self.body.len() < content_length {
                    return Ok(Step::NeedMore);
                }
                self.finish()?;
                Ok(Step::Advanced)
            }
            DecoderState::Done => Err(Error::UnknownParserState),
        }
    }

    /// Content-Length を解決
    ///
    /// ヘッダーが無い場合は 0 として扱う。
    fn parse_content_length(&self) -> Result<usize, Error> {
        let value = self.headers.get("content-length");
        if value.is_empty() {
            return Ok(0);
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::ContentLengthNotANumber);
        }
        let len = value
            .parse::<usize>()
            .map_err(|_| Error::ContentLengthNotANumber)?;
        if len > self.limits.max_body_size {
            return Err(Error::BodyTooLarge {
                size: len,
                limit: self.limits.max_body_size,
            });
        }
        Ok(len)
    }

    fn finish(&mut self) -> Result<(), Error> {
        let request_line = self.request_line.take().ok_or(Error::UnknownParserState)?;
        self.request = Some(Request {
            request_line,
            headers: std::mem::take(&mut self.headers),
            body: std::mem::take(&mut self.body),
        });
        self.state = DecoderState::Done;
        Ok(())
    }

    /// CRLF 待ちの行が上限を超えていないか確認
    fn check_pending_line(&self) -> Result<(), Error> {
        let mut pending = &self.buf[self.cursor..];
        // 末尾の CR は次に LF が来れば行の終端になる
        if let Some((b'\r', rest)) = pending.split_last() {
            pending = rest;
        }
        if pending.len() > self.limits.max_header_line_size {
            return Err(Error::HeaderLineTooLong {
                limit: self.limits.max_header_line_size,
            });
        }
        Ok(())
    }

    fn check_line_size(&self, n: usize) -> Result<(), Error> {
        // 上限は CRLF を含まない行の長さ
        if n.saturating_sub(CRLF.len()) > self.limits.max_header_line_size {
            return Err(Error::HeaderLineTooLong {
                limit: self.limits.max_header_line_size,
            });
        }
        Ok(())
    }
}
