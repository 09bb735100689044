use std::fmt;

/// HTTP リクエストのデコードエラー
///
/// どのエラーもそのリクエストのデコードにとって終端となる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// リクエストラインのフィールド数またはバージョンが不正
    MalformedRequestLine,
    /// 許可リストにないメソッド
    InvalidHttpMethod,
    /// ヘッダー行が 2 トークンで構成されていない
    MalformedFieldLine,
    /// ヘッダー名がトークン文字の条件を満たさない
    InvalidFieldName,
    /// Content-Length が数値ではない
    ContentLengthNotANumber,
    /// リクエスト完了前に入力が尽きた
    IncompleteRequest,
    /// 状態機械が想定外の状態にある
    UnknownParserState,
    /// バッファサイズ超過
    BufferOverflow { size: usize, limit: usize },
    /// ヘッダー数超過
    TooManyHeaders { count: usize, limit: usize },
    /// ヘッダー行が長すぎる
    ///
    /// 行の全長は分割の仕方によっては検出時点で分からないため、上限のみを持つ。
    HeaderLineTooLong { limit: usize },
    /// ボディサイズ超過
    BodyTooLarge { size: usize, limit: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedRequestLine => write!(f, "malformed request line"),
            Error::InvalidHttpMethod => write!(f, "unknown HTTP method"),
            Error::MalformedFieldLine => write!(f, "malformed field-line"),
            Error::InvalidFieldName => write!(f, "invalid field name"),
            Error::ContentLengthNotANumber => write!(f, "content-length is not a number"),
            Error::IncompleteRequest => write!(f, "incomplete request"),
            Error::UnknownParserState => write!(f, "unknown parser state"),
            Error::BufferOverflow { size, limit } => {
                write!(f, "buffer overflow: {} > {}", size, limit)
            }
            Error::TooManyHeaders { count, limit } => {
                write!(f, "too many headers: {} > {}", count, limit)
            }
            Error::HeaderLineTooLong { limit } => {
                write!(f, "header line too long: exceeds {} bytes", limit)
            }
            Error::BodyTooLarge { size, limit } => {
                write!(f, "body too large: {} > {}", size, limit)
            }
        }
    }
}

impl std::error::Error for Error {}
