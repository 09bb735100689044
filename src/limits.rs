/// デコーダーの制限設定
///
/// [`RequestDecoder::new`](crate::RequestDecoder::new) と
/// [`request_from_reader`](crate::request_from_reader) はデフォルト値を使うため、
/// 10MB を超えるボディや 100 行を超えるヘッダーは制限エラーになる。
/// 大きさで拒否したくない場合は [`DecoderLimits::unlimited`] を使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderLimits {
    /// 未消費データを保持するバッファの最大サイズ (デフォルト: 64KB)
    pub max_buffer_size: usize,
    /// 最大ヘッダー行数 (デフォルト: 100)
    ///
    /// 同名ヘッダーの結合前の行数で数える。
    pub max_headers_count: usize,
    /// 最大ヘッダー行長 (デフォルト: 8KB)
    ///
    /// リクエストラインにも同じ上限を適用する。
    pub max_header_line_size: usize,
    /// 最大ボディサイズ (デフォルト: 10MB)
    pub max_body_size: usize,
}

impl Default for DecoderLimits {
    fn default() -> Self {
        Self {
            max_buffer_size: 64 * 1024, // 64KB
            max_headers_count: 100,
            max_header_line_size: 8 * 1024,  // 8KB
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl DecoderLimits {
    /// 制限なしの設定を作成
    ///
    /// ヘッダー名の検索は線形走査なので、ヘッダー行数に上限が無いと
    /// ヘッダー部のデコードは行数の 2 乗に比例する。
    /// 信頼できない入力には `max_headers_count` を設定すること。
    pub fn unlimited() -> Self {
        Self {
            max_buffer_size: usize::MAX,
            max_headers_count: usize::MAX,
            max_header_line_size: usize::MAX,
            max_body_size: usize::MAX,
        }
    }
}
