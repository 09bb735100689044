//! デコード状態の定義

/// デコーダーの状態
///
/// 状態は前方にのみ遷移し、一度抜けた状態には戻らない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// リクエストライン待ち
    AwaitingRequestLine,
    /// ヘッダー待ち
    AwaitingHeaders,
    /// ボディ読み取り中 (Content-Length)
    AwaitingBody,
    /// 完了
    Done,
}
