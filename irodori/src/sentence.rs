//! 入力テキストの保持と読み込み

use std::io::Read;

use crate::errors::{IrodoriError, Result};

/// トークン化対象のテキストを保持する構造体
///
/// [`Worker`](crate::tokenizer::worker::Worker)が所有し、文ごとに再利用されます。
#[derive(Default, Clone, Debug)]
pub struct Sentence {
    input: String,
}

impl Sentence {
    /// 新しい空の `Sentence` インスタンスを生成します
    pub fn new() -> Self {
        Self::default()
    }

    /// 内部状態をクリアします
    #[inline(always)]
    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// 入力文字列を設定します
    pub fn set_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.clear();
        self.input.push_str(input.as_ref());
    }

    /// 元の入力文字列を返します
    #[inline(always)]
    pub fn raw(&self) -> &str {
        &self.input
    }
}

/// 文書全体をそのまま読み込みます。
///
/// 改行や空白の正規化は行いません。
///
/// # エラー
///
/// 読み込みに失敗した場合、UTF-8として不正な場合、または内容が空の場合に
/// エラーを返します。
pub fn read_text<R>(mut rdr: R) -> Result<String>
where
    R: Read,
{
    let mut buf = vec![];
    rdr.read_to_end(&mut buf)?;
    if buf.is_empty() {
        return Err(IrodoriError::invalid_argument("text", "The input text is empty."));
    }
    Ok(std::str::from_utf8(&buf)?.to_string())
}
