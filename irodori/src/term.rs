//! 用語の結果コンテナ
//!
//! トークン化の結果として得られる用語を表現する型を提供します。
//! 語彙に一致した用語は語彙エントリへの参照を保持します。

use std::ops::Range;

use crate::model::TermColourTable;
use crate::tokenizer::worker::Worker;

/// トークン化の結果得られた用語
///
/// [`Worker`]への軽量な参照であり、Workerが生存している間のみ有効です。
pub struct Term<'w> {
    worker: &'w Worker,
    index: usize,
}

impl<'w> Term<'w> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'w Worker, index: usize) -> Self {
        Self { worker, index }
    }

    /// 用語のバイト単位の位置範囲を取得します。
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        self.worker.terms[self.index].range_byte.clone()
    }

    /// 用語の表層形（元のテキスト中の文字列）を取得します。
    #[inline(always)]
    pub fn surface(&self) -> &'w str {
        &self.worker.sent.raw()[self.range_byte()]
    }

    /// 用語の語彙IDを取得します。
    ///
    /// # 戻り値
    ///
    /// 語彙に一致した場合はそのID、語彙にない単語の場合は`None`
    #[inline(always)]
    pub fn lexicon_id(&self) -> Option<u32> {
        self.worker.terms[self.index].lexicon_id
    }

    /// 用語が語彙に一致したかどうかを返します。
    #[inline(always)]
    pub fn is_known(&self) -> bool {
        self.lexicon_id().is_some()
    }

    /// 用語の色スコア表を取得します。
    ///
    /// 語彙にない単語の場合は`None`を返します。
    #[inline(always)]
    pub fn colour_table(&self) -> Option<&'w TermColourTable> {
        let lexicon = self.worker.tokenizer.model().lexicon();
        self.lexicon_id().map(|term_id| lexicon.table(term_id))
    }

    /// 用語のテキストを取得します。
    ///
    /// 語彙に一致した用語は語彙に書かれた正規形を、
    /// それ以外は表層形を返します。
    #[inline(always)]
    pub fn text(&self) -> &'w str {
        self.colour_table().map_or_else(|| self.surface(), |table| table.term())
    }

    /// この用語ビューを所有型の[`TermBuf`]に変換します。
    pub fn to_buf(&self) -> TermBuf {
        TermBuf {
            surface: self.surface().to_string(),
            text: self.text().to_string(),
            range_byte: self.range_byte(),
            lexicon_id: self.lexicon_id(),
        }
    }
}

impl std::fmt::Debug for Term<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Term")
            .field("surface", &self.surface())
            .field("text", &self.text())
            .field("range_byte", &self.range_byte())
            .field("lexicon_id", &self.lexicon_id())
            .finish()
    }
}

/// 用語のイテレータ
pub struct TermIter<'w> {
    worker: &'w Worker,
    front: usize,
    back: usize,
}

impl<'w> TermIter<'w> {
    #[inline(always)]
    pub(crate) fn new(worker: &'w Worker) -> Self {
        Self {
            worker,
            front: 0,
            back: worker.num_terms(),
        }
    }
}

impl<'w> Iterator for TermIter<'w> {
    type Item = Term<'w>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let t = self.worker.term(self.front);
            self.front += 1;
            Some(t)
        } else {
            None
        }
    }
}

impl DoubleEndedIterator for TermIter<'_> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.worker.term(self.back))
        } else {
            None
        }
    }
}

/// 所有型の用語
///
/// [`Term`]の所有型版です。結果を保存したりスレッド間で送信する際に使います。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermBuf {
    /// 表層形
    pub surface: String,

    /// 語彙の正規形。語彙にない単語では表層形と同じ
    pub text: String,

    /// バイト単位の位置範囲
    pub range_byte: Range<usize>,

    /// 語彙ID
    pub lexicon_id: Option<u32>,
}

impl<'w> From<Term<'w>> for TermBuf {
    fn from(term: Term<'w>) -> Self {
        term.to_buf()
    }
}
