//! 貪欲最長一致に基づく用語トークナイザー。
//!
//! このモジュールは、テキストを語彙中の用語（複数語からなる用語を含む）と
//! 通常の単語の列に分割するトークナイザーを提供します。
//!
//! # 主要な構造体
//!
//! - [`Tokenizer`]: モデルと設定を保持するトークナイザー
//! - [`TermScanner`]: テキストを1回だけ走査する遅延イテレータ
//! - [`Worker`]: バッファを再利用してトークン化と色付けを行うワーカー
//!
//! # 例
//!
//! ```
//! use irodori::{Model, Tokenizer};
//!
//! let model = Model::from_readers("big,0,1\nbig oh,1,4\n".as_bytes(), None::<&[u8]>)?;
//! let tokenizer = Tokenizer::new(model);
//! let mut worker = tokenizer.new_worker();
//!
//! worker.reset_sentence("Big Oh! It is big.");
//! worker.tokenize();
//!
//! let texts: Vec<_> = worker.term_iter().map(|t| t.text().to_string()).collect();
//! assert_eq!(texts, ["big oh", "It", "is", "big"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod worker;

use std::ops::Range;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::errors::{IrodoriError, Result};
use crate::model::Model;
use crate::tokenizer::worker::Worker;

/// DP系の色付けで扱う色の数の既定値
pub const DEFAULT_NUM_COLOURS: usize = 4;

/// 用語のトークナイザー。
///
/// モデルを`Arc`で保持するため、複製は軽量です。
/// 複数の[`Worker`]を生成してスレッドごとに使うことができます。
#[derive(Clone)]
pub struct Tokenizer {
    model: Arc<Model>,
    // Lexicon ids bucketed by the lowercased first byte, in lexicon order.
    heads: Arc<HashMap<u8, Vec<u32>>>,
    num_colours: usize,
}

impl Tokenizer {
    /// 新しいトークナイザーを作成します。
    ///
    /// # 引数
    ///
    /// * `model` - トークン化と色付けに使用するモデル
    pub fn new(model: Model) -> Self {
        Self::from_shared_model(Arc::new(model))
    }

    /// 共有されたモデルから新しいトークナイザーを作成します。
    ///
    /// # 引数
    ///
    /// * `model` - 共有されるモデルへの`Arc`参照
    pub fn from_shared_model(model: Arc<Model>) -> Self {
        let mut heads: HashMap<u8, Vec<u32>> = HashMap::new();
        for (term_id, table) in model.lexicon().iter() {
            if let Some(&head) = table.term().as_bytes().first() {
                heads
                    .entry(head.to_ascii_lowercase())
                    .or_default()
                    .push(term_id);
            }
        }
        Self {
            model,
            heads: Arc::new(heads),
            num_colours: DEFAULT_NUM_COLOURS,
        }
    }

    /// DP系の色付け（[`Strategy::BestScore`]と[`Strategy::BestPath`]）で
    /// 考慮する色の数を設定します。
    ///
    /// # 引数
    ///
    /// * `num_colours` - 色の数。既定値は[`DEFAULT_NUM_COLOURS`]
    ///
    /// # エラー
    ///
    /// `num_colours`が0の場合、[`IrodoriError`]が返されます。
    ///
    /// [`Strategy::BestScore`]: crate::Strategy::BestScore
    /// [`Strategy::BestPath`]: crate::Strategy::BestPath
    pub fn num_colours(mut self, num_colours: usize) -> Result<Self> {
        if num_colours == 0 {
            return Err(IrodoriError::invalid_argument(
                "num_colours",
                "must be at least 1.",
            ));
        }
        self.num_colours = num_colours;
        Ok(self)
    }

    /// 使用しているモデルを返します。
    #[inline(always)]
    pub fn model(&self) -> &Model {
        &self.model
    }

    #[inline(always)]
    pub(crate) const fn colour_count(&self) -> usize {
        self.num_colours
    }

    /// 新しいワーカーを作成します。
    pub fn new_worker(&self) -> Worker {
        Worker::new(self.clone())
    }

    /// テキストを先頭から走査するイテレータを返します。
    ///
    /// 走査は遅延的に行われ、やり直すには新しいイテレータを作成します。
    pub fn scan<'a>(&'a self, text: &'a str) -> TermScanner<'a> {
        TermScanner {
            tokenizer: self,
            text: text.as_bytes(),
            pos: 0,
        }
    }

    /// `start`の位置で一致する最長の語彙エントリを探します。
    ///
    /// 同じ長さの一致が複数ある場合は語彙中で先に現れるものを返します。
    fn longest_match(&self, text: &[u8], start: usize) -> Option<(u32, usize)> {
        let candidates = self.heads.get(&text[start].to_ascii_lowercase())?;
        let lexicon = self.model.lexicon();
        let rest = &text[start..];

        let mut best = None;
        let mut best_len = 0;
        for &term_id in candidates {
            let term = lexicon.table(term_id).term().as_bytes();
            if term.len() <= best_len || term.len() > rest.len() {
                continue;
            }
            // Word boundary: the byte after the term must not be alphabetic.
            if rest.get(term.len()).is_some_and(u8::is_ascii_alphabetic) {
                continue;
            }
            if rest[..term.len()].eq_ignore_ascii_case(term) {
                best = Some(term_id);
                best_len = term.len();
            }
        }
        best.map(|term_id| (term_id, best_len))
    }
}

/// 走査で得られた1つの用語
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedTerm {
    /// 入力テキスト中のバイト範囲
    pub range_byte: Range<usize>,

    /// 語彙ID。語彙にない単語の場合は`None`
    pub lexicon_id: Option<u32>,
}

/// テキストを左から右へ1回だけ走査して用語を返すイテレータ
///
/// [`Tokenizer::scan`]で作成します。
pub struct TermScanner<'a> {
    tokenizer: &'a Tokenizer,
    text: &'a [u8],
    pos: usize,
}

impl TermScanner<'_> {
    fn skip_non_alphabetic(&mut self) {
        while self.pos < self.text.len() && !self.text[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
    }
}

impl Iterator for TermScanner<'_> {
    type Item = ScannedTerm;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_non_alphabetic();
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;

        if let Some((term_id, len)) = self.tokenizer.longest_match(self.text, start) {
            self.pos = start + len;
            self.skip_non_alphabetic();
            return Some(ScannedTerm {
                range_byte: start..start + len,
                lexicon_id: Some(term_id),
            });
        }

        // Not in the lexicon: take the whole non-whitespace run, punctuation included.
        let len = self.text[start..]
            .iter()
            .position(|&b| is_space(b))
            .unwrap_or(self.text.len() - start);
        self.pos = start + len;
        Some(ScannedTerm {
            range_byte: start..start + len,
            lexicon_id: None,
        })
    }
}

/// C言語の`isspace`と同じ空白文字の判定
#[inline(always)]
const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}
