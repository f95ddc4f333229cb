//! 語彙（用語と色スコア表）を管理するモジュール
//!
//! 語彙は`term,colour,score`形式のCSVから構築されます。
//! 同じ用語が連続する行は1つの[`TermColourTable`]にまとめられます。

use std::io::Read;

use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{IrodoriError, Result};
use crate::utils::{parse_csv_records, FromU32};

/// 1つの用語に対する色ごとのスコア表
///
/// 色IDはそのまま`slots`の添字になります。`None`のスロットは
/// その色がこの用語に許可されていないことを表します。
#[derive(Archive, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TermColourTable {
    term: String,
    slots: Vec<Option<i32>>,
}

impl TermColourTable {
    /// 色が1つも設定されていない表を作成します。
    pub fn new<S>(term: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            term: term.into(),
            slots: vec![],
        }
    }

    /// `(色, スコア)`の列から表を作成します。
    ///
    /// 後に現れた同じ色のスコアが優先されます。
    pub fn from_scores<S, I>(term: S, scores: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (usize, i32)>,
    {
        let mut table = Self::new(term);
        for (colour, score) in scores {
            table.set_score(colour, score);
        }
        table
    }

    /// 用語の正規形（語彙ファイルに書かれた表記）を返します。
    #[inline(always)]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// 確保されている色スロットの数を返します。
    ///
    /// これまでに設定された最大の色ID + 1 に等しくなります。
    #[inline(always)]
    pub fn colour_count(&self) -> usize {
        self.slots.len()
    }

    /// 指定した色のスコアを返します。
    ///
    /// 未設定のスロット、または`colour_count()`以上の色に対しては`None`を返します。
    #[inline(always)]
    pub fn score(&self, colour: usize) -> Option<i32> {
        self.slots.get(colour).copied().flatten()
    }

    /// 指定した色がこの用語に許可されているかどうかを返します。
    #[inline(always)]
    pub fn is_allowed(&self, colour: usize) -> bool {
        self.score(colour).is_some()
    }

    /// 設定済みのスロットを色IDの昇順で返すイテレータ
    pub fn scores(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(colour, slot)| slot.map(|score| (colour, score)))
    }

    /// 色のスコアを設定します。
    ///
    /// 必要に応じてスロットを拡張し、間の色は未設定のまま埋めます。
    pub fn set_score(&mut self, colour: usize, score: i32) {
        if self.slots.len() <= colour {
            self.slots.resize(colour + 1, None);
        }
        self.slots[colour] = Some(score);
    }
}

/// 用語の語彙
///
/// エントリの順序は語彙ファイル中の出現順のまま保持されます。
/// トークナイザーの同長一致のタイブレークはこの順序に依存します。
#[derive(Archive, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<TermColourTable>,
}

impl Lexicon {
    /// エントリのリストから新しいインスタンスを構築します。
    pub fn from_entries(entries: Vec<TermColourTable>) -> Self {
        Self { entries }
    }

    /// CSV形式の語彙ファイルから新しいインスタンスを構築します。
    ///
    /// 各行は`term,colour,score`の3項目からなります。
    ///
    /// # 引数
    ///
    /// * `rdr` - 語彙ファイルのリーダー
    ///
    /// # エラー
    ///
    /// 行の項目数が3でない場合、色やスコアが整数として解釈できない場合、
    /// スコアが負の場合、またはI/Oエラーが発生した場合にエラーを返します。
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;

        let entries = Self::parse_csv(&buf, "lexicon.csv")?;
        tracing::debug!(entries = entries.len(), "loaded lexicon");

        Ok(Self::from_entries(entries))
    }

    pub(crate) fn parse_csv(bytes: &[u8], name: &'static str) -> Result<Vec<TermColourTable>> {
        let mut entries: Vec<TermColourTable> = vec![];
        // Only consecutive records of the same term are merged.
        let mut extends_last = false;

        for record in parse_csv_records(bytes, name)? {
            if record.fields.len() != 3 {
                let msg = format!(
                    "A csv row of lexicon must have three items, record {}: {:?}",
                    record.index, record.fields,
                );
                return Err(IrodoriError::invalid_format(name, msg));
            }
            let term = record.fields[0].trim_start();
            let colour: u16 = record.fields[1].trim().parse()?;
            let score: i32 = record.fields[2].trim().parse()?;
            if score < 0 {
                let msg = format!(
                    "A score of lexicon must not be negative, record {}: {:?}",
                    record.index, record.fields,
                );
                return Err(IrodoriError::invalid_format(name, msg));
            }

            if term.is_empty() {
                tracing::warn!(record = record.index, "Skipped an empty term");
                extends_last = false;
                continue;
            }

            match entries.last_mut() {
                Some(table) if extends_last && table.term() == term => {
                    table.set_score(usize::from(colour), score)
                }
                _ => {
                    let mut table = TermColourTable::new(term);
                    table.set_score(usize::from(colour), score);
                    entries.push(table);
                }
            }
            extends_last = true;
        }
        Ok(entries)
    }

    /// エントリ数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 語彙が空かどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 語彙IDに対応するエントリを返します。
    ///
    /// # Panics
    ///
    /// `term_id`がこの語彙のものでない場合にパニックします。
    /// トークナイザーが付与したIDは常に有効です。
    #[inline(always)]
    pub fn table(&self, term_id: u32) -> &TermColourTable {
        &self.entries[usize::from_u32(term_id)]
    }

    /// 語彙IDとエントリの組を出現順に返すイテレータ
    pub fn iter(&self) -> impl Iterator<Item = (u32, &TermColourTable)> + '_ {
        (0..).zip(self.entries.iter())
    }

    /// 最初に現れる同じ表記のエントリのIDを返します。
    pub fn find(&self, term: &str) -> Option<u32> {
        self.iter().find(|(_, t)| t.term() == term).map(|(id, _)| id)
    }
}
