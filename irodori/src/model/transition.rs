//! 色遷移スコアの表
//!
//! 直前の用語の色から現在の用語の色へ移るときに加算されるスコアを保持します。

use std::io::Read;

use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{IrodoriError, Result};
use crate::utils::parse_csv_records;

/// 系列の先頭（直前の色がない状態）を表す色ID
pub const START_OF_SEQUENCE: i32 = -1;

/// 遷移スコア計算機能を提供するトレイト
pub trait TransitionScore {
    /// 遷移スコアを取得します。
    ///
    /// # 引数
    ///
    /// * `prev` - 直前の用語の色。系列の先頭では`None`
    /// * `curr` - 現在の用語の色
    ///
    /// # 戻り値
    ///
    /// 遷移スコア。該当するエントリがない場合は0
    fn score(&self, prev: Option<usize>, curr: usize) -> i32;
}

/// 遷移表の1エントリ
#[derive(Archive, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// 直前の色
    pub prev: i32,
    /// 現在の色
    pub curr: i32,
    /// スコア
    pub score: i32,
}

impl Transition {
    #[inline(always)]
    fn matches(&self, prev: Option<usize>, curr: usize) -> bool {
        let prev_matches = match prev {
            Some(prev) => usize::try_from(self.prev) == Ok(prev),
            None => self.prev == START_OF_SEQUENCE,
        };
        prev_matches && usize::try_from(self.curr) == Ok(curr)
    }
}

/// 色遷移スコアの表
///
/// 検索は線形走査で、同じ組が複数ある場合は最初のエントリが使われます。
#[derive(Archive, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    entries: Vec<Transition>,
}

impl TransitionTable {
    /// エントリのリストから新しいインスタンスを構築します。
    pub fn new(entries: Vec<Transition>) -> Self {
        Self { entries }
    }

    /// CSV形式の遷移表から新しいインスタンスを構築します。
    ///
    /// 各行は`prev,colour,score`の3つの整数からなります。
    ///
    /// # エラー
    ///
    /// 行の項目数が3でない場合、整数として解釈できない場合、
    /// またはI/Oエラーが発生した場合にエラーを返します。
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;

        let name = "transitions.csv";
        let mut entries = vec![];
        for record in parse_csv_records(&buf, name)? {
            if record.fields.len() != 3 {
                let msg = format!(
                    "A csv row of transitions must have three items, record {}: {:?}",
                    record.index, record.fields,
                );
                return Err(IrodoriError::invalid_format(name, msg));
            }
            entries.push(Transition {
                prev: record.fields[0].trim().parse()?,
                curr: record.fields[1].trim().parse()?,
                score: record.fields[2].trim().parse()?,
            });
        }
        tracing::debug!(entries = entries.len(), "loaded transition table");

        Ok(Self::new(entries))
    }

    /// エントリ数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 表が空かどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// エントリを出現順に返します。
    pub fn entries(&self) -> &[Transition] {
        &self.entries
    }
}

impl TransitionScore for TransitionTable {
    fn score(&self, prev: Option<usize>, curr: usize) -> i32 {
        self.entries
            .iter()
            .find(|t| t.matches(prev, curr))
            .map_or(0, |t| t.score)
    }
}
