//! 用語列への色の割り当て
//!
//! 4種類の割り当て方式を提供します。
//!
//! | 方式 | 文脈 | 出力 |
//! |------|------|------|
//! | [`Strategy::Independent`] | なし | 色の列 |
//! | [`Strategy::Greedy`] | 直前の色（貪欲） | 色の列 |
//! | [`Strategy::BestScore`] | 全経路（DP） | スコアのみ |
//! | [`Strategy::BestPath`] | 全経路（DP + バックトラック） | 色の列 |
//!
//! 語彙にない用語は、色0だけが許可されたスコア0の表として扱われます。
//! スコアの合計は`i64`で計算するため、`i32`のスコアを加算してもあふれません。
pub(crate) mod lattice;

use std::fmt;
use std::str::FromStr;

use crate::errors::IrodoriError;
use crate::model::{Lexicon, TermColourTable, TransitionScore};
use crate::tokenizer::ScannedTerm;

/// 強調なしを表す色
pub const UNHIGHLIGHTED: usize = 0;

/// 色付けの方式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// 用語ごとに最大スコアの色を選ぶ
    Independent,
    /// 直前の色との遷移スコアを加味して左から貪欲に選ぶ
    Greedy,
    /// 動的計画法で最大の合計スコアのみを求める
    BestScore,
    /// 動的計画法で最大スコアとなる色の列を求める
    BestPath,
}

impl Strategy {
    /// すべての方式
    pub const ALL: [Strategy; 4] = [
        Strategy::Independent,
        Strategy::Greedy,
        Strategy::BestScore,
        Strategy::BestPath,
    ];

    /// 方式の名前を返します。
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::Greedy => "greedy",
            Self::BestScore => "best-score",
            Self::BestPath => "best-path",
        }
    }

    /// この方式が色の列を出力するかどうかを返します。
    pub const fn assigns_colours(&self) -> bool {
        !matches!(self, Self::BestScore)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = IrodoriError;

    /// 文字列から方式をパースします。
    ///
    /// `independent`、`greedy`、`best-score`、`best-path`のほか、
    /// 短縮形`a`、`b`、`e`、`f`を受け付けます。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "independent" | "a" => Ok(Self::Independent),
            "greedy" | "b" => Ok(Self::Greedy),
            "best-score" | "e" => Ok(Self::BestScore),
            "best-path" | "f" => Ok(Self::BestPath),
            _ => Err(IrodoriError::invalid_argument(
                "strategy",
                format!("Could not parse a strategy: {s}"),
            )),
        }
    }
}

/// 色付けの結果
///
/// 用語ごとの色と合計スコアを保持します。
/// [`Strategy::BestScore`]では色は割り当てられず、すべて`None`になります。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    strategy: Strategy,
    pub(crate) colours: Vec<Option<usize>>,
    pub(crate) score: i64,
}

impl Solution {
    pub(crate) fn new(strategy: Strategy, num_terms: usize) -> Self {
        Self {
            strategy,
            colours: vec![None; num_terms],
            score: -1,
        }
    }

    /// 結果を生成した方式を返します。
    #[inline(always)]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// 用語ごとの色を返します。
    #[inline(always)]
    pub fn colours(&self) -> &[Option<usize>] {
        &self.colours
    }

    /// `i`番目の用語の色を返します。
    #[inline(always)]
    pub fn colour(&self, i: usize) -> Option<usize> {
        self.colours.get(i).copied().flatten()
    }

    /// 合計スコアを返します。
    #[inline(always)]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// 用語数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// 用語が1つもないかどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

/// 1つの用語が取り得る色とスコア
#[derive(Clone, Copy)]
pub(crate) enum TermSlots<'a> {
    Known(&'a TermColourTable),
    // Only colour 0 with score 0.
    Unknown,
}

impl<'a> TermSlots<'a> {
    #[inline(always)]
    pub(crate) fn new(lexicon: &'a Lexicon, term: &ScannedTerm) -> Self {
        match term.lexicon_id {
            Some(term_id) => Self::Known(lexicon.table(term_id)),
            None => Self::Unknown,
        }
    }

    #[inline(always)]
    pub(crate) fn score(&self, colour: usize) -> Option<i32> {
        match self {
            Self::Known(table) => table.score(colour),
            Self::Unknown => (colour == UNHIGHLIGHTED).then_some(0),
        }
    }

    /// スコアを引くべき色の数
    #[inline(always)]
    pub(crate) fn colour_count(&self) -> usize {
        match self {
            Self::Known(table) => table.colour_count(),
            Self::Unknown => UNHIGHLIGHTED + 1,
        }
    }
}

/// 用語ごとに独立して最大スコアの色を割り当てます。
///
/// スコアが0を超える色がない用語は色0（寄与0）になります。
pub(crate) fn colour_independent(lexicon: &Lexicon, terms: &[ScannedTerm], solution: &mut Solution) {
    let mut total = 0;
    for (i, term) in terms.iter().enumerate() {
        let slots = TermSlots::new(lexicon, term);
        let mut best = (UNHIGHLIGHTED, 0);
        for colour in 0..slots.colour_count() {
            let Some(score) = slots.score(colour) else {
                continue;
            };
            let score = i64::from(score);
            if score > best.1 {
                best = (colour, score);
            }
        }
        solution.colours[i] = Some(best.0);
        total += best.1;
    }
    solution.score = total;
}

/// 直前の用語の色との遷移スコアを加味して、左から貪欲に色を割り当てます。
///
/// 過去の選択は見直さないため、最適解になるとは限りません。
pub(crate) fn colour_greedy<T>(
    lexicon: &Lexicon,
    terms: &[ScannedTerm],
    transitions: &T,
    solution: &mut Solution,
) where
    T: TransitionScore,
{
    let mut total = 0;
    let mut prev = None;
    for (i, term) in terms.iter().enumerate() {
        let slots = TermSlots::new(lexicon, term);
        let mut best = (UNHIGHLIGHTED, 0);
        for colour in 0..slots.colour_count() {
            let Some(score) = slots.score(colour) else {
                continue;
            };
            let candidate = i64::from(score) + i64::from(transitions.score(prev, colour));
            if candidate > best.1 {
                best = (colour, candidate);
            }
        }
        solution.colours[i] = Some(best.0);
        total += best.1;
        prev = Some(best.0);
    }
    solution.score = total;
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{Transition, TransitionTable};

    fn known(ids: &[u32]) -> Vec<ScannedTerm> {
        ids.iter()
            .map(|&id| ScannedTerm {
                range_byte: 0..0,
                lexicon_id: Some(id),
            })
            .collect()
    }

    #[test]
    fn test_strategy_from_str() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!("f".parse::<Strategy>().unwrap(), Strategy::BestPath);
        assert!("viterbi".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_independent_tie_prefers_lower_colour() {
        let lexicon = Lexicon::from_entries(vec![TermColourTable::from_scores(
            "a",
            [(0, 3), (1, 7), (2, 7)],
        )]);
        let terms = known(&[0]);
        let mut solution = Solution::new(Strategy::Independent, 1);
        colour_independent(&lexicon, &terms, &mut solution);
        assert_eq!(solution.colours(), &[Some(1)]);
        assert_eq!(solution.score(), 7);
    }

    #[test]
    fn test_independent_non_positive_scores() {
        let lexicon = Lexicon::from_entries(vec![TermColourTable::from_scores(
            "a",
            [(2, 0), (3, -4)],
        )]);
        let terms = known(&[0]);
        let mut solution = Solution::new(Strategy::Independent, 1);
        colour_independent(&lexicon, &terms, &mut solution);
        assert_eq!(solution.colours(), &[Some(UNHIGHLIGHTED)]);
        assert_eq!(solution.score(), 0);
    }

    #[test]
    fn test_greedy_uses_previous_colour() {
        let lexicon = Lexicon::from_entries(vec![
            TermColourTable::from_scores("a", [(0, 1), (1, 9)]),
            TermColourTable::from_scores("b", [(0, 3), (1, 2)]),
        ]);
        let transitions = TransitionTable::new(vec![Transition {
            prev: 1,
            curr: 1,
            score: 4,
        }]);
        let terms = known(&[0, 1]);
        let mut solution = Solution::new(Strategy::Greedy, 2);
        colour_greedy(&lexicon, &terms, &transitions, &mut solution);
        assert_eq!(solution.colours(), &[Some(1), Some(1)]);
        assert_eq!(solution.score(), 9 + 2 + 4);
    }

    #[test]
    fn test_greedy_start_of_sequence_transition() {
        let lexicon = Lexicon::from_entries(vec![TermColourTable::from_scores(
            "a",
            [(0, 2), (1, 1)],
        )]);
        let transitions = TransitionTable::new(vec![Transition {
            prev: -1,
            curr: 1,
            score: 5,
        }]);
        let terms = known(&[0]);
        let mut solution = Solution::new(Strategy::Greedy, 1);
        colour_greedy(&lexicon, &terms, &transitions, &mut solution);
        assert_eq!(solution.colours(), &[Some(1)]);
        assert_eq!(solution.score(), 6);
    }

    #[test]
    fn test_greedy_negative_candidates_default_to_zero() {
        let lexicon = Lexicon::from_entries(vec![
            TermColourTable::from_scores("a", [(1, 2)]),
            TermColourTable::from_scores("b", [(1, 1), (2, 1)]),
        ]);
        let transitions = TransitionTable::new(vec![
            Transition { prev: 1, curr: 1, score: -5 },
            Transition { prev: 1, curr: 2, score: -5 },
        ]);
        let terms = known(&[0, 1]);
        let mut solution = Solution::new(Strategy::Greedy, 2);
        colour_greedy(&lexicon, &terms, &transitions, &mut solution);
        assert_eq!(solution.colours(), &[Some(1), Some(UNHIGHLIGHTED)]);
        assert_eq!(solution.score(), 2);
    }

    #[test]
    fn test_unknown_terms_take_colour_zero() {
        let lexicon = Lexicon::default();
        let terms = vec![
            ScannedTerm {
                range_byte: 0..3,
                lexicon_id: None,
            };
            2
        ];
        let transitions = TransitionTable::new(vec![
            Transition { prev: -1, curr: 0, score: 3 },
            Transition { prev: 0, curr: 1, score: 8 },
        ]);

        let mut solution = Solution::new(Strategy::Independent, 2);
        colour_independent(&lexicon, &terms, &mut solution);
        assert_eq!(solution.colours(), &[Some(0), Some(0)]);
        assert_eq!(solution.score(), 0);

        let mut solution = Solution::new(Strategy::Greedy, 2);
        colour_greedy(&lexicon, &terms, &transitions, &mut solution);
        assert_eq!(solution.colours(), &[Some(0), Some(0)]);
        assert_eq!(solution.score(), 3);
    }

    #[test]
    fn test_sums_beyond_i32() {
        let lexicon = Lexicon::from_entries(vec![TermColourTable::from_scores(
            "a",
            [(0, 1), (1, i32::MAX)],
        )]);
        let transitions = TransitionTable::new(vec![Transition {
            prev: 1,
            curr: 1,
            score: i32::MAX,
        }]);
        let terms = known(&[0, 0]);

        let mut solution = Solution::new(Strategy::Independent, 2);
        colour_independent(&lexicon, &terms, &mut solution);
        assert_eq!(solution.score(), 2 * i64::from(i32::MAX));

        let mut solution = Solution::new(Strategy::Greedy, 2);
        colour_greedy(&lexicon, &terms, &transitions, &mut solution);
        assert_eq!(solution.colours(), &[Some(1), Some(1)]);
        assert_eq!(solution.score(), 3 * i64::from(i32::MAX));
    }
}
