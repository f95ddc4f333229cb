//! 動的計画法による色付けの表
//!
//! `best[i][c]`は、`i`番目の用語に色`c`を割り当てたときの
//! 先頭から`i`番目までの最大スコアを表します。
use crate::colouring::TermSlots;
use crate::model::{Lexicon, TransitionScore};
use crate::tokenizer::ScannedTerm;

/// 色付けのDP表
///
/// [`Worker`](crate::tokenizer::worker::Worker)が所有し、文ごとに再利用されます。
#[derive(Default)]
pub(crate) struct ColourLattice {
    // Flattened as best[i * num_colours + c].
    best: Vec<i64>,
    num_colours: usize,
    len: usize,
    max_score: i64,
    // The colour and position that last raised max_score.
    max_colour: Option<usize>,
    max_pos: usize,
}

impl ColourLattice {
    pub(crate) fn reset(&mut self, len: usize, num_colours: usize) {
        self.best.clear();
        self.best.resize(len * num_colours, 0);
        self.num_colours = num_colours;
        self.len = len;
        self.max_score = 0;
        self.max_colour = None;
        self.max_pos = 0;
    }

    #[inline(always)]
    fn best(&self, pos: usize, colour: usize) -> i64 {
        self.best[pos * self.num_colours + colour]
    }

    /// 最大スコアを返します。
    #[inline(always)]
    pub(crate) const fn max_score(&self) -> i64 {
        self.max_score
    }

    /// 直前の用語の色`prev`から現在の用語の色`curr`へ進むときの候補スコアを計算します。
    ///
    /// 直前の色が許可されていない場合は遷移スコアと直前の累積スコアを0とし、
    /// 現在の色が許可されていない場合は自身のスコアと遷移スコアを0とします。
    #[inline(always)]
    fn candidate<T>(
        &self,
        transitions: &T,
        prev_slots: TermSlots,
        curr_slots: TermSlots,
        pos: usize,
        prev: usize,
        curr: usize,
    ) -> i64
    where
        T: TransitionScore,
    {
        let prev_best = self.best(pos - 1, prev);
        match (curr_slots.score(curr).map(i64::from), prev_slots.score(prev).is_some()) {
            (Some(score), true) => {
                score + i64::from(transitions.score(Some(prev), curr)) + prev_best
            }
            (Some(score), false) => score,
            (None, true) => prev_best,
            (None, false) => 0,
        }
    }

    /// 前向きにDP表を埋めます。
    ///
    /// # 引数
    ///
    /// * `lexicon` - 用語の色スコア表を引く語彙
    /// * `terms` - トークン化された用語列
    /// * `transitions` - 色遷移スコア
    /// * `num_colours` - 考慮する色の数
    pub(crate) fn forward<T>(
        &mut self,
        lexicon: &Lexicon,
        terms: &[ScannedTerm],
        transitions: &T,
        num_colours: usize,
    ) where
        T: TransitionScore,
    {
        self.reset(terms.len(), num_colours);
        let n = num_colours;

        let mut prev_slots = None;
        for (pos, term) in terms.iter().enumerate() {
            let curr_slots = TermSlots::new(lexicon, term);
            for curr in 0..n {
                let best = match prev_slots {
                    None => i64::from(curr_slots.score(curr).unwrap_or(0).max(0)),
                    Some(prev_slots) => (0..n)
                        .map(|prev| {
                            self.candidate(transitions, prev_slots, curr_slots, pos, prev, curr)
                        })
                        .max()
                        .unwrap_or(0),
                };
                self.best[pos * n + curr] = best;

                if best > self.max_score && curr_slots.score(curr).is_some() {
                    self.max_score = best;
                    self.max_colour = Some(curr);
                    self.max_pos = pos;
                }
            }
            prev_slots = Some(curr_slots);
        }
    }

    /// 末尾の用語で選ぶ色を決めます。
    fn last_colour(&self, last_slots: TermSlots) -> usize {
        let last = self.len - 1;
        if let Some(colour) = self.max_colour.filter(|_| self.max_pos == last) {
            return colour;
        }
        let mut best: Option<usize> = None;
        for colour in 0..self.num_colours {
            if last_slots.score(colour).is_none() {
                continue;
            }
            if best.map_or(true, |b| self.best(last, colour) > self.best(last, b)) {
                best = Some(colour);
            }
        }
        best.unwrap_or(0)
    }

    /// 末尾から逆向きにたどり、最大スコアとなる色の列を書き込みます。
    ///
    /// [`ColourLattice::forward`]の後に、同じ引数で呼び出す必要があります。
    ///
    /// # Panics
    ///
    /// DP表が与えられた引数から計算されたものでない場合、
    /// 直前の色が見つからずにパニックします。
    pub(crate) fn append_best_path<T>(
        &self,
        lexicon: &Lexicon,
        terms: &[ScannedTerm],
        transitions: &T,
        colours: &mut [Option<usize>],
    ) where
        T: TransitionScore,
    {
        debug_assert_eq!(terms.len(), self.len);
        if self.len == 0 {
            return;
        }
        let last = self.len - 1;
        let mut colour = self.last_colour(TermSlots::new(lexicon, &terms[last]));
        colours[last] = Some(colour);

        let mut curr_slots = TermSlots::new(lexicon, &terms[last]);
        for pos in (1..self.len).rev() {
            let prev_slots = TermSlots::new(lexicon, &terms[pos - 1]);
            let target = self.best(pos, colour);
            colour = (0..self.num_colours)
                .find(|&prev| {
                    self.candidate(transitions, prev_slots, curr_slots, pos, prev, colour) == target
                })
                .expect("every cell of the lattice has a predecessor that reaches its score");
            colours[pos - 1] = Some(colour);
            curr_slots = prev_slots;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{TermColourTable, Transition, TransitionTable};

    fn known(ids: &[u32]) -> Vec<ScannedTerm> {
        ids.iter()
            .map(|&id| ScannedTerm {
                range_byte: 0..0,
                lexicon_id: Some(id),
            })
            .collect()
    }

    fn ab_lexicon() -> Lexicon {
        Lexicon::from_entries(vec![
            TermColourTable::from_scores("a", [(0, 1), (1, 9)]),
            TermColourTable::from_scores("b", [(0, 9), (1, 1)]),
        ])
    }

    #[test]
    fn test_forward_two_terms() {
        let lexicon = ab_lexicon();
        let transitions = TransitionTable::new(vec![Transition {
            prev: 0,
            curr: 1,
            score: 5,
        }]);
        let terms = known(&[0, 1]);

        let mut lattice = ColourLattice::default();
        lattice.forward(&lexicon, &terms, &transitions, 4);
        assert_eq!(lattice.best(0, 0), 1);
        assert_eq!(lattice.best(0, 1), 9);
        assert_eq!(lattice.best(0, 2), 0);
        assert_eq!(lattice.best(1, 0), 18);
        assert_eq!(lattice.best(1, 1), 10);
        // Invalid colours inherit the best valid predecessor.
        assert_eq!(lattice.best(1, 2), 9);
        assert_eq!(lattice.max_score(), 18);

        let mut colours: Vec<Option<usize>> = vec![None; 2];
        lattice.append_best_path(&lexicon, &terms, &transitions, &mut colours);
        assert_eq!(colours, vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_forward_single_term() {
        let lexicon = ab_lexicon();
        let terms = known(&[1]);

        let mut lattice = ColourLattice::default();
        lattice.forward(&lexicon, &terms, &TransitionTable::default(), 4);
        assert_eq!(lattice.max_score(), 9);

        let mut colours: Vec<Option<usize>> = vec![None];
        lattice.append_best_path(&lexicon, &terms, &TransitionTable::default(), &mut colours);
        assert_eq!(colours, vec![Some(0)]);
    }

    #[test]
    fn test_forward_empty() {
        let mut lattice = ColourLattice::default();
        lattice.forward(&Lexicon::default(), &[], &TransitionTable::default(), 4);
        assert_eq!(lattice.max_score(), 0);

        let mut colours: Vec<Option<usize>> = vec![];
        lattice.append_best_path(&Lexicon::default(), &[], &TransitionTable::default(), &mut colours);
        assert!(colours.is_empty());
    }

    #[test]
    fn test_colours_beyond_num_colours_are_ignored() {
        let lexicon = Lexicon::from_entries(vec![TermColourTable::from_scores(
            "a",
            [(0, 1), (5, 100)],
        )]);
        let terms = known(&[0]);

        let mut lattice = ColourLattice::default();
        lattice.forward(&lexicon, &terms, &TransitionTable::default(), 4);
        assert_eq!(lattice.max_score(), 1);
    }

    #[test]
    fn test_negative_transition_avoided() {
        let lexicon = Lexicon::from_entries(vec![
            TermColourTable::from_scores("a", [(1, 4), (2, 3)]),
            TermColourTable::from_scores("b", [(1, 4)]),
        ]);
        let transitions = TransitionTable::new(vec![Transition {
            prev: 1,
            curr: 1,
            score: -10,
        }]);
        let terms = known(&[0, 1]);

        let mut lattice = ColourLattice::default();
        lattice.forward(&lexicon, &terms, &transitions, 4);
        assert_eq!(lattice.max_score(), 7);

        let mut colours: Vec<Option<usize>> = vec![None; 2];
        lattice.append_best_path(&lexicon, &terms, &transitions, &mut colours);
        assert_eq!(colours, vec![Some(2), Some(1)]);
    }

    #[test]
    fn test_forward_beyond_i32() {
        let lexicon = Lexicon::from_entries(vec![TermColourTable::from_scores(
            "big",
            [(0, i32::MAX)],
        )]);
        let terms = known(&[0, 0, 0]);

        let mut lattice = ColourLattice::default();
        lattice.forward(&lexicon, &terms, &TransitionTable::default(), 4);
        assert_eq!(lattice.max_score(), 3 * i64::from(i32::MAX));

        let mut colours: Vec<Option<usize>> = vec![None; 3];
        lattice.append_best_path(&lexicon, &terms, &TransitionTable::default(), &mut colours);
        assert_eq!(colours, vec![Some(0); 3]);
    }

    #[test]
    #[should_panic(expected = "predecessor")]
    fn test_backtrack_with_mismatched_transitions() {
        let lexicon = ab_lexicon();
        let transitions = TransitionTable::new(vec![Transition {
            prev: 1,
            curr: 0,
            score: 100,
        }]);
        let terms = known(&[0, 1]);

        let mut lattice = ColourLattice::default();
        lattice.forward(&lexicon, &terms, &transitions, 4);
        assert_eq!(lattice.max_score(), 118);

        let mut colours: Vec<Option<usize>> = vec![None; 2];
        lattice.append_best_path(&lexicon, &terms, &TransitionTable::default(), &mut colours);
    }
}
