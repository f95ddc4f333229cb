//! トークン化と色付けのためのルーチンを提供するモジュール。
//!
//! ワーカーは用語列とDP表を保持し、文ごとに再利用することで
//! 不要なメモリアロケーションを避けます。
use crate::colouring::lattice::ColourLattice;
use crate::colouring::{self, Solution, Strategy};
use crate::sentence::Sentence;
use crate::term::{Term, TermIter};
use crate::tokenizer::{ScannedTerm, Tokenizer};

/// トークン化と色付けのためのルーチンを提供する構造体。
///
/// # 例
///
/// ```ignore
/// let mut worker = tokenizer.new_worker();
/// worker.reset_sentence("The tree grows.");
/// worker.tokenize();
/// let solution = worker.colour(Strategy::BestPath);
/// for (term, colour) in worker.term_iter().zip(solution.colours()) {
///     println!("{}\t{:?}", term.text(), colour);
/// }
/// ```
pub struct Worker {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) sent: Sentence,
    pub(crate) terms: Vec<ScannedTerm>,
    pub(crate) lattice: ColourLattice,
}

impl Worker {
    /// 新しいインスタンスを作成します。
    ///
    /// # 引数
    ///
    /// * `tokenizer` - 使用するトークナイザー
    pub(crate) fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            sent: Sentence::new(),
            terms: vec![],
            lattice: ColourLattice::default(),
        }
    }

    /// トークン化する入力文をリセットします。
    ///
    /// 新しい文を設定し、以前の用語列をクリアします。
    ///
    /// # 引数
    ///
    /// * `input` - トークン化する入力文字列
    pub fn reset_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.sent.clear();
        self.terms.clear();
        self.sent.set_sentence(input);
    }

    /// 設定された入力文をトークン化します。
    ///
    /// 結果は`term_iter()`や`term()`でアクセスできます。
    pub fn tokenize(&mut self) {
        self.terms.clear();
        let tokenizer = &self.tokenizer;
        self.terms.extend(tokenizer.scan(self.sent.raw()));
    }

    /// 用語数を返します。
    #[inline(always)]
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// `i`番目の用語を返します。
    ///
    /// # 引数
    ///
    /// * `i` - 用語のインデックス（0から始まる）
    ///
    /// # Panics
    ///
    /// `i`が用語数以上の場合、用語へのアクセス時にパニックします。
    #[inline(always)]
    pub fn term<'w>(&'w self, i: usize) -> Term<'w> {
        Term::new(self, i)
    }

    /// 用語のイテレータを作成します。
    #[inline(always)]
    pub fn term_iter<'w>(&'w self) -> TermIter<'w> {
        TermIter::new(self)
    }

    /// 最後にトークン化した用語列に色を割り当てます。
    ///
    /// # 引数
    ///
    /// * `strategy` - 色付けの方式
    ///
    /// # 戻り値
    ///
    /// 用語ごとの色と合計スコア。[`Strategy::BestScore`]では色は`None`のままです。
    pub fn colour(&mut self, strategy: Strategy) -> Solution {
        let model = self.tokenizer.model();
        let lexicon = model.lexicon();
        let transitions = model.transitions();
        let num_colours = self.tokenizer.colour_count();

        let mut solution = Solution::new(strategy, self.terms.len());
        match strategy {
            Strategy::Independent => {
                colouring::colour_independent(lexicon, &self.terms, &mut solution);
            }
            Strategy::Greedy => {
                colouring::colour_greedy(lexicon, &self.terms, transitions, &mut solution);
            }
            Strategy::BestScore => {
                self.lattice
                    .forward(lexicon, &self.terms, transitions, num_colours);
                solution.score = self.lattice.max_score();
            }
            Strategy::BestPath => {
                self.lattice
                    .forward(lexicon, &self.terms, transitions, num_colours);
                self.lattice.append_best_path(
                    lexicon,
                    &self.terms,
                    transitions,
                    &mut solution.colours,
                );
                solution.score = self.lattice.max_score();
            }
        }
        tracing::debug!(
            %strategy,
            terms = self.terms.len(),
            score = solution.score,
            "coloured terms"
        );
        solution
    }
}
