//! # Irodori
//!
//! Irodoriは、語彙に基づく用語のトークン化と、用語列への色（強調カテゴリ）の
//! 割り当てを行うライブラリです。
//!
//! ## 概要
//!
//! 色ごとのスコアを持つ用語の語彙と、隣り合う用語の色の間の遷移スコアから、
//! テキスト中の用語に合計スコアが最大となるような色を割り当てます。
//!
//! ## 主な機能
//!
//! - **最長一致のトークン化**: 複数語からなる用語を含む語彙との大文字小文字を区別しない照合
//! - **4種類の色付け**: 独立、貪欲、動的計画法（スコアのみ、色の列）
//! - **高速なモデル読み込み**: rkyvフォーマットでのモデルの保存と検証付きの読み込み
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use irodori::{Model, Strategy, Tokenizer};
//!
//! let lexicon_csv = "a,0,1\na,1,9\nb,0,9\nb,1,1\n";
//! let transitions_csv = "0,1,5\n";
//!
//! let model = Model::from_readers(lexicon_csv.as_bytes(), Some(transitions_csv.as_bytes()))?;
//! let tokenizer = Tokenizer::new(model);
//! let mut worker = tokenizer.new_worker();
//!
//! worker.reset_sentence("a b");
//! worker.tokenize();
//! assert_eq!(worker.num_terms(), 2);
//!
//! let solution = worker.colour(Strategy::BestPath);
//! assert_eq!(solution.colours(), &[Some(1), Some(0)]);
//! assert_eq!(solution.score(), 18);
//!
//! let solution = worker.colour(Strategy::Independent);
//! assert_eq!(solution.colours(), &[Some(1), Some(0)]);
//! assert_eq!(solution.score(), 18);
//! # Ok(())
//! # }
//! ```

/// 色付けの方式と結果
pub mod colouring;

/// エラー型の定義
pub mod errors;

/// 語彙と遷移表
pub mod model;

/// 入力テキスト
mod sentence;

/// 用語型の定義
pub mod term;

/// トークナイザーの実装
pub mod tokenizer;

/// 内部ユーティリティ関数
pub mod utils;


// Re-exports
pub use colouring::{Solution, Strategy};
pub use model::Model;
pub use sentence::read_text;
pub use tokenizer::Tokenizer;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
