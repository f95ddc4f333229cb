//! 構築済みモデルの検証モジュール

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use irodori::errors::IrodoriError;
use irodori::Model;

use clap::Parser;

/// 検証コマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "inspect", about = "A program to validate and summarize a binary model.")]
pub struct Args {
    /// Binary model file.
    #[clap(short = 'i', long)]
    model_in: PathBuf,

    /// Prints every lexicon entry with its colour scores and every transition.
    #[clap(short = 'v', long)]
    verbose: bool,
}

/// 検証処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// モデル読み込みエラー
    #[error("Model loading failed: {0}")]
    Irodori(#[from] IrodoriError),
}

/// 検証コマンドを実行する
///
/// モデルを読み込んで検証し、語彙と遷移表の件数を標準出力に書き出します。
pub fn run(args: Args) -> Result<(), InspectError> {
    let model = Model::from_path(&args.model_in)?;

    let mut out = BufWriter::new(io::stdout().lock());
    write_summary(&model, args.verbose, &mut out)?;
    out.flush()?;
    Ok(())
}

/// モデルの要約を書き出します。
///
/// `verbose`の場合は、語彙の各エントリを`term\tcolour:score ...`、
/// 遷移表の各エントリを`prev\tcurr\tscore`の形式で続けて書き出します。
fn write_summary<W>(model: &Model, verbose: bool, wtr: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(wtr, "terms\t{}", model.lexicon().len())?;
    writeln!(wtr, "transitions\t{}", model.transitions().len())?;
    if !verbose {
        return Ok(());
    }
    for (_, table) in model.lexicon().iter() {
        let scores: Vec<_> = table
            .scores()
            .map(|(colour, score)| format!("{colour}:{score}"))
            .collect();
        writeln!(wtr, "{}\t{}", table.term(), scores.join(" "))?;
    }
    for t in model.transitions().entries() {
        writeln!(wtr, "{}\t{}\t{}", t.prev, t.curr, t.score)?;
    }
    Ok(())
}
