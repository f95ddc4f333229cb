//! 用語の色付けを実行するユーティリティ
//!
//! このバイナリは、入力された文書をトークン化し、指定された方式で色を割り当てて、
//! 色の列、スコア、またはANSIで色付けされたテキストを出力します。

mod render;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use irodori::errors::IrodoriError;
use irodori::{read_text, Model, Strategy, Tokenizer};

use clap::{ArgGroup, Parser};
use tracing_subscriber::EnvFilter;

use crate::render::ColourMode;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(
    name = "highlight",
    about = "Assigns highlight colours to the terms of a document",
    version
)]
#[clap(group(ArgGroup::new("source").required(true).args(["model", "lexicon"])))]
struct Args {
    /// Binary model built by `compile build`.
    #[clap(short = 'm', long)]
    model: Option<PathBuf>,

    /// Lexicon file (lexicon.csv), used instead of a binary model.
    #[clap(short = 'l', long)]
    lexicon: Option<PathBuf>,

    /// Transition file (transitions.csv), used with `--lexicon`.
    #[clap(short = 't', long, requires = "lexicon")]
    transitions: Option<PathBuf>,

    /// Input document. Reads the standard input if not specified.
    #[clap(short = 'i', long)]
    input: Option<PathBuf>,

    /// Colouring strategy. Choices are independent, greedy, best-score, and best-path
    /// (or a, b, e, and f).
    #[clap(short = 's', long, default_value = "best-path", value_parser = parse_strategy)]
    strategy: Strategy,

    /// Number of colours considered by best-score and best-path.
    #[clap(short = 'n', long, default_value = "4")]
    num_colours: usize,

    /// Prints terms with ANSI colours. Choices are never, always, and auto.
    #[clap(long, default_value = "auto")]
    colour: ColourMode,
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse().map_err(|e: IrodoriError| e.to_string())
}

/// 実行中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
enum HighlightError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// モデルの読み込みや入力の検証に失敗したエラー
    #[error(transparent)]
    Irodori(#[from] IrodoriError),

    /// モデルの入力が指定されていないエラー
    #[error("Either --model or --lexicon must be specified.")]
    MissingSource,
}

/// 引数で指定されたモデルを読み込む
fn load_model(args: &Args) -> Result<Model, HighlightError> {
    if let Some(path) = &args.model {
        return Ok(Model::from_path(path)?);
    }
    // The argument group guarantees that either source is given.
    let lexicon = args.lexicon.as_ref().map(File::open).transpose()?;
    let transitions = args.transitions.as_ref().map(File::open).transpose()?;
    match lexicon {
        Some(lexicon) => Ok(Model::from_readers(lexicon, transitions)?),
        None => Err(HighlightError::MissingSource),
    }
}

fn main() -> Result<(), HighlightError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("Loading the model...");
    let model = load_model(&args)?;
    let tokenizer = Tokenizer::new(model).num_colours(args.num_colours)?;
    let mut worker = tokenizer.new_worker();

    let text = match &args.input {
        Some(path) => read_text(File::open(path)?)?,
        None => read_text(io::stdin().lock())?,
    };

    worker.reset_sentence(text);
    worker.tokenize();
    let solution = worker.colour(args.strategy);
    tracing::info!(
        strategy = %args.strategy,
        terms = worker.num_terms(),
        highlighted = render::count_highlighted(&solution),
        score = solution.score(),
        "Coloured the document"
    );

    let out = io::stdout();
    let mut out = BufWriter::new(out.lock());
    if args.colour.enabled() {
        render::write_coloured(&mut out, &worker, &solution)?;
    } else {
        render::write_plain(&mut out, &solution)?;
    }
    out.flush()?;

    Ok(())
}
