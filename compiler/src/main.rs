//! Irodori モデルコンパイラのメインエントリーポイント
//!
//! CSV形式の語彙と遷移表からバイナリモデルを構築するサブコマンドと、
//! 構築済みモデルの内容を確認するサブコマンドを提供します。

mod build;
mod inspect;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::{build::BuildError, inspect::InspectError};

/// コマンドライン引数の構造体
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// ソースファイルからバイナリモデルを構築します
    ///
    /// 語彙ファイル(lexicon.csv)と遷移表(transitions.csv)からrkyv形式のモデルを生成します。
    Build(build::Args),

    /// バイナリモデルを検証し、その概要を表示します
    Inspect(inspect::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
#[derive(Debug, Error)]
pub enum CompileError {
    /// モデル構築中のエラー
    #[error(transparent)]
    BuildError(#[from] BuildError),
    /// モデル検証中のエラー
    #[error(transparent)]
    InspectError(#[from] InspectError),
}

fn main() -> Result<(), CompileError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => Ok(build::run(args)?),
        Command::Inspect(args) => Ok(inspect::run(args)?),
    }
}
