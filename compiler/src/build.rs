//! モデルのビルドモジュール
//!
//! 語彙ファイルと遷移表からバイナリ形式のモデルを構築します。
//! 出力は一時ファイルに書き込んだ後に置き換えるため、
//! 失敗時に不完全なモデルが残ることはありません。

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use irodori::{errors::IrodoriError, Model};

use clap::Parser;
use tempfile::{NamedTempFile, PersistError};

/// ビルドコマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "build", about = "A program to build the binary model.")]
pub struct Args {
    /// Lexicon file (lexicon.csv) with `term,colour,score` records.
    #[clap(short = 'l', long)]
    lexicon_in: PathBuf,

    /// Transition file (transitions.csv) with `prev,colour,score` records.
    ///
    /// If this argument is not specified, every transition scores 0.
    #[clap(short = 't', long)]
    transitions_in: Option<PathBuf>,

    /// File to which the binary model is output.
    #[clap(short = 'o', long)]
    model_out: PathBuf,
}

/// ビルド処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 出力ファイルの置き換えに失敗したエラー
    #[error("Failed to persist the model: {0}")]
    Persist(#[from] PersistError),

    /// モデル構築エラー
    #[error("Model building failed: {0}")]
    Irodori(#[from] IrodoriError),
}

/// 指定されたソースファイルからモデルを構築する
///
/// # 引数
///
/// * `lexicon` - 語彙ファイルのパス
/// * `transitions` - 遷移表のパス。`None`の場合は空の遷移表
///
/// # エラー
///
/// ファイルの読み込みやモデル構築に失敗した場合、`BuildError`を返します。
pub fn build_model(lexicon: &Path, transitions: Option<&Path>) -> Result<Model, BuildError> {
    let transitions = transitions.map(File::open).transpose()?;
    Ok(Model::from_readers(File::open(lexicon)?, transitions)?)
}

/// ビルドコマンドを実行する
///
/// # エラー
///
/// ファイルの読み書きやモデル構築に失敗した場合、`BuildError`を返します。
pub fn run(args: Args) -> Result<(), BuildError> {
    tracing::info!("Compiling the model...");
    let model = build_model(&args.lexicon_in, args.transitions_in.as_deref())?;
    tracing::info!(
        terms = model.lexicon().len(),
        transitions = model.transitions().len(),
        "Compiled the model"
    );

    tracing::info!("Writing the model...");
    let dir = match args.model_out.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut wtr = BufWriter::new(tmp.as_file());
        model.write(&mut wtr)?;
        wtr.flush()?;
    }
    tmp.persist(&args.model_out)?;

    tracing::info!("Successfully built the model to {}", args.model_out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn test_build_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let lexicon = dir.path().join("lexicon.csv");
        let transitions = dir.path().join("transitions.csv");
        let model_out = dir.path().join("model.irodori");
        fs::write(&lexicon, "tree,0,5\nbig oh,1,4\n").unwrap();
        fs::write(&transitions, "0,1,2\n").unwrap();

        run(Args {
            lexicon_in: lexicon,
            transitions_in: Some(transitions),
            model_out: model_out.clone(),
        })
        .unwrap();

        let model = Model::from_path(&model_out).unwrap();
        assert_eq!(model.lexicon().len(), 2);
        assert_eq!(model.transitions().len(), 1);
    }

    #[test]
    fn test_malformed_lexicon_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let lexicon = dir.path().join("lexicon.csv");
        let model_out = dir.path().join("model.irodori");
        fs::write(&lexicon, "tree,zero,5\n").unwrap();

        let result = run(Args {
            lexicon_in: lexicon,
            transitions_in: None,
            model_out: model_out.clone(),
        });
        assert!(matches!(result, Err(BuildError::Irodori(_))));
        assert!(!model_out.exists());
    }
}
