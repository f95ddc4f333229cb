//! 語彙と遷移表をまとめたモデル
//!
//! このモジュールは、トークン化と色付けに必要なデータの読み込み、構築、
//! シリアライズを行います。
//!
//! # モデルの構築と読み込み
//!
//! - [`Model::from_readers`]: CSV形式のソースから構築する
//! - [`Model::write`]: `rkyv`形式のバイナリに書き出す
//! - [`Model::read`]: バイナリをリーダーから読み込む
//! - [`Model::from_path`]: バイナリをファイルパスから読み込む
pub mod lexicon;
pub mod transition;

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use rkyv::rancor::Error;
use rkyv::util::AlignedVec;
use rkyv::{access, Archive, Deserialize, Serialize};

use crate::errors::{IrodoriError, Result};

pub use crate::model::lexicon::{Lexicon, TermColourTable};
pub use crate::model::transition::{Transition, TransitionScore, TransitionTable};

/// Irodoriモデルを識別するマジックバイト。
///
/// "0.1"はモデルフォーマットのバージョンであり、クレートのバージョンとは独立しています。
pub const MODEL_MAGIC: &[u8] = b"IrodoriModelRkyv 0.1\n";

const MODEL_MAGIC_LEN: usize = MODEL_MAGIC.len();
const RKYV_ALIGNMENT: usize = 16;
const PADDING_LEN: usize = (RKYV_ALIGNMENT - (MODEL_MAGIC_LEN % RKYV_ALIGNMENT)) % RKYV_ALIGNMENT;

/// トークン化と色付けに使うモデル
///
/// 構築後は読み取り専用で、[`Tokenizer`](crate::Tokenizer)間で`Arc`により共有されます。
#[derive(Archive, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    lexicon: Lexicon,
    transitions: TransitionTable,
}

impl Model {
    /// 語彙と遷移表から新しいモデルを作成します。
    pub fn new(lexicon: Lexicon, transitions: TransitionTable) -> Self {
        Self {
            lexicon,
            transitions,
        }
    }

    /// CSV形式のソースからモデルを構築します。
    ///
    /// # 引数
    ///
    /// * `lexicon_rdr` - 語彙ファイル（`term,colour,score`）のリーダー
    /// * `transition_rdr` - 遷移表（`prev,colour,score`）のリーダー。
    ///   `None`の場合は空の遷移表を使います。
    ///
    /// # エラー
    ///
    /// いずれかの入力の形式が不正な場合にエラーを返します。
    /// 部分的に読み込まれたモデルが返されることはありません。
    pub fn from_readers<L, T>(lexicon_rdr: L, transition_rdr: Option<T>) -> Result<Self>
    where
        L: Read,
        T: Read,
    {
        let lexicon = Lexicon::from_reader(lexicon_rdr)?;
        let transitions = match transition_rdr {
            Some(rdr) => TransitionTable::from_reader(rdr)?,
            None => TransitionTable::default(),
        };
        Ok(Self::new(lexicon, transitions))
    }

    /// 語彙を返します。
    #[inline(always)]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// 遷移表を返します。
    #[inline(always)]
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// モデルを`rkyv`フォーマットでライターにシリアライズします。
    ///
    /// 出力は[`Model::read`]と[`Model::from_path`]が期待する形式です。
    ///
    /// # エラー
    ///
    /// 書き込みまたはシリアライズに失敗した場合にエラーを返します。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;

        let padding_bytes = vec![0xFF; PADDING_LEN];
        wtr.write_all(&padding_bytes)?;

        let bytes = rkyv::to_bytes::<Error>(self)?;
        wtr.write_all(&bytes)?;

        Ok(())
    }

    /// リーダーからモデルを読み込みます。
    ///
    /// すべてのデータを整列済みバッファに読み込み、検証した後に
    /// 所有型の[`Model`]へデシリアライズします。
    ///
    /// # エラー
    ///
    /// マジックバイトが一致しない場合、またはアーカイブの検証に失敗した場合に
    /// エラーを返します。
    pub fn read<R: Read>(mut rdr: R) -> Result<Self> {
        let mut magic = [0; MODEL_MAGIC_LEN];
        rdr.read_exact(&mut magic)?;

        if magic != MODEL_MAGIC {
            return Err(IrodoriError::invalid_argument(
                "rdr",
                "The magic number of the input model mismatches.",
            ));
        }

        let mut padding_buf = vec![0; PADDING_LEN];
        rdr.read_exact(&mut padding_buf)?;

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;

        let mut aligned_bytes: AlignedVec = AlignedVec::with_capacity(buffer.len());
        aligned_bytes.extend_from_slice(&buffer);

        let archived = access::<ArchivedModel, Error>(&aligned_bytes).map_err(|e| {
            IrodoriError::invalid_state(
                "rkyv validation failed. The model file may be corrupted or incompatible.",
                e.to_string(),
            )
        })?;
        let model = rkyv::deserialize::<Model, Error>(archived)?;

        tracing::debug!(
            terms = model.lexicon.len(),
            transitions = model.transitions.len(),
            "loaded model"
        );
        Ok(model)
    }

    /// ファイルパスからモデルを読み込みます。
    ///
    /// # エラー
    ///
    /// パスがディレクトリである場合、ファイルを開けない場合、
    /// または内容が不正な場合にエラーを返します。
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Err(IrodoriError::PathIsDirectory(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }
}
