//! ユーティリティ関数と型変換トレイトを提供するモジュール
//!
//! - `FromU32`: u32からの型変換トレイト
//! - CSVレコードの解析

use csv_core::ReadFieldResult;

use crate::errors::{IrodoriError, Result};

/// u32から他の型への変換を提供するトレイト
///
/// 語彙IDは`u32`で保持されるため、配列の添字として使う際に利用します。
pub trait FromU32 {
    /// u32値から実装型を生成する
    fn from_u32(src: u32) -> Self;
}

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl FromU32 for usize {
    #[inline(always)]
    fn from_u32(src: u32) -> Self {
        // Since the pointer width is guaranteed to be 32 or 64,
        // the following process always succeeds.
        unsafe { Self::try_from(src).unwrap_unchecked() }
    }
}

/// CSVの1レコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CsvRecord {
    /// 1始まりのレコード番号（空行は数えない）
    pub(crate) index: usize,

    /// フィールドの値
    pub(crate) fields: Vec<String>,
}

/// CSV形式のバイト列をレコードの列に分解します。
///
/// ダブルクォートで囲まれたフィールドも`csv-core`の規則どおりに処理します。
/// 空行は読み飛ばします。
///
/// # 引数
///
/// * `bytes` - 入力バイト列
/// * `name` - エラーメッセージに使う入力名
///
/// # エラー
///
/// フィールドが大きすぎる場合、またはUTF-8として不正な場合にエラーを返します。
pub(crate) fn parse_csv_records(mut bytes: &[u8], name: &'static str) -> Result<Vec<CsvRecord>> {
    let mut records = vec![];

    let mut rdr = csv_core::Reader::new();
    let mut output = [0; 4096];
    let mut field = vec![];
    let mut fields = vec![];

    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        bytes = &bytes[nin..];
        field.extend_from_slice(&output[..nout]);
        match result {
            ReadFieldResult::InputEmpty => {}
            ReadFieldResult::OutputFull => {
                return Err(IrodoriError::invalid_format(name, "Field too large"))
            }
            ReadFieldResult::Field { record_end } => {
                fields.push(std::str::from_utf8(&field)?.to_string());
                field.clear();
                if record_end {
                    let blank = fields.len() == 1 && fields[0].trim().is_empty();
                    if blank {
                        fields.clear();
                    } else {
                        records.push(CsvRecord {
                            index: records.len() + 1,
                            fields: std::mem::take(&mut fields),
                        });
                    }
                }
            }
            ReadFieldResult::End => break,
        }
    }
    Ok(records)
}
