//! 色付け結果の出力形式

use std::io::{self, Write};
use std::str::FromStr;

use irodori::colouring::UNHIGHLIGHTED;
use irodori::tokenizer::worker::Worker;
use irodori::Solution;

/// 色0..3に対応する256色パレットの背景色
const PALETTE: [u8; 4] = [231, 10, 11, 12];

/// 色付き出力を使うかどうか
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColourMode {
    Never,
    Always,
    Auto,
}

impl FromStr for ColourMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            _ => Err("Could not parse a colour mode"),
        }
    }
}

impl ColourMode {
    /// 色付き出力が有効かどうかを返します。
    ///
    /// `Auto`の場合は標準出力が端末であるときのみ有効です。
    pub fn enabled(self) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Auto => atty::is(atty::Stream::Stdout),
        }
    }
}

/// 色の列、またはスコアのみを出力します。
pub fn write_plain<W>(wtr: &mut W, solution: &Solution) -> io::Result<()>
where
    W: Write,
{
    if !solution.strategy().assigns_colours() {
        return writeln!(wtr, "{}", solution.score());
    }
    for (i, colour) in solution.colours().iter().enumerate() {
        if i != 0 {
            wtr.write_all(b" ")?;
        }
        match colour {
            Some(colour) => write!(wtr, "{colour}")?,
            None => wtr.write_all(b"-")?,
        }
    }
    wtr.write_all(b"\n")
}

/// 用語を色ごとのANSI背景色で出力します。
///
/// パレット外の色や色のない用語は赤い文字で出力します。
pub fn write_coloured<W>(wtr: &mut W, worker: &Worker, solution: &Solution) -> io::Result<()>
where
    W: Write,
{
    if !solution.strategy().assigns_colours() {
        return writeln!(wtr, "{}", solution.score());
    }
    for (i, term) in worker.term_iter().enumerate() {
        if i != 0 {
            wtr.write_all(b" ")?;
        }
        match solution.colour(i).and_then(|c| PALETTE.get(c)) {
            Some(background) => write!(wtr, "\x1b[48;5;{background}m\x1b[38;5;0m{}\x1b[0m", term.text())?,
            None => write!(wtr, "\x1b[31m{}\x1b[0m", term.text())?,
        }
    }
    wtr.write_all(b"\n")
}

/// 強調された用語（色が0以外）の数を返します。
pub fn count_highlighted(solution: &Solution) -> usize {
    solution
        .colours()
        .iter()
        .filter(|c| c.is_some_and(|c| c != UNHIGHLIGHTED))
        .count()
}
