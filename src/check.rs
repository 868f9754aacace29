use std::error::Error;
use std::fmt;

use unicode_width::UnicodeWidthStr;

use crate::token::tokenize;
use crate::token::Token::*;

#[derive(Debug, PartialEq, Eq)]
pub enum CheckErrorType {
    UnclosedBlock,
    ExtraCloseBlock,
    UnclosedParen,
    ExtraCloseParen,
    UnclosedPrint,
    NestedPrint,
    ExtraClosePrint,
    UnclosedStatement,
}
use CheckErrorType::*;

#[derive(Debug)]
pub struct CheckError {
    err: CheckErrorType,
    line: String,
    linenum: usize,
    offset: usize,
}

impl CheckError {
    fn new(err: CheckErrorType, source: &str, linenum: usize, offset: usize) -> Self {
        let line = source.lines().nth(linenum - 1).unwrap_or("").to_string();
        Self {
            err,
            line,
            linenum,
            offset,
        }
    }

    pub fn kind(&self) -> &CheckErrorType {
        &self.err
    }

    /// Position of the offending word, 1-based line and byte column.
    pub fn position(&self) -> (usize, usize) {
        (self.linenum, self.offset)
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = UnicodeWidthStr::width(&self.line[0..self.offset]);

        match self.err {
            UnclosedBlock => {
                write!(f, "reached EOF with unterminated block\n")?;
                write!(f, "Block opened at {}:{}\n", self.linenum, self.offset)?;
            }
            ExtraCloseBlock => {
                write!(
                    f,
                    "Re# found at {}:{} with no open block\n",
                    self.linenum, self.offset
                )?;
            }
            UnclosedParen => {
                write!(f, "reached EOF with unterminated condition\n")?;
                write!(f, "Condition opened at {}:{}\n", self.linenum, self.offset)?;
            }
            ExtraCloseParen => {
                write!(
                    f,
                    "Sol# found at {}:{} with no open condition\n",
                    self.linenum, self.offset
                )?;
            }
            UnclosedPrint => {
                write!(f, "reached EOF inside a print statement\n")?;
                write!(f, "Print opened at {}:{}\n", self.linenum, self.offset)?;
            }
            NestedPrint => {
                write!(
                    f,
                    "Fi found at {}:{} inside an open print statement\n",
                    self.linenum, self.offset
                )?;
            }
            ExtraClosePrint => {
                write!(
                    f,
                    "Si found at {}:{} with no open print statement\n",
                    self.linenum, self.offset
                )?;
            }
            UnclosedStatement => {
                write!(f, "reached EOF with an open statement header\n")?;
                write!(f, "Header opened at {}:{}\n", self.linenum, self.offset)?;
            }
        };

        write!(f, "{}\n", self.line)?;
        write!(f, "{}^", " ".repeat(width))?;

        Ok(())
    }
}

impl Error for CheckError {}

/// Walks one line's whitespace-delimited words together with their byte
/// offsets within the line.
fn words_with_offsets(line: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut idx = 0;
    std::iter::from_fn(move || {
        let rest = &line[idx..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            return None;
        }
        let start = idx + (rest.len() - trimmed.len());
        let end = trimmed
            .find(char::is_whitespace)
            .map(|i| start + i)
            .unwrap_or_else(|| line.len());
        idx = end;
        Some((start, &line[start..end]))
    })
}

/// Optional structural validation of a Solfege token stream: block, paren,
/// print and statement tokens must balance the way the generator expects
/// them to. The generator itself never runs this; translation of an
/// unbalanced stream stays legal and produces unbalanced C.
pub fn check(source: &str) -> Result<(), CheckError> {
    let mut blocks: Vec<(usize, usize)> = Vec::new();
    let mut parens: Vec<(usize, usize)> = Vec::new();
    let mut print_open: Option<(usize, usize)> = None;
    let mut statement_open: Option<(usize, usize)> = None;

    for (num, line) in source.lines().enumerate() {
        let linenum = num + 1;
        for (offset, word) in words_with_offsets(line) {
            match tokenize(word) {
                MiSharp => blocks.push((linenum, offset)),
                ReSharp => {
                    if blocks.pop().is_none() {
                        return Err(CheckError::new(ExtraCloseBlock, source, linenum, offset));
                    }
                }
                FaSharp => parens.push((linenum, offset)),
                SolSharp => {
                    if parens.pop().is_none() {
                        return Err(CheckError::new(ExtraCloseParen, source, linenum, offset));
                    }
                }
                Fi => {
                    if print_open.is_some() {
                        return Err(CheckError::new(NestedPrint, source, linenum, offset));
                    }
                    print_open = Some((linenum, offset));
                }
                Si => {
                    if print_open.take().is_none() {
                        return Err(CheckError::new(ExtraClosePrint, source, linenum, offset));
                    }
                }
                // Li toggles the statement flag, Ra only sets it; both
                // mirror the generator's flag handling exactly
                Li => {
                    if statement_open.take().is_none() {
                        statement_open = Some((linenum, offset));
                    }
                }
                Ra => {
                    if statement_open.is_none() {
                        statement_open = Some((linenum, offset));
                    }
                }
                _ => (),
            }
        }
    }

    if let Some(&(linenum, offset)) = blocks.last() {
        return Err(CheckError::new(UnclosedBlock, source, linenum, offset));
    }
    if let Some(&(linenum, offset)) = parens.last() {
        return Err(CheckError::new(UnclosedParen, source, linenum, offset));
    }
    if let Some((linenum, offset)) = print_open {
        return Err(CheckError::new(UnclosedPrint, source, linenum, offset));
    }
    if let Some((linenum, offset)) = statement_open {
        return Err(CheckError::new(UnclosedStatement, source, linenum, offset));
    }

    Ok(())
}
