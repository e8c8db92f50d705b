//! 人类玩家（终端输入）

use std::io::{self, BufRead, Write};

use gomoku_ai::Player;
use gomoku_core::{Board, Move, Side};
use thiserror::Error;
use tracing::warn;

use crate::render::render;

/// 提示时列出的候选数
const HINT_COUNT: usize = 3;

/// 一行输入解析出的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 落子 "row col"
    Place(Move),
    /// 显示推荐走法
    Hint,
    /// 退出对局
    Quit,
}

/// 输入错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Expected two integers separated by whitespace, got {0:?}")]
    Format(String),

    #[error("({row}, {col}) is not an empty cell on this board")]
    Illegal { row: usize, col: usize },
}

/// 解析一行输入
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "hint" | "h" => return Ok(Command::Hint),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let [row, col] = parts.as_slice() else {
        return Err(InputError::Format(trimmed.to_string()));
    };
    match (row.parse::<usize>(), col.parse::<usize>()) {
        (Ok(row), Ok(col)) => Ok(Command::Place(Move::new(row, col))),
        _ => Err(InputError::Format(trimmed.to_string())),
    }
}

/// 按行读取输入
pub trait LineSource {
    /// 读一行追加到 `buf`，返回读取的字节数（0 表示输入结束）
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl<R: BufRead> LineSource for R {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// 标准输入，每次读取时才加锁，两名人类玩家可以共用
#[derive(Debug, Default, Clone, Copy)]
pub struct SharedStdin;

impl LineSource for SharedStdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::stdin().read_line(buf)
    }
}

/// 从任意输入源读取走法的人类玩家
///
/// 非法走法会提示后重新输入；`quit` 或输入结束时返回 None。
pub struct HumanPlayer<R, W> {
    side: Side,
    input: R,
    output: W,
}

impl<R: LineSource, W: Write> HumanPlayer<R, W> {
    pub fn new(side: Side, input: R, output: W) -> Self {
        Self { side, input, output }
    }

    fn prompt(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "Player {}, enter your move (row col), 'hint' or 'quit': ", self.side)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn show_hint(&mut self, board: &Board) -> io::Result<()> {
        let mut scratch = board.copy();
        let hints: Vec<String> = scratch
            .get_smart_moves(Some(HINT_COUNT))
            .iter()
            .map(|mv| format!("{} {}", mv.row, mv.col))
            .collect();
        writeln!(self.output, "Suggested moves: {}", hints.join(", "))
    }

    fn read_move(&mut self, board: &Board) -> io::Result<Option<Move>> {
        loop {
            let Some(line) = self.prompt()? else {
                return Ok(None);
            };

            let command = parse_command(&line).and_then(|command| match command {
                Command::Place(mv) if !board.is_valid_move(mv.row, mv.col) => Err(InputError::Illegal {
                    row: mv.row,
                    col: mv.col,
                }),
                other => Ok(other),
            });

            match command {
                Ok(Command::Place(mv)) => return Ok(Some(mv)),
                Ok(Command::Hint) => {
                    self.show_hint(board)?;
                    writeln!(self.output, "{}", render(board))?;
                }
                Ok(Command::Quit) => return Ok(None),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }
}

impl<R: LineSource, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> String {
        format!("Human ({})", self.side)
    }

    fn side(&self) -> Side {
        self.side
    }

    fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        match self.read_move(board) {
            Ok(mv) => mv,
            Err(e) => {
                warn!(error = %e, "Failed to read human input");
                None
            }
        }
    }
}
