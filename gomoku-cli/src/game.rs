//! 对局控制
//!
//! 轮流向两名玩家要走法，落子后检查胜负与和棋。

use std::io::Write;

use gomoku_ai::Player;
use gomoku_core::{Board, Side};
use serde::Serialize;
use tracing::{debug, warn};

use crate::render::render;

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameOutcome {
    /// 一方获胜（含对手走出非法步）
    Winner(Side),
    /// 棋盘下满
    Draw,
    /// 棋盘未满时有玩家不再走子（人类输入 quit）
    Aborted,
}

/// 一局对局
pub struct Game {
    board: Board,
    /// [X, O]
    players: [Box<dyn Player>; 2],
    current: Side,
}

impl Game {
    /// X 先行；玩家的执子方按参数位置重新设置
    pub fn new(board: Board, mut x: Box<dyn Player>, mut o: Box<dyn Player>) -> Self {
        x.set_side(Side::X);
        o.set_side(Side::O);
        Self {
            board,
            players: [x, o],
            current: Side::X,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self, side: Side) -> &dyn Player {
        self.players[side.index()].as_ref()
    }

    /// 进行对局直到分出结果，过程写入 `out`（不需要输出时传 `io::sink()`）
    pub fn play(&mut self, out: &mut dyn Write) -> std::io::Result<GameOutcome> {
        writeln!(
            out,
            "{} vs {}",
            self.players[0].name(),
            self.players[1].name()
        )?;

        loop {
            write!(out, "\n{}", render(&self.board))?;

            let player = &mut self.players[self.current.index()];
            writeln!(out, "{} to move", player.name())?;

            let Some(mv) = player.get_move(&self.board) else {
                if self.board.is_full() {
                    return Ok(GameOutcome::Draw);
                }
                warn!(player = %player.name(), "Player returned no move");
                writeln!(out, "{} left the game", player.name())?;
                return Ok(GameOutcome::Aborted);
            };

            if let Err(e) = self.board.try_move(mv.row, mv.col, self.current) {
                warn!(player = %player.name(), error = %e, "Illegal move forfeits the game");
                writeln!(out, "{} played an illegal move: {}", player.name(), e)?;
                return Ok(GameOutcome::Winner(self.current.opponent()));
            }
            debug!(side = %self.current, mv = %mv, "Move applied");
            writeln!(out, "{} plays {}", player.name(), mv)?;

            if let Some(winner) = self.board.check_winner() {
                write!(out, "\n{}", render(&self.board))?;
                writeln!(out, "Player {} wins!", winner)?;
                return Ok(GameOutcome::Winner(winner));
            }

            if self.board.is_full() {
                write!(out, "\n{}", render(&self.board))?;
                writeln!(out, "The game is a draw.")?;
                return Ok(GameOutcome::Draw);
            }

            self.current = self.current.opponent();
        }
    }
}
