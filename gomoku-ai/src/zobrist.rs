//! Zobrist 哈希
//!
//! 为置换表生成局面指纹：棋子分布 + 最后一步 + 搜索方向。
//! 指纹只做精确匹配，不做二次校验；64 位碰撞视为可接受的小概率风险。

use gomoku_core::{Board, Move, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Zobrist 哈希表
///
/// 使用固定种子的随机数为每个格子的每种棋子生成唯一的哈希值
pub struct ZobristTable {
    /// 棋盘边长
    size: usize,
    /// 棋子哈希值 [cell][side]
    stones: Vec<[u64; 2]>,
    /// 最后一步的哈希值 [cell]
    last_move: Vec<u64>,
    /// 极大层（引擎走子）标记
    maximizing: u64,
}

impl ZobristTable {
    /// 为指定边长创建表（使用固定种子保证确定性）
    pub fn new(size: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(0xDEADBEEF_CAFE_1234);
        let cells = size * size;

        let stones = (0..cells).map(|_| [rng.gen(), rng.gen()]).collect();
        let last_move = (0..cells).map(|_| rng.gen()).collect();

        Self {
            size,
            stones,
            last_move,
            maximizing: rng.gen(),
        }
    }

    /// 适用的棋盘边长
    pub fn size(&self) -> usize {
        self.size
    }

    /// 计算棋盘的完整哈希值
    pub fn hash(&self, board: &Board) -> u64 {
        debug_assert_eq!(board.size(), self.size, "zobrist table size mismatch");

        let mut hash = 0u64;
        for (pos, side) in board.stones() {
            hash ^= self.stone_hash(pos, side);
        }
        if let Some(last) = board.last_move() {
            hash ^= self.last_move[self.index(last)];
        }
        hash
    }

    /// 置换表键：局面哈希再区分极大/极小层
    pub fn key(&self, board: &Board, maximizing: bool) -> u64 {
        let hash = self.hash(board);
        if maximizing {
            hash ^ self.maximizing
        } else {
            hash
        }
    }

    /// 获取棋子的哈希值
    #[inline]
    pub fn stone_hash(&self, pos: Move, side: Side) -> u64 {
        self.stones[self.index(pos)][side.index()]
    }

    #[inline]
    fn index(&self, pos: Move) -> usize {
        pos.row * self.size + pos.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zobrist_deterministic() {
        let table1 = ZobristTable::new(15);
        let table2 = ZobristTable::new(15);

        let mut board = Board::new(15).unwrap();
        board.make_move(7, 7, Side::X);
        board.make_move(7, 8, Side::O);

        assert_eq!(table1.hash(&board), table2.hash(&board), "Zobrist 哈希应该是确定性的");
    }

    #[test]
    fn test_zobrist_different_positions() {
        let table = ZobristTable::new(15);

        let mut board1 = Board::new(15).unwrap();
        board1.make_move(7, 7, Side::X);
        let mut board2 = Board::new(15).unwrap();
        board2.make_move(7, 7, Side::O);

        assert_ne!(table.hash(&board1), table.hash(&board2), "不同局面应该有不同的哈希值");
    }

    #[test]
    fn test_zobrist_transposition_same_hash() {
        let table = ZobristTable::new(15);

        // 同一组棋子、同一最后一步，中间顺序不同
        let mut a = Board::new(15).unwrap();
        a.make_move(7, 7, Side::X);
        a.make_move(6, 6, Side::O);
        a.make_move(8, 8, Side::X);
        a.make_move(5, 5, Side::O);

        let mut b = Board::new(15).unwrap();
        b.make_move(8, 8, Side::X);
        b.make_move(6, 6, Side::O);
        b.make_move(7, 7, Side::X);
        b.make_move(5, 5, Side::O);

        assert_eq!(table.hash(&a), table.hash(&b));
    }

    #[test]
    fn test_zobrist_last_move_matters() {
        let table = ZobristTable::new(15);

        let mut a = Board::new(15).unwrap();
        a.make_move(7, 7, Side::X);
        a.make_move(8, 8, Side::X);

        let mut b = Board::new(15).unwrap();
        b.make_move(8, 8, Side::X);
        b.make_move(7, 7, Side::X);

        assert_ne!(table.hash(&a), table.hash(&b), "最后一步不同应该有不同的哈希值");
    }

    #[test]
    fn test_zobrist_side_to_move_matters() {
        let table = ZobristTable::new(9);
        let mut board = Board::new(9).unwrap();
        board.make_move(4, 4, Side::X);

        assert_ne!(table.key(&board, true), table.key(&board, false));
        assert_eq!(table.key(&board, false), table.hash(&board));
    }
}
