//! 搜索引擎
//!
//! 实现 Minimax（带 Alpha-Beta 边界）和迭代加深 Alpha-Beta 两种策略。
//!
//! 每次调用 `analyze` 的流程：
//! 清空缓存 → 开局取中心 → 快速战术（成五 / 挡五）→ 候选排序 → 搜索 → 从同分最佳走法中随机选一个

use std::time::{Duration, Instant};

use gomoku_core::{Board, Move, Side, DEFAULT_BOARD_SIZE, WIN_SCORE};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::evaluate::Evaluator;
use crate::selector::{MoveSelector, Tactic};
use crate::transposition::{EntryType, TTStats, TranspositionTable};
use crate::zobrist::ZobristTable;

/// 达到该分数视为已找到必胜，不再加深
pub const FORCED_WIN_THRESHOLD: i32 = 8000;

/// 搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// 单次定深搜索
    Minimax,
    /// 迭代加深
    AlphaBeta,
}

impl Strategy {
    /// 显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Minimax => "Minimax",
            Strategy::AlphaBeta => "Alpha-Beta",
        }
    }
}

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// 对应的等级 (1..=10)
    pub fn level(&self) -> u8 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 6,
            Difficulty::Hard => 10,
        }
    }
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub strategy: Strategy,
    /// 最大搜索深度（0 会被提升为 1）
    pub max_depth: u8,
    /// 迭代加深的时间预算
    pub time_limit_ms: u64,
    /// 根节点考察的候选数
    pub root_width: usize,
    /// 内部节点考察的候选数
    pub node_width: usize,
    /// 是否剪枝（关闭后为纯 Minimax，结果相同，只是更慢）
    pub prune: bool,
    /// 同分走法随机选择的种子（None 表示每次随机）
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn minimax(depth: u8) -> Self {
        Self {
            strategy: Strategy::Minimax,
            max_depth: depth,
            time_limit_ms: 3000,
            root_width: 12,
            node_width: 8,
            prune: true,
            seed: None,
        }
    }

    pub fn alpha_beta(depth: u8) -> Self {
        Self {
            strategy: Strategy::AlphaBeta,
            max_depth: depth,
            time_limit_ms: 3000,
            root_width: 12,
            node_width: 10,
            prune: true,
            seed: None,
        }
    }

    /// 从等级 (1..=10) 换算搜索深度
    pub fn from_level(strategy: Strategy, level: u8) -> Self {
        let level = level.clamp(1, 10);
        match strategy {
            Strategy::Minimax => Self::minimax((level / 3).clamp(1, 3)),
            Strategy::AlphaBeta => Self::alpha_beta((level / 2).clamp(1, 5)),
        }
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::from_level(Strategy::AlphaBeta, difficulty.level())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 是否使用迭代加深
    pub fn iterative_deepening(&self) -> bool {
        self.strategy == Strategy::AlphaBeta
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::alpha_beta(3)
    }
}

/// 走法的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    /// 空棋盘，直接取中心
    Opening,
    /// 一步成五
    QuickWin,
    /// 挡住对方的一步成五
    QuickBlock,
    /// 完整搜索
    Search,
    /// 没有可走的格子
    NoMoves,
}

/// 一次 `analyze` 的结果
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// 选中的走法
    pub best_move: Option<Move>,
    /// 同分的全部最佳走法
    pub best_moves: Vec<Move>,
    /// 最佳分数（仅搜索得出时有值）
    pub score: Option<i32>,
    /// 最深完成的搜索深度
    pub depth: u8,
    /// 每层的最佳分数
    pub depth_scores: Vec<(u8, i32)>,
    /// 访问的节点数
    pub nodes: u64,
    pub elapsed: Duration,
    pub decision: Decision,
}

impl SearchReport {
    fn immediate(mv: Option<Move>, decision: Decision, start: Instant) -> Self {
        Self {
            best_move: mv,
            best_moves: mv.into_iter().collect(),
            score: None,
            depth: 0,
            depth_scores: Vec::new(),
            nodes: 0,
            elapsed: start.elapsed(),
            decision,
        }
    }
}

/// AI 引擎
///
/// 置换表和走法历史表都是单次调用内的状态，每次 `analyze` 开始时清空。
pub struct AiEngine {
    config: AiConfig,
    evaluator: Evaluator,
    selector: MoveSelector,
    cache: TranspositionTable,
    zobrist: ZobristTable,
    rng: ChaCha8Rng,
    nodes: u64,
    /// 引擎执子方（极大方）
    me: Side,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(mut config: AiConfig) -> Self {
        if config.max_depth == 0 {
            warn!("max_depth 0 is not searchable, clamping to 1");
            config.max_depth = 1;
        }

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            evaluator: Evaluator::for_strategy(config.strategy),
            selector: MoveSelector::new(),
            cache: TranspositionTable::new(),
            zobrist: ZobristTable::new(DEFAULT_BOARD_SIZE),
            rng,
            nodes: 0,
            me: Side::X,
            config,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 上一次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// 上一次搜索的置换表统计
    pub fn cache_stats(&self) -> TTStats {
        self.cache.stats()
    }

    /// 上一次搜索结束时走法历史表中的权重
    pub fn history_weight(&self, mv: Move) -> u64 {
        self.selector.history_weight(mv)
    }

    /// 为 `side` 选择走法，没有可走的格子时返回 None
    pub fn get_move(&mut self, board: &Board, side: Side) -> Option<Move> {
        self.analyze(board, side).best_move
    }

    /// 为 `side` 选择走法，并返回搜索过程的摘要
    ///
    /// `board` 不会被修改，搜索只在副本上进行。
    pub fn analyze(&mut self, board: &Board, side: Side) -> SearchReport {
        let start = Instant::now();
        self.reset(board, side);

        if board.move_count() == 0 {
            let center = board.center();
            info!(side = %side, mv = %center, "Opening move at center");
            return SearchReport::immediate(Some(center), Decision::Opening, start);
        }

        let mut root = board.copy();
        let ordered = self.selector.order_moves(&mut root, side);
        if ordered.is_empty() {
            info!(side = %side, "No moves available");
            return SearchReport::immediate(None, Decision::NoMoves, start);
        }

        if let Some(tactic) = MoveSelector::quick_tactics(&root, &ordered, side) {
            let decision = match tactic {
                Tactic::Win(_) => Decision::QuickWin,
                Tactic::Block(_) => Decision::QuickBlock,
            };
            info!(side = %side, mv = %tactic.mv(), ?decision, "Quick tactic");
            return SearchReport::immediate(Some(tactic.mv()), decision, start);
        }

        let candidates: Vec<Move> = ordered.into_iter().take(self.config.root_width).collect();
        let budget = Duration::from_millis(self.config.time_limit_ms);
        let first_depth = if self.config.iterative_deepening() {
            1
        } else {
            self.config.max_depth
        };

        let mut report = SearchReport::immediate(None, Decision::Search, start);

        for depth in first_depth..=self.config.max_depth {
            // 至少完成一层后才检查时间
            if !report.depth_scores.is_empty() && start.elapsed() >= budget {
                debug!(depth, elapsed_ms = start.elapsed().as_millis() as u64, "Time budget exhausted");
                break;
            }

            let scored = self.search_root(&root, &candidates, depth);
            let (best_score, best_moves) = best_of(&scored);

            // 本层结束后再更新历史表，保证同一层内排序只取决于局面
            for &mv in &candidates {
                self.selector.record(mv, 2u64.saturating_pow(depth as u32));
            }

            debug!(
                depth,
                score = best_score,
                best = best_moves.len(),
                candidates = candidates.len(),
                nodes = self.nodes,
                "Depth completed"
            );

            report.depth = depth;
            report.score = Some(best_score);
            report.best_moves = best_moves;
            report.depth_scores.push((depth, best_score));

            if best_score >= FORCED_WIN_THRESHOLD {
                debug!(depth, score = best_score, "Forced win found");
                break;
            }
        }

        report.best_move = report.best_moves.choose(&mut self.rng).copied();
        report.nodes = self.nodes;
        report.elapsed = start.elapsed();

        if let Some(mv) = report.best_move {
            info!(
                side = %side,
                mv = %mv,
                score = report.score.unwrap_or_default(),
                depth = report.depth,
                nodes = report.nodes,
                elapsed_ms = report.elapsed.as_millis() as u64,
                "Search finished"
            );
        }

        report
    }

    /// 以固定深度对根节点搜索一次，返回每个根候选的分数
    ///
    /// 剪枝时只有最佳分数及与之同分的走法是精确值，其余走法的分数是上界。
    pub fn search_depth(&mut self, board: &Board, side: Side, depth: u8) -> Vec<(Move, i32)> {
        self.reset(board, side);

        let mut root = board.copy();
        let candidates: Vec<Move> = self
            .selector
            .order_moves(&mut root, side)
            .into_iter()
            .take(self.config.root_width)
            .collect();

        self.search_root(&root, &candidates, depth.max(1))
    }

    /// 清空单次调用内的状态
    fn reset(&mut self, board: &Board, side: Side) {
        self.cache.clear();
        self.selector.clear_history();
        self.nodes = 0;
        self.me = side;
        if self.zobrist.size() != board.size() {
            self.zobrist = ZobristTable::new(board.size());
        }
    }

    /// 根节点：逐个展开候选
    ///
    /// 剪枝时 alpha 取当前最佳分数减一，同分走法仍能得到精确值。
    fn search_root(&mut self, root: &Board, candidates: &[Move], depth: u8) -> Vec<(Move, i32)> {
        let mut best = i32::MIN;
        let mut scored = Vec::with_capacity(candidates.len());

        for &mv in candidates {
            let mut child = root.copy();
            let placed = child.make_move(mv.row, mv.col, self.me);
            debug_assert!(placed, "root candidate {} must be legal", mv);

            let alpha = if self.config.prune {
                best.saturating_sub(1)
            } else {
                i32::MIN
            };
            let score = self.minimax(&mut child, depth - 1, alpha, i32::MAX, false);

            best = best.max(score);
            scored.push((mv, score));
        }

        scored
    }

    /// Minimax 递归（fail-soft）
    ///
    /// `depth` 为剩余层数；`maximizing` 表示轮到引擎方走子。
    /// 分数始终以引擎方视角计算。
    fn minimax(&mut self, board: &mut Board, depth: u8, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.nodes += 1;

        // 胜负：剩余层数越多（赢得越快 / 输得越慢）分数越好
        if let Some(winner) = board.check_winner() {
            let score = WIN_SCORE + depth as i32;
            return if winner == self.me { score } else { -score };
        }

        if depth == 0 || board.is_full() {
            return self.evaluator.evaluate(board, self.me);
        }

        let key = self.zobrist.key(board, maximizing);
        if let Some(score) = self.cache.probe(key, depth, alpha, beta) {
            return score;
        }

        let mover = if maximizing { self.me } else { self.me.opponent() };
        let mut moves = self.selector.order_moves(board, mover);
        moves.truncate(self.config.node_width);
        if moves.is_empty() {
            return self.evaluator.evaluate(board, self.me);
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in moves {
            let mut child = board.copy();
            let placed = child.make_move(mv.row, mv.col, mover);
            debug_assert!(placed, "candidate {} must be legal", mv);

            let score = self.minimax(&mut child, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.config.prune && beta <= alpha {
                break;
            }
        }

        let entry_type = if !self.config.prune {
            EntryType::Exact
        } else if best <= alpha_orig {
            EntryType::UpperBound
        } else if best >= beta_orig {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.cache.store(key, best, depth, entry_type);

        best
    }
}

/// 最高分及所有同分走法（保持候选顺序）
fn best_of(scored: &[(Move, i32)]) -> (i32, Vec<Move>) {
    let best = scored.iter().map(|&(_, s)| s).max().unwrap_or(i32::MIN);
    let moves = scored
        .iter()
        .filter(|&&(_, s)| s == best)
        .map(|&(mv, _)| mv)
        .collect();
    (best, moves)
}
