//! 置换表
//!
//! 缓存已搜索过的局面，避免经不同走法顺序到达的同一局面被重复搜索。
//! 每次 `get_move` 开始时清空。

use std::collections::HashMap;

/// 置换表条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// 精确值
    Exact,
    /// 下界（Beta 截断）
    LowerBound,
    /// 上界（Alpha 截断）
    UpperBound,
}

/// 置换表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// 评估分数
    pub score: i32,
    /// 搜索深度（剩余层数）
    pub depth: u8,
    /// 条目类型
    pub entry_type: EntryType,
}

impl TTEntry {
    /// 在当前深度和窗口下，该条目能否直接给出结果
    ///
    /// 只有当条目的搜索深度不小于当前所需深度时才可信。
    pub fn usable(&self, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.entry_type {
            EntryType::Exact => Some(self.score),
            EntryType::LowerBound if self.score >= beta => Some(self.score),
            EntryType::UpperBound if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

/// 置换表
#[derive(Debug, Default)]
pub struct TranspositionTable {
    /// 指纹 -> 条目
    entries: HashMap<u64, TTEntry>,
    /// 给出可用分数的查询次数
    hits: u64,
    /// 查询次数
    probes: u64,
}

impl TranspositionTable {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询在当前深度和窗口下可直接使用的分数
    ///
    /// 只有给出分数的查询才计入命中。
    pub fn probe(&mut self, key: u64, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        self.probes += 1;
        let score = self
            .entries
            .get(&key)
            .and_then(|entry| entry.usable(depth, alpha, beta));
        if score.is_some() {
            self.hits += 1;
        }
        score
    }

    /// 读取条目（不计入统计）
    pub fn get(&self, key: u64) -> Option<TTEntry> {
        self.entries.get(&key).copied()
    }

    /// 存储条目（重新搜索的结果总是覆盖旧条目）
    pub fn store(&mut self, key: u64, score: i32, depth: u8, entry_type: EntryType) {
        self.entries.insert(
            key,
            TTEntry {
                score,
                depth,
                entry_type,
            },
        );
    }

    /// 清空表
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.probes = 0;
    }

    /// 条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 获取统计信息
    pub fn stats(&self) -> TTStats {
        TTStats {
            entries: self.entries.len(),
            hits: self.hits,
            probes: self.probes,
        }
    }
}

/// 置换表统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTStats {
    pub entries: usize,
    pub hits: u64,
    pub probes: u64,
}

impl TTStats {
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tt_store_and_probe() {
        let mut tt = TranspositionTable::new();

        let key = 0x1234567890ABCDEF_u64;
        tt.store(key, 100, 5, EntryType::Exact);

        let entry = tt.get(key).unwrap();
        assert_eq!(entry.score, 100);
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.entry_type, EntryType::Exact);
    }

    #[test]
    fn test_tt_miss() {
        let mut tt = TranspositionTable::new();
        assert!(tt.probe(0x1234567890ABCDEF, 1, i32::MIN, i32::MAX).is_none());
        assert_eq!(tt.stats().probes, 1);
        assert_eq!(tt.stats().hits, 0);
    }

    #[test]
    fn test_tt_overwrite() {
        let mut tt = TranspositionTable::new();
        let key = 42;

        tt.store(key, 50, 5, EntryType::Exact);
        tt.store(key, 80, 2, EntryType::Exact);

        let entry = tt.get(key).unwrap();
        assert_eq!(entry.depth, 2);
        assert_eq!(entry.score, 80);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_entry_depth_requirement() {
        let entry = TTEntry {
            score: 30,
            depth: 2,
            entry_type: EntryType::Exact,
        };
        assert_eq!(entry.usable(2, i32::MIN, i32::MAX), Some(30));
        assert_eq!(entry.usable(1, i32::MIN, i32::MAX), Some(30));
        assert_eq!(entry.usable(3, i32::MIN, i32::MAX), None);
    }

    #[test]
    fn test_entry_bounds() {
        let lower = TTEntry {
            score: 100,
            depth: 3,
            entry_type: EntryType::LowerBound,
        };
        assert_eq!(lower.usable(3, 0, 90), Some(100));
        assert_eq!(lower.usable(3, 0, 200), None);

        let upper = TTEntry {
            score: -50,
            depth: 3,
            entry_type: EntryType::UpperBound,
        };
        assert_eq!(upper.usable(3, -40, 100), Some(-50));
        assert_eq!(upper.usable(3, -60, 100), None);
    }

    #[test]
    fn test_clear_and_stats() {
        let mut tt = TranspositionTable::new();
        tt.store(1, 10, 1, EntryType::Exact);
        assert_eq!(tt.probe(1, 1, i32::MIN, i32::MAX), Some(10));
        assert_eq!(tt.probe(2, 1, i32::MIN, i32::MAX), None);

        let stats = tt.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hit_rate(), 0.5);

        tt.clear();
        assert!(tt.is_empty());
        assert_eq!(tt.stats().probes, 0);
    }

    #[test]
    fn test_unusable_entry_is_not_a_hit() {
        let mut tt = TranspositionTable::new();
        tt.store(7, 40, 1, EntryType::Exact);
        tt.store(8, 100, 3, EntryType::LowerBound);

        // 深度不够
        assert_eq!(tt.probe(7, 2, i32::MIN, i32::MAX), None);
        // 下界落在窗口内
        assert_eq!(tt.probe(8, 3, 0, 200), None);
        assert_eq!(tt.stats().hits, 0);
        assert_eq!(tt.stats().probes, 2);

        assert_eq!(tt.probe(8, 3, 0, 90), Some(100));
        assert_eq!(tt.stats().hits, 1);
    }
}
