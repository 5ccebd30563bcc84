//! 搜索指标收集模块
//!
//! 记录图构建与搜索的计数器，供诊断输出使用

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// 搜索指标
#[derive(Debug)]
pub struct SearchMetrics {
    /// BFS 运行次数
    bfs_runs: AtomicU64,
    /// Dijkstra 运行次数
    dijkstra_runs: AtomicU64,
    /// 访问（BFS 发现 / Dijkstra 确定）的顶点数
    vertices_visited: AtomicU64,
    /// 扫描过的出边数
    edges_scanned: AtomicU64,
    /// 丢弃的过期前沿条目数
    stale_entries_skipped: AtomicU64,
    /// 顶点注册数
    vertices_inserted: AtomicU64,
    /// 边插入数
    edges_inserted: AtomicU64,
    /// 创建时间
    start_time: Instant,
}

/// 可导出的指标快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub bfs_runs: u64,
    pub dijkstra_runs: u64,
    pub vertices_visited: u64,
    pub edges_scanned: u64,
    pub stale_entries_skipped: u64,
    pub vertices_inserted: u64,
    pub edges_inserted: u64,
    pub uptime_ms: u64,
}

impl SearchMetrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            bfs_runs: AtomicU64::new(0),
            dijkstra_runs: AtomicU64::new(0),
            vertices_visited: AtomicU64::new(0),
            edges_scanned: AtomicU64::new(0),
            stale_entries_skipped: AtomicU64::new(0),
            vertices_inserted: AtomicU64::new(0),
            edges_inserted: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// 记录一次 BFS
    pub fn record_bfs(&self, visited: usize, edges_scanned: usize) {
        self.bfs_runs.fetch_add(1, Ordering::Relaxed);
        self.vertices_visited.fetch_add(visited as u64, Ordering::Relaxed);
        self.edges_scanned.fetch_add(edges_scanned as u64, Ordering::Relaxed);
    }

    /// 记录一次 Dijkstra
    pub fn record_dijkstra(&self, settled: usize, edges_scanned: usize, stale: usize) {
        self.dijkstra_runs.fetch_add(1, Ordering::Relaxed);
        self.vertices_visited.fetch_add(settled as u64, Ordering::Relaxed);
        self.edges_scanned.fetch_add(edges_scanned as u64, Ordering::Relaxed);
        self.stale_entries_skipped.fetch_add(stale as u64, Ordering::Relaxed);
    }

    /// 记录顶点注册
    pub fn record_vertex_insert(&self) {
        self.vertices_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录边插入
    pub fn record_edge_insert(&self) {
        self.edges_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            bfs_runs: self.bfs_runs.load(Ordering::Relaxed),
            dijkstra_runs: self.dijkstra_runs.load(Ordering::Relaxed),
            vertices_visited: self.vertices_visited.load(Ordering::Relaxed),
            edges_scanned: self.edges_scanned.load(Ordering::Relaxed),
            stale_entries_skipped: self.stale_entries_skipped.load(Ordering::Relaxed),
            vertices_inserted: self.vertices_inserted.load(Ordering::Relaxed),
            edges_inserted: self.edges_inserted.load(Ordering::Relaxed),
            uptime_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }

    /// 重置所有计数器
    pub fn reset(&self) {
        self.bfs_runs.store(0, Ordering::Relaxed);
        self.dijkstra_runs.store(0, Ordering::Relaxed);
        self.vertices_visited.store(0, Ordering::Relaxed);
        self.edges_scanned.store(0, Ordering::Relaxed);
        self.stale_entries_skipped.store(0, Ordering::Relaxed);
        self.vertices_inserted.store(0, Ordering::Relaxed);
        self.edges_inserted.store(0, Ordering::Relaxed);
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<SearchMetrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(SearchMetrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<SearchMetrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = SearchMetrics::new();

        metrics.record_bfs(5, 6);
        metrics.record_dijkstra(4, 6, 2);
        metrics.record_vertex_insert();
        metrics.record_edge_insert();
        metrics.record_edge_insert();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.bfs_runs, 1);
        assert_eq!(snapshot.dijkstra_runs, 1);
        assert_eq!(snapshot.vertices_visited, 9);
        assert_eq!(snapshot.edges_scanned, 12);
        assert_eq!(snapshot.stale_entries_skipped, 2);
        assert_eq!(snapshot.vertices_inserted, 1);
        assert_eq!(snapshot.edges_inserted, 2);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = SearchMetrics::new();
        metrics.record_bfs(3, 3);
        metrics.reset();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.bfs_runs, 0);
        assert_eq!(snapshot.vertices_visited, 0);
    }

    #[test]
    fn test_snapshot_json() {
        let metrics = SearchMetrics::new();
        metrics.record_dijkstra(1, 0, 0);

        let json = serde_json::to_string(&metrics.snapshot()).unwrap();
        assert!(json.contains("\"dijkstra_runs\":1"));
    }
}
