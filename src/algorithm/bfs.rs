//! 广度优先搜索
//!
//! 不考虑权重，按层遍历。顶点在入队时即标记为已访问，避免同一邻居被重复入队。
//! 邻居访问顺序严格遵循图中出边的插入顺序，因此多条最短路径中返回哪一条是确定的。

use super::{walk_back, PathResult, Search};
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::metrics::global_metrics;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// BFS 搜索引擎
pub struct Bfs<'g, T> {
    graph: &'g Graph<T>,
}

impl<'g, T> Bfs<'g, T> {
    /// 绑定到一张图
    pub fn new(graph: &'g Graph<T>) -> Self {
        Self { graph }
    }

    fn ensure_known(&self, id: VertexId) -> Result<()> {
        if self.graph.contains(id) {
            Ok(())
        } else {
            Err(Error::VertexNotFound(id))
        }
    }

    /// 从 start 出发可达的全部顶点，按发现顺序排列，start 在首位
    pub fn reachable_from(&self, start: VertexId) -> Result<Vec<VertexId>> {
        Ok(self.hop_distances(start)?.into_keys().collect())
    }

    /// 每个可达顶点距 start 的跳数（按发现顺序）
    pub fn hop_distances(&self, start: VertexId) -> Result<IndexMap<VertexId, usize>> {
        self.ensure_known(start)?;

        let mut levels = IndexMap::new();
        let mut queue = VecDeque::new();
        let mut edges_scanned = 0usize;

        levels.insert(start, 0);
        queue.push_back((start, 0));

        while let Some((current, level)) = queue.pop_front() {
            for edge in self.graph.edges_of(current)? {
                edges_scanned += 1;
                let neighbor = edge.dst();
                if !levels.contains_key(&neighbor) {
                    levels.insert(neighbor, level + 1);
                    queue.push_back((neighbor, level + 1));
                }
            }
        }

        global_metrics().record_bfs(levels.len(), edges_scanned);
        debug!(start = %start, visited = levels.len(), edges_scanned, "bfs traversal finished");

        Ok(levels)
    }

    /// 按边数最短的路径（包含两端）
    ///
    /// 不可达时返回空结果；src == dst 时返回 [src]。
    pub fn find_path(&self, src: VertexId, dst: VertexId) -> Result<PathResult> {
        self.ensure_known(src)?;
        self.ensure_known(dst)?;

        if src == dst {
            return Ok(PathResult::with_start(src));
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        // 子顶点 -> (发现它的父顶点, 所用边的权重)
        let mut parent: HashMap<VertexId, (VertexId, f64)> = HashMap::new();
        let mut edges_scanned = 0usize;

        visited.insert(src);
        queue.push_back(src);

        while let Some(current) = queue.pop_front() {
            for edge in self.graph.edges_of(current)? {
                edges_scanned += 1;
                let neighbor = edge.dst();
                if !visited.insert(neighbor) {
                    continue;
                }
                parent.insert(neighbor, (current, edge.weight()));
                queue.push_back(neighbor);

                if neighbor == dst {
                    global_metrics().record_bfs(visited.len(), edges_scanned);
                    return Ok(Self::reconstruct_path(src, dst, &parent));
                }
            }
        }

        global_metrics().record_bfs(visited.len(), edges_scanned);
        debug!(src = %src, dst = %dst, visited = visited.len(), "bfs found no path");

        Ok(PathResult::unreachable())
    }

    fn reconstruct_path(
        src: VertexId,
        dst: VertexId,
        parent: &HashMap<VertexId, (VertexId, f64)>,
    ) -> PathResult {
        let mut total_weight = 0.0;
        let vertices = walk_back(src, dst, |v| {
            parent.get(&v).map(|&(prev, weight)| {
                total_weight += weight;
                prev
            })
        });

        PathResult {
            vertices,
            total_weight,
        }
    }
}

impl<T> Search<T> for Bfs<'_, T> {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn find_path(&self, src: VertexId, dst: VertexId) -> Result<PathResult> {
        Bfs::find_path(self, src, dst)
    }
}
