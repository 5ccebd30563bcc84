//! 图搜索算法模块
//!
//! 包含 BFS 和 Dijkstra 两种路径查找策略

mod bfs;
mod dijkstra;

pub use bfs::Bfs;
pub use dijkstra::{Dijkstra, ShortestPaths};

use crate::error::Result;
use crate::graph::{Graph, VertexId};
use serde::{Deserialize, Serialize};

/// 路径结果
///
/// 顶点序列为空表示目标不可达。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// 路径上的顶点序列（包含两端）
    pub vertices: Vec<VertexId>,
    /// 路径总权重
    pub total_weight: f64,
}

impl PathResult {
    /// 不可达
    pub fn unreachable() -> Self {
        Self {
            vertices: Vec::new(),
            total_weight: f64::INFINITY,
        }
    }

    fn with_start(start: VertexId) -> Self {
        Self {
            vertices: vec![start],
            total_weight: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// 顶点数
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// 边数
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    pub fn target(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }

    /// 把顶点序列映射为载荷序列
    pub fn payloads<'g, T>(&self, graph: &'g Graph<T>) -> Vec<&'g T> {
        self.vertices
            .iter()
            .filter_map(|&id| graph.data(id))
            .collect()
    }
}

/// 路径查找能力
pub trait Search<T> {
    /// 策略名称
    fn name(&self) -> &'static str;

    /// 查找 src 到 dst 的路径；不可达时返回空结果而不是错误
    fn find_path(&self, src: VertexId, dst: VertexId) -> Result<PathResult>;
}

/// 沿父指针从 dst 回溯到 src 并反转
///
/// 调用方需保证 dst 可达，且父指针链最终回到 src。
fn walk_back<F>(src: VertexId, dst: VertexId, mut parent_of: F) -> Vec<VertexId>
where
    F: FnMut(VertexId) -> Option<VertexId>,
{
    let mut vertices = vec![dst];
    let mut current = dst;

    while current != src {
        match parent_of(current) {
            Some(prev) => {
                vertices.push(prev);
                current = prev;
            }
            None => break,
        }
    }

    vertices.reverse();
    vertices
}
