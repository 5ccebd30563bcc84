//! 图数据结构
//!
//! 邻接表：顶点 ID -> 有序出边列表。顶点注册顺序与每个顶点的出边插入顺序都会被保留，
//! BFS 的邻居访问顺序依赖于此。

use super::edge::Edge;
use super::vertex::{Vertex, VertexId};
use crate::error::{Error, Result};
use crate::metrics::global_metrics;
use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

/// 单个顶点的存储槽：顶点记录 + 出边
#[derive(Debug, Clone)]
struct Slot<T> {
    vertex: Vertex<T>,
    edges: SmallVec<[Edge; 4]>,
}

/// 有向带权图
///
/// 非线程安全：构建完成后再遍历。需要并发读时使用 [`SharedGraph`](super::SharedGraph)。
#[derive(Debug, Clone)]
pub struct Graph<T> {
    /// 顶点 ID -> 存储槽（按注册顺序）
    slots: IndexMap<VertexId, Slot<T>>,
    /// 边总数
    edge_count: usize,
}

impl<T> Graph<T> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            slots: IndexMap::new(),
            edge_count: 0,
        }
    }

    // ==================== 顶点操作 ====================

    /// 注册顶点
    ///
    /// 若该 ID 已注册，则替换载荷并清空其出边，枚举位置保持不变。
    pub fn add_vertex(&mut self, vertex: Vertex<T>) -> VertexId {
        let id = vertex.id();
        let slot = Slot {
            vertex,
            edges: SmallVec::new(),
        };

        if let Some(old) = self.slots.insert(id, slot) {
            self.edge_count -= old.edges.len();
            debug!(vertex = %id, dropped_edges = old.edges.len(), "vertex re-registered");
        }
        global_metrics().record_vertex_insert();

        id
    }

    /// 以载荷创建并注册新顶点
    pub fn insert(&mut self, data: T) -> VertexId {
        self.add_vertex(Vertex::new(data))
    }

    /// 替换已注册顶点的载荷，并清空其出边
    ///
    /// 顶点未注册时返回 [`Error::VertexNotFound`]，图保持不变。
    pub fn replace_vertex(&mut self, id: VertexId, data: T) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::VertexNotFound(id));
        }
        self.add_vertex(Vertex::with_id(id, data));
        Ok(())
    }

    /// 顶点是否已注册
    pub fn contains(&self, id: VertexId) -> bool {
        self.slots.contains_key(&id)
    }

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.slots.get(&id).map(|slot| &slot.vertex)
    }

    /// 获取顶点载荷
    pub fn data(&self, id: VertexId) -> Option<&T> {
        self.vertex(id).map(Vertex::data)
    }

    /// 按注册顺序枚举所有顶点
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<T>> + '_ {
        self.slots.values().map(|slot| &slot.vertex)
    }

    /// 按注册顺序获取所有顶点 ID
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.slots.keys().copied().collect()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // ==================== 边操作 ====================

    /// 添加有向边 src -> dst
    ///
    /// 任一端点未注册时返回 [`Error::InvalidVertex`]，权重为 NaN 或负数时返回
    /// [`Error::InvalidWeight`]。出错时图保持不变。
    pub fn add_edge(&mut self, src: VertexId, dst: VertexId, weight: f64) -> Result<()> {
        if !self.contains(src) {
            return Err(Error::InvalidVertex(src));
        }
        if !self.contains(dst) {
            return Err(Error::InvalidVertex(dst));
        }
        if weight.is_nan() || weight < 0.0 {
            return Err(Error::InvalidWeight(weight));
        }

        let slot = self.slots.get_mut(&src).ok_or(Error::InvalidVertex(src))?;
        slot.edges.push(Edge::new(src, dst, weight));
        self.edge_count += 1;
        global_metrics().record_edge_insert();

        Ok(())
    }

    /// 获取顶点的出边（按插入顺序）
    pub fn edges_of(&self, id: VertexId) -> Result<&[Edge]> {
        self.slots
            .get(&id)
            .map(|slot| slot.edges.as_slice())
            .ok_or(Error::VertexNotFound(id))
    }

    /// 所有边：先按顶点注册顺序，再按每个顶点的出边顺序
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.slots.values().flat_map(|slot| slot.edges.iter())
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// 获取顶点的出度
    pub fn out_degree(&self, id: VertexId) -> Result<usize> {
        self.edges_of(id).map(<[Edge]>::len)
    }

    /// 计算顶点序列的总权重
    ///
    /// 相邻两点之间有多条边时取最轻的一条；存在不相连的相邻点对时返回 None。
    pub fn path_weight(&self, path: &[VertexId]) -> Option<f64> {
        let mut total = 0.0;
        for pair in path.windows(2) {
            let lightest = self
                .edges_of(pair[0])
                .ok()?
                .iter()
                .filter(|edge| edge.dst() == pair[1])
                .map(Edge::weight)
                .min_by(f64::total_cmp)?;
            total += lightest;
        }
        Some(total)
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}
