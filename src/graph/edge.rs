//! 边定义

use crate::graph::vertex::VertexId;
use serde::{Deserialize, Serialize};

/// 有向带权边，创建后不可修改
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// 源顶点 ID
    src: VertexId,
    /// 目标顶点 ID
    dst: VertexId,
    /// 权重（非负）
    weight: f64,
}

impl Edge {
    /// 创建新边（权重由 Graph::add_edge 校验）
    pub(crate) fn new(src: VertexId, dst: VertexId, weight: f64) -> Self {
        Self { src, dst, weight }
    }

    /// 获取源顶点 ID
    pub fn src(&self) -> VertexId {
        self.src
    }

    /// 获取目标顶点 ID
    pub fn dst(&self) -> VertexId {
        self.dst
    }

    /// 获取边的权重
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// 是否为自环
    pub fn is_loop(&self) -> bool {
        self.src == self.dst
    }
}
