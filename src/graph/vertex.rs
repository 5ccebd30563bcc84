//! 顶点定义
//!
//! 顶点以 ID 区分身份，而不是以载荷值区分

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// 进程内下一个可分配的顶点 ID
static NEXT_VERTEX_ID: AtomicU64 = AtomicU64::new(1);

/// 顶点 ID（进程内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// 分配一个新的、从未使用过的 ID
    pub fn next() -> Self {
        Self(NEXT_VERTEX_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 顶点
///
/// 载荷相同的两个顶点仍是不同的实体；只有 ID 相同才视为同一顶点。
#[derive(Debug, Clone, Serialize)]
pub struct Vertex<T> {
    /// 顶点 ID
    id: VertexId,
    /// 载荷
    data: T,
}

impl<T> Vertex<T> {
    /// 创建新顶点，并分配新的 ID
    pub fn new(data: T) -> Self {
        Self {
            id: VertexId::next(),
            data,
        }
    }

    /// 以指定 ID 创建顶点
    ///
    /// 注册这样的顶点会替换同 ID 的已注册顶点；外部调用方通过 Graph::replace_vertex 完成。
    pub(crate) fn with_id(id: VertexId, data: T) -> Self {
        Self { id, data }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取载荷
    pub fn data(&self) -> &T {
        &self.data
    }

    /// 取出载荷
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> PartialEq for Vertex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Vertex<T> {}

impl<T> std::hash::Hash for Vertex<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_identity() {
        let a = Vertex::new("A");
        let b = Vertex::new("A");

        assert_eq!(a.data(), b.data());
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_vertex_with_id() {
        let a = Vertex::new(1);
        let replaced = Vertex::with_id(a.id(), 2);

        assert_eq!(a, replaced);
        assert_eq!(*replaced.data(), 2);
        assert_eq!(replaced.into_data(), 2);
    }

    #[test]
    fn test_vertex_id_display() {
        assert_eq!(VertexId::new(42).to_string(), "#42");
        assert_eq!(VertexId::from(7).as_u64(), 7);
    }
}
