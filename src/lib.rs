//! graphwalk - 有向带权图上的 BFS 与 Dijkstra 搜索
//!
//! - 邻接表图容器，顶点以 ID 区分身份
//! - BFS：按层遍历、按边数最短路径
//! - Dijkstra：单源最短距离与最短路径重构
//!
//! `Graph` 本身非线程安全；需要并发读时使用 `SharedGraph`。

pub mod algorithm;
pub mod error;
pub mod graph;
pub mod import;
pub mod logging;
pub mod metrics;
pub mod printer;

// 重导出常用类型
pub use algorithm::{Bfs, Dijkstra, PathResult, Search, ShortestPaths};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, SharedGraph, Vertex, VertexId};
pub use import::{EdgeListImporter, ImportStats};
pub use printer::GraphPrinter;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
