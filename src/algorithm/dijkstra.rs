//! Dijkstra 最短路径
//!
//! 二叉堆作为优先前沿，采用惰性删除：同一顶点可能在堆中留有多个过期条目，
//! 出堆时若其距离大于当前记录的最优距离则直接丢弃。复杂度 O((V+E) log V)。
//!
//! 只支持非负权重，Graph::add_edge 已拒绝负权重。

use super::{walk_back, PathResult, Search};
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::metrics::global_metrics;
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use tracing::{debug, trace};

/// 前沿条目
///
/// BinaryHeap 是最大堆，这里反转比较使距离最小者先出堆；距离相同时先入堆者先出。
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    distance: f64,
    seq: u64,
    vertex: VertexId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// 单源最短路径结果
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPaths {
    source: VertexId,
    /// 每个已注册顶点的最短距离（按注册顺序），不可达为正无穷
    distances: IndexMap<VertexId, f64>,
    /// 取得最优距离时的前驱
    predecessors: HashMap<VertexId, VertexId>,
}

impl ShortestPaths {
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// 顶点的最短距离；未注册的顶点返回 None
    pub fn distance(&self, vertex: VertexId) -> Option<f64> {
        self.distances.get(&vertex).copied()
    }

    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.distance(vertex).is_some_and(f64::is_finite)
    }

    pub fn distances(&self) -> &IndexMap<VertexId, f64> {
        &self.distances
    }

    pub fn into_distances(self) -> IndexMap<VertexId, f64> {
        self.distances
    }

    /// 沿前驱回溯出到 dst 的最短路径
    pub fn path_to(&self, dst: VertexId) -> PathResult {
        match self.distance(dst) {
            Some(total_weight) if total_weight.is_finite() => PathResult {
                vertices: walk_back(self.source, dst, |v| self.predecessors.get(&v).copied()),
                total_weight,
            },
            _ => PathResult::unreachable(),
        }
    }
}

/// Dijkstra 搜索引擎
pub struct Dijkstra<'g, T> {
    graph: &'g Graph<T>,
}

impl<'g, T> Dijkstra<'g, T> {
    /// 绑定到一张图
    pub fn new(graph: &'g Graph<T>) -> Self {
        Self { graph }
    }

    /// 完整的单源最短路径计算
    pub fn solve(&self, start: VertexId) -> Result<ShortestPaths> {
        self.run(start, None)
    }

    /// 从 start 到每个已注册顶点的最短距离，不可达为正无穷
    pub fn shortest_distances(&self, start: VertexId) -> Result<IndexMap<VertexId, f64>> {
        Ok(self.solve(start)?.into_distances())
    }

    /// 加权最短路径；dst 一旦确定即停止搜索
    pub fn find_path(&self, start: VertexId, dst: VertexId) -> Result<PathResult> {
        if !self.graph.contains(dst) {
            return Err(Error::VertexNotFound(dst));
        }
        Ok(self.run(start, Some(dst))?.path_to(dst))
    }

    fn run(&self, start: VertexId, target: Option<VertexId>) -> Result<ShortestPaths> {
        if !self.graph.contains(start) {
            return Err(Error::VertexNotFound(start));
        }

        let mut distances: IndexMap<VertexId, f64> = self
            .graph
            .vertex_ids()
            .into_iter()
            .map(|id| (id, f64::INFINITY))
            .collect();
        let mut predecessors = HashMap::new();
        let mut frontier = BinaryHeap::new();
        let mut seq = 0u64;

        let mut settled = 0usize;
        let mut edges_scanned = 0usize;
        let mut stale = 0usize;

        distances.insert(start, 0.0);
        frontier.push(FrontierEntry {
            distance: 0.0,
            seq,
            vertex: start,
        });

        while let Some(FrontierEntry {
            distance, vertex, ..
        }) = frontier.pop()
        {
            let best = distances.get(&vertex).copied().unwrap_or(f64::INFINITY);
            if distance > best {
                stale += 1;
                trace!(vertex = %vertex, distance, best, "stale frontier entry skipped");
                continue;
            }

            settled += 1;
            if target == Some(vertex) {
                break;
            }

            for edge in self.graph.edges_of(vertex)? {
                edges_scanned += 1;
                let neighbor = edge.dst();
                let candidate = distance + edge.weight();
                let current = distances.get(&neighbor).copied().unwrap_or(f64::INFINITY);

                if candidate < current {
                    distances.insert(neighbor, candidate);
                    predecessors.insert(neighbor, vertex);
                    seq += 1;
                    frontier.push(FrontierEntry {
                        distance: candidate,
                        seq,
                        vertex: neighbor,
                    });
                }
            }
        }

        global_metrics().record_dijkstra(settled, edges_scanned, stale);
        debug!(start = %start, settled, edges_scanned, stale, "dijkstra finished");

        Ok(ShortestPaths {
            source: start,
            distances,
            predecessors,
        })
    }
}

impl<T> Search<T> for Dijkstra<'_, T> {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn find_path(&self, src: VertexId, dst: VertexId) -> Result<PathResult> {
        Dijkstra::find_path(self, src, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Vertex;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    /// A..E 示例图
    ///
    /// A->B(5) A->C(2) B->D(1) C->D(3) C->E(4) D->E(6)
    fn create_test_graph() -> (Graph<&'static str>, Vec<VertexId>) {
        let mut graph = Graph::new();
        let ids: Vec<_> = ["A", "B", "C", "D", "E"]
            .into_iter()
            .map(|name| graph.insert(name))
            .collect();
        let (a, b, c, d, e) = (ids[0], ids[1], ids[2], ids[3], ids[4]);

        graph.add_edge(a, b, 5.0).unwrap();
        graph.add_edge(a, c, 2.0).unwrap();
        graph.add_edge(b, d, 1.0).unwrap();
        graph.add_edge(c, d, 3.0).unwrap();
        graph.add_edge(c, e, 4.0).unwrap();
        graph.add_edge(d, e, 6.0).unwrap();

        (graph, ids)
    }

    fn random_graph(rng: &mut StdRng, n: usize, edges: usize) -> (Graph<usize>, Vec<VertexId>) {
        let mut graph = Graph::new();
        let ids: Vec<_> = (0..n).map(|i| graph.insert(i)).collect();
        for _ in 0..edges {
            let src = ids[rng.gen_range(0..n)];
            let dst = ids[rng.gen_range(0..n)];
            let weight = f64::from(rng.gen_range(0u32..20)) / 2.0;
            graph.add_edge(src, dst, weight).unwrap();
        }
        (graph, ids)
    }

    /// 枚举所有简单路径，求 start 到每个顶点的最小权重
    fn brute_force<T>(graph: &Graph<T>, start: VertexId) -> HashMap<VertexId, f64> {
        fn dfs<T>(
            graph: &Graph<T>,
            current: VertexId,
            weight: f64,
            on_path: &mut HashSet<VertexId>,
            best: &mut HashMap<VertexId, f64>,
        ) {
            let entry = best.entry(current).or_insert(f64::INFINITY);
            if weight < *entry {
                *entry = weight;
            }
            for edge in graph.edges_of(current).unwrap() {
                if on_path.insert(edge.dst()) {
                    dfs(graph, edge.dst(), weight + edge.weight(), on_path, best);
                    on_path.remove(&edge.dst());
                }
            }
        }

        let mut best = HashMap::new();
        let mut on_path = HashSet::from([start]);
        dfs(graph, start, 0.0, &mut on_path, &mut best);
        best
    }

    #[test]
    fn test_shortest_distances() {
        let (graph, ids) = create_test_graph();
        let distances = Dijkstra::new(&graph).shortest_distances(ids[0]).unwrap();

        let values: Vec<_> = ids.iter().map(|id| distances[id]).collect();
        assert_eq!(values, vec![0.0, 5.0, 2.0, 5.0, 6.0]);
        // 按注册顺序
        assert_eq!(distances.keys().copied().collect::<Vec<_>>(), ids);
    }

    #[test]
    fn test_unreachable_is_infinite() {
        let (graph, ids) = create_test_graph();
        let dijkstra = Dijkstra::new(&graph);

        let distances = dijkstra.shortest_distances(ids[3]).unwrap();
        assert_eq!(distances[&ids[3]], 0.0);
        assert_eq!(distances[&ids[4]], 6.0);
        for id in &ids[..3] {
            assert_eq!(distances[id], f64::INFINITY);
        }

        let paths = dijkstra.solve(ids[3]).unwrap();
        assert!(!paths.is_reachable(ids[0]));
        assert!(paths.is_reachable(ids[4]));
        assert!(paths.path_to(ids[0]).is_empty());
    }

    #[test]
    fn test_find_path() {
        let (graph, ids) = create_test_graph();
        let dijkstra = Dijkstra::new(&graph);

        let path = dijkstra.find_path(ids[0], ids[3]).unwrap();
        assert_eq!(path.payloads(&graph), vec![&"A", &"C", &"D"]);
        assert_eq!(path.total_weight, 5.0);

        let path = dijkstra.find_path(ids[0], ids[4]).unwrap();
        assert_eq!(path.payloads(&graph), vec![&"A", &"C", &"E"]);
        assert_eq!(path.total_weight, 6.0);

        let path = dijkstra.find_path(ids[0], ids[0]).unwrap();
        assert_eq!(path.vertices, vec![ids[0]]);
        assert_eq!(path.total_weight, 0.0);

        assert!(dijkstra.find_path(ids[4], ids[0]).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_vertex() {
        let (graph, ids) = create_test_graph();
        let dijkstra = Dijkstra::new(&graph);
        let outsider = Vertex::new("X").id();

        assert!(matches!(
            dijkstra.shortest_distances(outsider),
            Err(Error::VertexNotFound(id)) if id == outsider
        ));
        assert!(dijkstra.find_path(ids[0], outsider).is_err());
        assert!(dijkstra.find_path(outsider, ids[0]).is_err());
    }

    #[test]
    fn test_stale_entries_are_skipped() {
        let mut graph = Graph::new();
        let a = graph.insert("A");
        let b = graph.insert("B");
        let c = graph.insert("C");

        // B 先以 10 入堆，之后经 C 被改进为 2
        graph.add_edge(a, b, 10.0).unwrap();
        graph.add_edge(a, c, 1.0).unwrap();
        graph.add_edge(c, b, 1.0).unwrap();

        let paths = Dijkstra::new(&graph).solve(a).unwrap();
        assert_eq!(paths.distance(b), Some(2.0));
        assert_eq!(paths.path_to(b).vertices, vec![a, c, b]);
        assert!(global_metrics().snapshot().stale_entries_skipped >= 1);
    }

    #[test]
    fn test_equal_cost_tie_break() {
        let mut graph = Graph::new();
        let a = graph.insert("A");
        let b = graph.insert("B");
        let c = graph.insert("C");
        let d = graph.insert("D");

        graph.add_edge(a, b, 1.0).unwrap();
        graph.add_edge(a, c, 1.0).unwrap();
        graph.add_edge(c, d, 1.0).unwrap();
        graph.add_edge(b, d, 1.0).unwrap();

        let path = Dijkstra::new(&graph).find_path(a, d).unwrap();
        assert_eq!(path.vertices, vec![a, b, d]);
        assert_eq!(path.total_weight, 2.0);
    }

    #[test]
    fn test_zero_and_infinite_weights() {
        let mut graph = Graph::new();
        let a = graph.insert("A");
        let b = graph.insert("B");
        let c = graph.insert("C");

        graph.add_edge(a, b, 0.0).unwrap();
        graph.add_edge(b, b, 0.0).unwrap();
        graph.add_edge(b, c, f64::INFINITY).unwrap();

        let paths = Dijkstra::new(&graph).solve(a).unwrap();
        assert_eq!(paths.distance(b), Some(0.0));
        assert_eq!(paths.distance(c), Some(f64::INFINITY));
        assert!(paths.path_to(c).is_empty());
    }

    #[test]
    fn test_random_graphs_against_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..40 {
            let (graph, ids) = random_graph(&mut rng, 7, 14);
            let dijkstra = Dijkstra::new(&graph);

            for &start in &ids {
                let distances = dijkstra.shortest_distances(start).unwrap();
                let full = dijkstra.solve(start).unwrap();
                let expected = brute_force(&graph, start);

                assert_eq!(distances[&start], 0.0);
                for &v in &ids {
                    let want = expected.get(&v).copied().unwrap_or(f64::INFINITY);
                    let got = distances[&v];
                    if want.is_infinite() {
                        assert_eq!(got, f64::INFINITY);
                    } else {
                        assert!((got - want).abs() < 1e-9, "{got} != {want}");
                    }

                    let path = dijkstra.find_path(start, v).unwrap();
                    if got.is_infinite() {
                        assert!(path.is_empty());
                        continue;
                    }
                    assert_eq!(path.source(), Some(start));
                    assert_eq!(path.target(), Some(v));
                    assert_eq!(path.total_weight, got);
                    // 提前终止与完整求解得到同一条路径
                    assert_eq!(path.vertices, full.path_to(v).vertices);
                    let walked = graph.path_weight(&path.vertices).unwrap();
                    assert!((walked - got).abs() < 1e-9);
                }
            }
        }
    }
}
