//! 图打印器
//!
//! 以表格列出顶点与边，仅用于诊断显示，不是可解析的格式

use crate::algorithm::PathResult;
use crate::graph::Graph;
use prettytable::{format, Cell, Row, Table};
use std::fmt::Display;

/// 图打印器
pub struct GraphPrinter<'g, T> {
    graph: &'g Graph<T>,
}

impl<'g, T: Display> GraphPrinter<'g, T> {
    pub fn new(graph: &'g Graph<T>) -> Self {
        Self { graph }
    }

    /// 顶点表：ID、载荷、出度
    pub fn format_vertices(&self) -> String {
        let mut table = Self::new_table(&["id", "vertex", "out_degree"]);

        for vertex in self.graph.vertices() {
            let degree = self.graph.out_degree(vertex.id()).unwrap_or(0);
            table.add_row(Row::new(vec![
                Cell::new(&vertex.id().to_string()),
                Cell::new(&vertex.data().to_string()),
                Cell::new(&degree.to_string()),
            ]));
        }

        table.to_string()
    }

    /// 边表：源、目标、权重
    pub fn format_edges(&self) -> String {
        let mut table = Self::new_table(&["source", "destination", "weight"]);

        for edge in self.graph.all_edges() {
            table.add_row(Row::new(vec![
                Cell::new(&self.label(edge.src())),
                Cell::new(&self.label(edge.dst())),
                Cell::new(&edge.weight().to_string()),
            ]));
        }

        table.to_string()
    }

    /// 完整转储
    pub fn dump(&self) -> String {
        format!(
            "Vertices ({}):\n{}\nEdges ({}):\n{}",
            self.graph.vertex_count(),
            self.format_vertices(),
            self.graph.edge_count(),
            self.format_edges()
        )
    }

    /// 路径的单行表示，例如 `A -> C -> D (weight 5)`
    pub fn format_path(&self, path: &PathResult) -> String {
        if path.is_empty() {
            return "(unreachable)".to_string();
        }

        let hops: Vec<String> = path
            .vertices
            .iter()
            .map(|&id| self.label(id))
            .collect();
        format!("{} (weight {})", hops.join(" -> "), path.total_weight)
    }

    fn label(&self, id: crate::graph::VertexId) -> String {
        self.graph
            .data(id)
            .map(ToString::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    fn new_table(titles: &[&str]) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(Row::new(titles.iter().map(|t| Cell::new(t)).collect()));
        table
    }
}
