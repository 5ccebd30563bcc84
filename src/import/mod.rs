//! 数据导入模块
//!
//! 从 CSV 边表构建 `Graph<String>`。表头为 `source,target,weight`；
//! 只有一列的行注册一个孤立顶点。

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// 必须的表头（按此列顺序读取）
const EXPECTED_HEADER: [&str; 3] = ["source", "target", "weight"];

/// 导入统计
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// 边表导入器
///
/// 顶点按名称首次出现时注册，同名即同一顶点。
#[derive(Debug, Default)]
pub struct EdgeListImporter {
    graph: Graph<String>,
    names: HashMap<String, VertexId>,
}

impl EdgeListImporter {
    /// 创建导入器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 CSV 文件导入
    pub fn import_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.import_reader(file)
    }

    /// 从任意 reader 导入；格式错误的行计入 errors 并跳过
    pub fn import_reader<R: Read>(&mut self, reader: R) -> Result<ImportStats> {
        let start = std::time::Instant::now();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?;
        if headers.iter().ne(EXPECTED_HEADER) {
            return Err(Error::ImportError(format!(
                "期望表头 {}，实际 {}",
                EXPECTED_HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut stats = ImportStats::default();

        for (index, record) in reader.records().enumerate() {
            // 表头占第 1 行
            let line = index + 2;
            let record = match record {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!(line, error = %e, "skipping unreadable row");
                    stats.errors += 1;
                    continue;
                }
            };

            match self.import_record(&record, &mut stats) {
                Ok(()) => {}
                Err(e) => {
                    warn!(line, error = %e, "skipping row");
                    stats.errors += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            errors = stats.errors,
            "edge list imported"
        );
        Ok(stats)
    }

    /// 解析并导入单行
    fn import_record(&mut self, record: &StringRecord, stats: &mut ImportStats) -> Result<()> {
        match record.len() {
            1 => {
                let name = Self::name_field(record, 0)?;
                self.vertex_for(name, stats);
                Ok(())
            }
            3 => {
                let source = Self::name_field(record, 0)?;
                let target = Self::name_field(record, 1)?;
                let raw = record.get(2).unwrap_or_default();
                let weight: f64 = raw
                    .parse()
                    .map_err(|_| Error::ImportError(format!("无法解析权重: {:?}", raw)))?;
                if weight.is_nan() || weight < 0.0 {
                    return Err(Error::InvalidWeight(weight));
                }

                let src = self.vertex_for(source, stats);
                let dst = self.vertex_for(target, stats);
                self.graph.add_edge(src, dst, weight)?;
                stats.edges_imported += 1;
                Ok(())
            }
            n => Err(Error::ImportError(format!("期望 1 或 3 列，实际 {} 列", n))),
        }
    }

    fn name_field(record: &StringRecord, index: usize) -> Result<&str> {
        match record.get(index) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(Error::ImportError(format!("第 {} 列顶点名称为空", index + 1))),
        }
    }

    fn vertex_for(&mut self, name: &str, stats: &mut ImportStats) -> VertexId {
        if let Some(&id) = self.names.get(name) {
            return id;
        }
        let id = self.graph.insert(name.to_string());
        self.names.insert(name.to_string(), id);
        stats.vertices_imported += 1;
        id
    }

    /// 按名称查找顶点
    pub fn lookup(&self, name: &str) -> Option<VertexId> {
        self.names.get(name).copied()
    }

    /// 获取图引用
    pub fn graph(&self) -> &Graph<String> {
        &self.graph
    }

    /// 取出图和名称表
    pub fn finish(self) -> (Graph<String>, HashMap<String, VertexId>) {
        (self.graph, self.names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Dijkstra;
    use std::io::Write;

    const SAMPLE: &str = "source,target,weight
A,B,5
A,C,2
B,D,1
C,D,3
C,E,4
D,E,6
";

    #[test]
    fn test_import_reader() {
        let mut importer = EdgeListImporter::new();
        let stats = importer.import_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(stats.vertices_imported, 5);
        assert_eq!(stats.edges_imported, 6);
        assert_eq!(stats.errors, 0);

        let a = importer.lookup("A").unwrap();
        let e = importer.lookup("E").unwrap();
        let graph = importer.graph();
        let names: Vec<_> = graph.vertices().map(|v| v.data().as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);

        let distances = Dijkstra::new(graph).shortest_distances(a).unwrap();
        assert_eq!(distances[&e], 6.0);
    }

    #[test]
    fn test_import_skips_bad_rows() {
        let csv = "source,target,weight
A,B,1
A,B
A,C,abc
A,D,-2
 ,B,1
Z
B,C,2.5
";
        let mut importer = EdgeListImporter::new();
        let stats = importer.import_reader(csv.as_bytes()).unwrap();

        assert_eq!(stats.edges_imported, 2);
        assert_eq!(stats.errors, 4);
        // 被拒绝的行不注册顶点
        assert!(importer.lookup("D").is_none());
        assert!(importer.lookup("Z").is_some());

        let (graph, names) = importer.finish();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.out_degree(names["Z"]).unwrap(), 0);
    }

    #[test]
    fn test_import_rejects_missing_header() {
        let mut importer = EdgeListImporter::new();

        let err = importer.import_reader("A,B,5\nB,C,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::ImportError(_)));
        assert!(importer.lookup("A").is_none());
        assert!(importer.lookup("B").is_none());
        assert_eq!(importer.graph().vertex_count(), 0);
    }

    #[test]
    fn test_import_rejects_reordered_header() {
        let mut importer = EdgeListImporter::new();

        let err = importer
            .import_reader("weight,source,target\n5,A,B\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, Error::ImportError(msg) if msg.contains("weight,source,target")));
        assert_eq!(importer.graph().edge_count(), 0);
    }

    #[test]
    fn test_import_accepts_padded_header() {
        let mut importer = EdgeListImporter::new();
        let stats = importer
            .import_reader(" source , target , weight \nA,B,5\n".as_bytes())
            .unwrap();

        assert_eq!(stats.edges_imported, 1);
        assert!(importer.lookup("A").is_some());
    }

    #[test]
    fn test_import_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        drop(file);

        let mut importer = EdgeListImporter::new();
        let stats = importer.import_csv(&path).unwrap();
        assert_eq!(stats.edges_imported, 6);
        assert_eq!(importer.graph().edge_count(), 6);
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut importer = EdgeListImporter::new();

        let err = importer.import_csv(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
