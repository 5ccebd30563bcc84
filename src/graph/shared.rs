//! 共享图
//!
//! 在边界处用读写锁包装 Graph，算法内部不感知锁。

use super::graph::Graph;
use crate::algorithm::{Bfs, Dijkstra};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// 可跨线程共享的图句柄：单写者，多读者
pub struct SharedGraph<T> {
    inner: Arc<RwLock<Graph<T>>>,
}

impl<T> SharedGraph<T> {
    pub fn new(graph: Graph<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// 获取读锁
    pub fn read(&self) -> RwLockReadGuard<'_, Graph<T>> {
        self.inner.read()
    }

    /// 获取写锁
    pub fn write(&self) -> RwLockWriteGuard<'_, Graph<T>> {
        self.inner.write()
    }

    /// 在同一个读锁内运行 BFS
    pub fn with_bfs<R>(&self, f: impl FnOnce(&Bfs<'_, T>) -> R) -> R {
        let guard = self.inner.read();
        f(&Bfs::new(&guard))
    }

    /// 在同一个读锁内运行 Dijkstra
    pub fn with_dijkstra<R>(&self, f: impl FnOnce(&Dijkstra<'_, T>) -> R) -> R {
        let guard = self.inner.read();
        f(&Dijkstra::new(&guard))
    }
}

impl<T> Clone for SharedGraph<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> From<Graph<T>> for SharedGraph<T> {
    fn from(graph: Graph<T>) -> Self {
        Self::new(graph)
    }
}
