//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR is optimized for iteration over neighbors, which is exactly what
//! rank propagation needs during every sweep.

use super::weighted::WeightedGraph;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// A graph in Compressed Sparse Row format
///
/// Node indices are dense (`0..num_nodes`) and follow the insertion order of
/// the source [`WeightedGraph`]; removed vertices leave no gaps.
#[derive(Debug, Clone)]
pub struct CsrGraph<V> {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each edge
    pub col_idx: Vec<u32>,
    /// Edge weights
    pub weights: Vec<f64>,
    /// Neighbor count for each node
    pub out_degree: Vec<u32>,
    /// Vertex values for each node
    pub vertices: Vec<V>,
}

impl<V> CsrGraph<V>
where
    V: Eq + Hash + Clone + std::fmt::Debug,
{
    /// Convert a [`WeightedGraph`] into CSR format
    pub fn from_graph(graph: &WeightedGraph<V>) -> Self {
        let num_nodes = graph.vertex_count();

        // Slot IDs may have gaps after removals; compact them
        let dense: FxHashMap<u32, u32> = graph
            .nodes()
            .enumerate()
            .map(|(i, (id, _))| (id, i as u32))
            .collect();

        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        let mut out_degree = Vec::with_capacity(num_nodes);
        let mut vertices = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for (_, node) in graph.nodes() {
            vertices.push(node.vertex.clone());

            // Sort edges for deterministic iteration
            let mut edges: Vec<_> = node
                .edges
                .iter()
                .filter_map(|(k, &w)| dense.get(k).map(|&d| (d, w)))
                .collect();
            edges.sort_by_key(|(k, _)| *k);

            out_degree.push(edges.len() as u32);

            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }

            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            out_degree,
            vertices,
        }
    }
}

impl<V> CsrGraph<V> {
    /// Iterate over neighbors of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Get the neighbor count of a node
    pub fn degree(&self, node: u32) -> u32 {
        self.out_degree[node as usize]
    }

    /// Get the vertex value for a node
    pub fn vertex(&self, node: u32) -> &V {
        &self.vertices[node as usize]
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Get the total number of edges (counting each undirected edge twice)
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Nodes with no neighbors
    pub fn isolated_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.out_degree[n as usize] == 0)
            .collect()
    }
}

impl<V> Default for CsrGraph<V> {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            out_degree: Vec::new(),
            vertices: Vec::new(),
        }
    }
}
