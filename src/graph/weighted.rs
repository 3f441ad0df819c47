//! Symmetric weighted graph with incremental editing
//!
//! Vertices are arbitrary values (tokens, sentences) interned to stable
//! `u32` IDs. Every edge is stored in both endpoints' adjacency maps with the
//! same weight, so the graph is undirected by construction.

use crate::errors::{Result, TextRankError};
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// A vertex slot in the graph
#[derive(Debug, Clone)]
pub struct VertexNode<V> {
    /// The vertex value
    pub vertex: V,
    /// Adjacency map: neighbor ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl<V> VertexNode<V> {
    fn new(vertex: V) -> Self {
        Self {
            vertex,
            edges: FxHashMap::default(),
        }
    }
}

/// An undirected weighted graph supporting vertex and edge removal
///
/// IDs are slot indices and stay valid until their vertex is removed. Slot
/// order is insertion order; a removed vertex that is added again gets a new
/// slot at the end.
#[derive(Debug, Clone)]
pub struct WeightedGraph<V> {
    /// Maps vertex -> slot ID
    vertex_to_id: FxHashMap<V, u32>,
    /// Slot storage, `None` for removed vertices
    slots: Vec<Option<VertexNode<V>>>,
    live: usize,
}

impl<V> Default for WeightedGraph<V>
where
    V: Eq + Hash + Clone + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> WeightedGraph<V>
where
    V: Eq + Hash + Clone + std::fmt::Debug,
{
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            vertex_to_id: FxHashMap::default(),
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Create a graph with pre-allocated capacity
    pub fn with_capacity(vertex_capacity: usize) -> Self {
        Self {
            vertex_to_id: FxHashMap::with_capacity_and_hasher(vertex_capacity, Default::default()),
            slots: Vec::with_capacity(vertex_capacity),
            live: 0,
        }
    }

    /// Insert a vertex if absent, returning its ID either way
    pub fn add_vertex(&mut self, vertex: V) -> u32 {
        if let Some(&id) = self.vertex_to_id.get(&vertex) {
            return id;
        }

        let id = self.slots.len() as u32;
        self.vertex_to_id.insert(vertex.clone(), id);
        self.slots.push(Some(VertexNode::new(vertex)));
        self.live += 1;
        id
    }

    /// Add an undirected edge between two existing vertices
    ///
    /// Insertion is idempotent: if the edge already exists its weight is kept.
    /// Self-loops are ignored.
    pub fn add_edge(&mut self, u: &V, v: &V, weight: f64) -> Result<()> {
        let a = self.require(u)?;
        let b = self.require(v)?;
        self.link(a, b, weight);
        Ok(())
    }

    /// Remove the edge between `u` and `v`, if any
    pub fn remove_edge(&mut self, u: &V, v: &V) {
        if let (Some(a), Some(b)) = (self.id_of(u), self.id_of(v)) {
            self.unlink(a, b);
        }
    }

    /// Remove a vertex together with every edge touching it
    pub fn remove_vertex(&mut self, vertex: &V) {
        let Some(id) = self.vertex_to_id.remove(vertex) else {
            return;
        };

        let neighbors: Vec<u32> = self
            .node(id)
            .map(|n| n.edges.keys().copied().collect())
            .unwrap_or_default();
        for neighbor in neighbors {
            self.unlink(id, neighbor);
        }

        self.slots[id as usize] = None;
        self.live -= 1;
    }

    /// Overwrite the weight of an existing edge; no-op if the edge is absent
    pub fn set_edge_weight(&mut self, u: &V, v: &V, weight: f64) {
        let (Some(a), Some(b)) = (self.id_of(u), self.id_of(v)) else {
            return;
        };
        if !self.has_edge_ids(a, b) {
            return;
        }
        self.set_directed(a, b, weight);
        self.set_directed(b, a, weight);
    }

    /// Idempotent undirected edge insertion by ID
    pub(crate) fn link(&mut self, a: u32, b: u32, weight: f64) {
        if a == b || self.has_edge_ids(a, b) {
            return;
        }
        self.set_directed(a, b, weight);
        self.set_directed(b, a, weight);
    }

    fn unlink(&mut self, a: u32, b: u32) {
        if let Some(node) = self.node_mut(a) {
            node.edges.remove(&b);
        }
        if let Some(node) = self.node_mut(b) {
            node.edges.remove(&a);
        }
    }

    fn set_directed(&mut self, from: u32, to: u32, weight: f64) {
        if let Some(node) = self.node_mut(from) {
            node.edges.insert(to, weight);
        }
    }

    fn has_edge_ids(&self, a: u32, b: u32) -> bool {
        match (self.node(a), self.node(b)) {
            (Some(na), Some(nb)) => na.edges.contains_key(&b) && nb.edges.contains_key(&a),
            _ => false,
        }
    }

    fn require(&self, vertex: &V) -> Result<u32> {
        self.id_of(vertex)
            .ok_or_else(|| TextRankError::unknown_vertex(vertex))
    }

    fn node(&self, id: u32) -> Option<&VertexNode<V>> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: u32) -> Option<&mut VertexNode<V>> {
        self.slots.get_mut(id as usize).and_then(Option::as_mut)
    }

    /// Get the ID of a vertex
    pub fn id_of(&self, vertex: &V) -> Option<u32> {
        self.vertex_to_id.get(vertex).copied()
    }

    /// Get the vertex stored under an ID
    pub fn vertex(&self, id: u32) -> Option<&V> {
        self.node(id).map(|n| &n.vertex)
    }

    /// Check whether a vertex is present
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertex_to_id.contains_key(vertex)
    }

    /// Iterate over live vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.nodes().map(|(_, n)| &n.vertex)
    }

    /// Iterate over live vertex slots in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &VertexNode<V>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (i as u32, n)))
    }

    /// Iterate over the neighbors of a vertex with their edge weights
    ///
    /// Returns `None` if the vertex is absent.
    pub fn neighbors(&self, vertex: &V) -> Option<impl Iterator<Item = (&V, f64)> + '_> {
        let node = self.node(self.id_of(vertex)?)?;
        Some(
            node.edges
                .iter()
                .filter_map(move |(&id, &w)| self.vertex(id).map(|v| (v, w))),
        )
    }

    /// Weight of the edge between `u` and `v`
    pub fn weight(&self, u: &V, v: &V) -> Option<f64> {
        let a = self.id_of(u)?;
        let b = self.id_of(v)?;
        self.node(a)?.edges.get(&b).copied()
    }

    /// Number of neighbors of a vertex
    pub fn degree(&self, vertex: &V) -> Option<usize> {
        self.id_of(vertex)
            .and_then(|id| self.node(id))
            .map(|n| n.edges.len())
    }

    /// Number of live vertices
    pub fn vertex_count(&self) -> usize {
        self.live
    }

    /// Number of undirected edges (each counted once)
    pub fn edge_count(&self) -> usize {
        self.nodes().map(|(_, n)| n.edges.len()).sum::<usize>() / 2
    }

    /// Check if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Check that every edge has a mirror with the same weight
    pub fn is_symmetric(&self) -> bool {
        self.nodes().all(|(id, node)| {
            node.edges.iter().all(|(&other, &w)| {
                self.node(other)
                    .and_then(|n| n.edges.get(&id))
                    .is_some_and(|&back| back == w || (back.is_nan() && w.is_nan()))
            })
        })
    }
}
