//! Insertion-ordered collection of the nodes taking part in the simulation.

use crate::error::{Error, Result};
use crate::node::Node;
use std::collections::HashMap;

/// Name → [`Node`] map that remembers insertion order.
///
/// Iteration always follows insertion order, which is what makes "the first
/// node" a stable default entry point for lookups.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a topology of fresh nodes, one per name.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut topology = Self::new();
        for name in names {
            topology.insert(Node::new(name))?;
        }
        Ok(topology)
    }

    /// Adds a node. Names must be unique.
    pub fn insert(&mut self, node: Node) -> Result<()> {
        if self.index.contains_key(node.name()) {
            return Err(Error::DuplicateNode(node.name().to_string()));
        }
        self.index.insert(node.name().to_string(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        match self.index.get(name) {
            Some(&i) => self.nodes.get_mut(i),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node in insertion order.
    pub fn first(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.nodes.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(Node::name)
    }
}

impl<'a> IntoIterator for &'a Topology {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
