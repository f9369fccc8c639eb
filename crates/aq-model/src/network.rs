//! The network: a validated, privately owned collection of nodes and pipes.

use crate::error::{ModelError, ModelResult};
use crate::node::Node;
use crate::pipe::Pipe;

/// Immutable template data ingested once at startup.
///
/// Shared by reference across trials; every [`Network`] constructed from it
/// owns private deep copies, so no trial can corrupt another.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkTemplate {
    nodes: Vec<Node>,
    pipes: Vec<Pipe>,
}

impl NetworkTemplate {
    pub fn new(nodes: Vec<Node>, pipes: Vec<Pipe>) -> Self {
        Self { nodes, pipes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }
}

/// A water-distribution network for one trial.
///
/// Nodes and pipes are stored in ascending-id order. The network owns deep
/// copies of everything it was constructed with; it never aliases
/// caller-held objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    nodes: Vec<Node>,
    pipes: Vec<Pipe>,
}

impl Network {
    /// Build a network from template data.
    ///
    /// Deep-copies the template, sorts nodes and pipes by ascending id and
    /// validates ids are unique. Negative diameters or roughness are
    /// rejected at [`Pipe`] construction; re-checked here for pipes built
    /// elsewhere.
    pub fn from_template(template: &NetworkTemplate) -> ModelResult<Self> {
        Self::new(template.nodes().to_vec(), template.pipes().to_vec())
    }

    pub fn new(mut nodes: Vec<Node>, mut pipes: Vec<Pipe>) -> ModelResult<Self> {
        nodes.sort_by_key(|n| n.id());
        pipes.sort_by_key(|p| p.id());

        for pair in nodes.windows(2) {
            if pair[0].id() == pair[1].id() {
                return Err(ModelError::DuplicateId {
                    what: "node",
                    id: pair[0].id(),
                });
            }
        }
        for pair in pipes.windows(2) {
            if pair[0].id() == pair[1].id() {
                return Err(ModelError::DuplicateId {
                    what: "pipe",
                    id: pair[0].id(),
                });
            }
        }
        for pipe in &pipes {
            if pipe.diameter() < 0.0 {
                return Err(ModelError::NegativeValue {
                    what: "diameter",
                    pipe: pipe.id(),
                    value: pipe.diameter(),
                });
            }
            if pipe.roughness() < 0.0 {
                return Err(ModelError::NegativeValue {
                    what: "roughness",
                    pipe: pipe.id(),
                    value: pipe.roughness(),
                });
            }
        }

        Ok(Self { nodes, pipes })
    }

    /// Nodes in ascending-id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Pipes in ascending-id order.
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn pipe_count(&self) -> usize {
        self.pipes.len()
    }

    pub fn junction_count(&self) -> usize {
        self.junctions().count()
    }

    /// Assign diameters positionally: `values[i]` goes to the i-th pipe in
    /// stored order. No reordering, no id lookup.
    pub fn set_pipe_diameters(&mut self, values: &[f64]) -> ModelResult<()> {
        if values.len() != self.pipes.len() {
            return Err(ModelError::DiameterCount {
                expected: self.pipes.len(),
                actual: values.len(),
            });
        }
        for (pipe, &d) in self.pipes.iter_mut().zip(values) {
            pipe.set_diameter(d)?;
        }
        Ok(())
    }

    /// Record the delivered head of the node at `index`.
    ///
    /// Used by the solver bridge; fails if the node is a reservoir.
    pub fn set_actual_head_at(&mut self, index: usize, head: f64) -> ModelResult<()> {
        let len = self.nodes.len();
        let node = self.nodes.get_mut(index).ok_or(ModelError::IndexOob {
            what: "node",
            index,
            len,
        })?;
        let id = node.id();
        node.as_junction_mut()
            .ok_or(ModelError::NotAJunction { id })?
            .set_actual_head(head);
        Ok(())
    }

    /// Record solver outputs for the pipe at `index`.
    pub fn set_pipe_results_at(
        &mut self,
        index: usize,
        discharge: f64,
        velocity: f64,
        headloss: f64,
    ) -> ModelResult<()> {
        let len = self.pipes.len();
        let pipe = self.pipes.get_mut(index).ok_or(ModelError::IndexOob {
            what: "pipe",
            index,
            len,
        })?;
        pipe.set_results(discharge, velocity, headloss);
        Ok(())
    }

    /// Junctions in stored order (reservoirs filtered out).
    pub fn junctions(&self) -> impl Iterator<Item = &crate::node::Junction> {
        self.nodes.iter().filter_map(|n| n.as_junction())
    }
}
