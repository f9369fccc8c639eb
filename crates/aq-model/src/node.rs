//! Network nodes: junctions (demand nodes) and reservoirs (fixed-head sources).

use crate::error::{ModelError, ModelResult};

/// A demand node with an elevation and a required minimum delivered head.
///
/// `actual_head` is unset until a solve completes; reading it before then
/// is an error, not a default.
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    id: u32,
    /// Elevation above datum, m.
    pub elevation: f64,
    /// Base demand, L/s.
    pub demand: f64,
    /// Minimum required delivered head, m.
    pub pressure_demand: f64,
    actual_head: Option<f64>,
}

impl Junction {
    pub fn new(id: u32, elevation: f64, demand: f64, pressure_demand: f64) -> Self {
        Self {
            id,
            elevation,
            demand,
            pressure_demand,
            actual_head: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Delivered head from the last solve.
    pub fn actual_head(&self) -> ModelResult<f64> {
        self.actual_head
            .ok_or(ModelError::UnsetHead { junction: self.id })
    }

    /// Whether the delivered head satisfies the pressure demand.
    pub fn has_enough_head(&self) -> ModelResult<bool> {
        Ok(self.actual_head()? >= self.pressure_demand)
    }

    /// Record the delivered head. Called by the solver bridge after a solve.
    pub fn set_actual_head(&mut self, head: f64) {
        self.actual_head = Some(head);
    }
}

/// A fixed-head boundary node. Never solved for, never demand-constrained.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservoir {
    id: u32,
    /// Fixed head, m.
    pub head: f64,
}

impl Reservoir {
    pub fn new(id: u32, head: f64) -> Self {
        Self { id, head }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

/// A network node, keyed on an explicit kind tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Junction(Junction),
    Reservoir(Reservoir),
}

impl Node {
    pub fn id(&self) -> u32 {
        match self {
            Node::Junction(j) => j.id(),
            Node::Reservoir(r) => r.id(),
        }
    }

    pub fn is_reservoir(&self) -> bool {
        matches!(self, Node::Reservoir(_))
    }

    pub fn as_junction(&self) -> Option<&Junction> {
        match self {
            Node::Junction(j) => Some(j),
            Node::Reservoir(_) => None,
        }
    }

    pub fn as_junction_mut(&mut self) -> Option<&mut Junction> {
        match self {
            Node::Junction(j) => Some(j),
            Node::Reservoir(_) => None,
        }
    }

    pub fn as_reservoir(&self) -> Option<&Reservoir> {
        match self {
            Node::Reservoir(r) => Some(r),
            Node::Junction(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actual_head_unset_is_an_error() {
        let j = Junction::new(1, 10.0, 5.0, 20.0);
        assert_eq!(j.actual_head(), Err(ModelError::UnsetHead { junction: 1 }));
        assert!(j.has_enough_head().is_err());
    }

    #[test]
    fn has_enough_head_compares_against_demand() {
        let mut j = Junction::new(1, 0.0, 5.0, 20.0);
        j.set_actual_head(25.0);
        assert!(j.has_enough_head().unwrap());
        j.set_actual_head(19.9);
        assert!(!j.has_enough_head().unwrap());
    }

    #[test]
    fn node_kind_dispatch() {
        let j = Node::Junction(Junction::new(2, 0.0, 1.0, 10.0));
        let r = Node::Reservoir(Reservoir::new(1, 50.0));
        assert_eq!(j.id(), 2);
        assert_eq!(r.id(), 1);
        assert!(r.is_reservoir());
        assert!(j.as_junction().is_some());
        assert!(r.as_junction().is_none());
    }
}
