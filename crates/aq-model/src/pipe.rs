//! Network pipes with captured endpoint values and solved-only result fields.

use crate::error::{ModelError, ModelResult};
use crate::node::Node;

/// Default diameter for pipes ingested without an explicit value, mm.
pub const DEFAULT_DIAMETER_MM: f64 = 60.0;

/// Default Darcy-Weisbach roughness for ingested pipes, mm.
pub const DEFAULT_ROUGHNESS_MM: f64 = 1.0;

/// A pipe between two nodes.
///
/// The endpoint nodes are values captured at construction time, not live
/// links into any external template, so later mutation of the template
/// cannot corrupt an in-flight trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    id: u32,
    start: Node,
    end: Node,
    /// Length, m.
    length: f64,
    /// Inner diameter, mm.
    diameter: f64,
    /// Darcy-Weisbach roughness, mm.
    roughness: f64,
    discharge: Option<f64>,
    velocity: Option<f64>,
    headloss: Option<f64>,
}

impl Pipe {
    /// Create a pipe, capturing copies of its endpoint nodes.
    ///
    /// Fails on a non-positive length or a negative diameter/roughness.
    pub fn new(
        id: u32,
        start: &Node,
        end: &Node,
        length: f64,
        diameter: f64,
        roughness: f64,
    ) -> ModelResult<Self> {
        if length <= 0.0 {
            return Err(ModelError::NonPositiveLength {
                pipe: id,
                value: length,
            });
        }
        if diameter < 0.0 {
            return Err(ModelError::NegativeValue {
                what: "diameter",
                pipe: id,
                value: diameter,
            });
        }
        if roughness < 0.0 {
            return Err(ModelError::NegativeValue {
                what: "roughness",
                pipe: id,
                value: roughness,
            });
        }
        Ok(Self {
            id,
            start: start.clone(),
            end: end.clone(),
            length,
            diameter,
            roughness,
            discharge: None,
            velocity: None,
            headloss: None,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn start(&self) -> &Node {
        &self.start
    }

    pub fn end(&self) -> &Node {
        &self.end
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn roughness(&self) -> f64 {
        self.roughness
    }

    pub fn set_diameter(&mut self, diameter: f64) -> ModelResult<()> {
        if diameter < 0.0 {
            return Err(ModelError::NegativeValue {
                what: "diameter",
                pipe: self.id,
                value: diameter,
            });
        }
        self.diameter = diameter;
        Ok(())
    }

    /// Flow through the pipe from the last solve, L/s.
    pub fn discharge(&self) -> ModelResult<f64> {
        self.discharge.ok_or(ModelError::UnsetResult {
            what: "discharge",
            pipe: self.id,
        })
    }

    /// Flow velocity from the last solve, m/s.
    pub fn velocity(&self) -> ModelResult<f64> {
        self.velocity.ok_or(ModelError::UnsetResult {
            what: "velocity",
            pipe: self.id,
        })
    }

    /// Friction head loss from the last solve, m.
    pub fn headloss(&self) -> ModelResult<f64> {
        self.headloss.ok_or(ModelError::UnsetResult {
            what: "headloss",
            pipe: self.id,
        })
    }

    /// Record solver outputs. Called by the solver bridge after a solve.
    pub fn set_results(&mut self, discharge: f64, velocity: f64, headloss: f64) {
        self.discharge = Some(discharge);
        self.velocity = Some(velocity);
        self.headloss = Some(headloss);
    }
}
