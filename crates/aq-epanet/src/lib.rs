//! aq-epanet: bridge to the external EPANET hydraulic engine.
//!
//! The bridge works through two file exchanges per solve:
//! - a section-tagged text input file ([`inp`]), written from a
//!   [`aq_model::Network`];
//! - the engine's binary result file ([`out`]), parsed back into the
//!   network.
//!
//! The engine itself runs as an external process behind the
//! [`runner::EngineRunner`] seam, one provider per supported platform.
//! Each solve happens inside a private scratch directory, so concurrent
//! evaluations never share file paths.

pub mod error;
pub mod inp;
pub mod out;
pub mod runner;
pub mod solver;

pub use error::{BridgeError, BridgeResult};
pub use runner::{classify_exit, EngineCommand, EngineRunner, ExitClass, UnixRunner, WindowsRunner};
pub use solver::EpanetSolver;
