//! One full engine round trip per trial, in an isolated scratch directory.

use crate::error::{BridgeError, BridgeResult};
use crate::inp;
use crate::out;
use crate::runner::{classify_exit, default_runner, EngineCommand, EngineRunner, ExitClass};
use aq_model::{HydraulicSolver, Network, SolveResult};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

const INP_NAME: &str = "network.inp";
const RPT_NAME: &str = "report.rpt";
const OUT_NAME: &str = "output.out";

/// Solves a network by driving the external engine through its file
/// protocol.
///
/// Every solve gets a fresh `aquanet-<uuid>` scratch directory under the
/// scratch root. The engine communicates through fixed file names, so
/// sharing paths across concurrent invocations would be a correctness
/// hazard; isolation makes population-parallel evaluation safe.
///
/// A failed invocation is returned as-is; there is no retry policy here.
pub struct EpanetSolver {
    runner: Box<dyn EngineRunner>,
    scratch_root: PathBuf,
}

impl EpanetSolver {
    /// Build a solver for the current platform.
    ///
    /// Fails with [`BridgeError::UnsupportedPlatform`] on anything other
    /// than Windows or Unix.
    pub fn new(command: EngineCommand) -> BridgeResult<Self> {
        Ok(Self {
            runner: default_runner(command)?,
            scratch_root: std::env::temp_dir(),
        })
    }

    /// Build a solver over an explicit runner (tests, custom launchers).
    pub fn with_runner(runner: Box<dyn EngineRunner>) -> Self {
        Self {
            runner,
            scratch_root: std::env::temp_dir(),
        }
    }

    pub fn with_scratch_root(mut self, root: PathBuf) -> Self {
        self.scratch_root = root;
        self
    }

    /// Run one solve: serialize, invoke, parse results back into the
    /// network.
    pub fn solve_network(&self, network: &mut Network) -> BridgeResult<()> {
        let scratch = self
            .scratch_root
            .join(format!("aquanet-{}", Uuid::new_v4()));
        fs::create_dir_all(&scratch)?;
        let result = self.solve_in(&scratch, network);
        let _ = fs::remove_dir_all(&scratch);
        result
    }

    fn solve_in(&self, scratch: &std::path::Path, network: &mut Network) -> BridgeResult<()> {
        let inp_path = scratch.join(INP_NAME);
        let rpt_path = scratch.join(RPT_NAME);
        let out_path = scratch.join(OUT_NAME);

        inp::write_inp(network, &inp_path)?;
        let code = self.runner.invoke(&inp_path, &rpt_path, &out_path)?;
        match classify_exit(code) {
            ExitClass::Success => out::read_out(&out_path, network),
            ExitClass::InvalidNetwork => Err(BridgeError::InvalidNetwork),
            ExitClass::Failure(code) => Err(BridgeError::EngineFailure { code }),
        }
    }
}

impl HydraulicSolver for EpanetSolver {
    fn solve(&self, network: &mut Network) -> SolveResult<()> {
        self.solve_network(network).map_err(Into::into)
    }
}
