//! Binary result-file reader.
//!
//! Layout (little-endian f32 throughout the dynamic block):
//!
//! ```text
//! prolog               884 bytes
//! node metadata        36 bytes per node
//! link metadata        52 bytes per link
//! trailer              12 bytes
//! dynamic results      16*N + 32*L bytes, quantity-major:
//!     demand[N] head[N] pressure[N] quality[N]
//!     discharge[L] velocity[L] headloss[L] (+5 unused link arrays)
//! ```
//!
//! The reader validates the file length against the serialized node/link
//! counts before indexing; a short file is a corruption fault, never an
//! out-of-bounds read or a silent skip.

use crate::error::{BridgeError, BridgeResult};
use aq_model::Network;
use std::fs;
use std::path::Path;

const PROLOG_BYTES: usize = 884;
const NODE_META_BYTES: usize = 36;
const LINK_META_BYTES: usize = 52;
const TRAILER_BYTES: usize = 12;
const NODE_RESULT_FLOATS: usize = 4;
const LINK_RESULT_FLOATS: usize = 8;

/// Byte offset of the dynamic results block.
pub fn dynamic_offset(nodes: usize, links: usize) -> usize {
    PROLOG_BYTES + NODE_META_BYTES * nodes + LINK_META_BYTES * links + TRAILER_BYTES
}

/// Length of the dynamic results block in bytes.
pub fn dynamic_len(nodes: usize, links: usize) -> usize {
    4 * (NODE_RESULT_FLOATS * nodes + LINK_RESULT_FLOATS * links)
}

#[inline]
fn f32_at(block: &[u8], float_index: usize) -> f64 {
    let at = float_index * 4;
    let raw = [block[at], block[at + 1], block[at + 2], block[at + 3]];
    f32::from_le_bytes(raw) as f64
}

/// Parse the dynamic results block into the network the file was produced
/// from.
///
/// Junction `actual_head` is taken from the pressure array; reservoirs
/// have no demand-side pressure semantics and are skipped. Pipe
/// discharge/velocity/headloss come from the first three link arrays.
pub fn parse_results(bytes: &[u8], network: &mut Network) -> BridgeResult<()> {
    let n = network.node_count();
    let l = network.pipe_count();
    let offset = dynamic_offset(n, l);
    let expected = offset + dynamic_len(n, l);
    if bytes.len() < expected {
        return Err(BridgeError::TruncatedOutput {
            expected,
            actual: bytes.len(),
        });
    }
    let block = &bytes[offset..expected];

    let junction_indices: Vec<usize> = network
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| !node.is_reservoir())
        .map(|(i, _)| i)
        .collect();
    for i in junction_indices {
        let head = f32_at(block, 2 * n + i);
        network.set_actual_head_at(i, head)?;
    }
    for i in 0..l {
        let discharge = f32_at(block, 4 * n + i);
        let velocity = f32_at(block, 4 * n + l + i);
        let headloss = f32_at(block, 4 * n + 2 * l + i);
        network.set_pipe_results_at(i, discharge, velocity, headloss)?;
    }
    Ok(())
}

/// Read and parse the engine's result file.
pub fn read_out(path: &Path, network: &mut Network) -> BridgeResult<()> {
    let bytes = fs::read(path)?;
    parse_results(&bytes, network)
}

#[cfg(test)]
pub(crate) fn craft_out_file(
    nodes: usize,
    links: usize,
    pressures: &[f32],
    discharges: &[f32],
    velocities: &[f32],
    headlosses: &[f32],
) -> Vec<u8> {
    let offset = dynamic_offset(nodes, links);
    let mut bytes = vec![0_u8; offset + dynamic_len(nodes, links)];
    let mut put = |float_index: usize, v: f32| {
        let at = offset + float_index * 4;
        bytes[at..at + 4].copy_from_slice(&v.to_le_bytes());
    };
    for (i, &p) in pressures.iter().enumerate() {
        put(2 * nodes + i, p);
    }
    for (i, &q) in discharges.iter().enumerate() {
        put(4 * nodes + i, q);
    }
    for (i, &v) in velocities.iter().enumerate() {
        put(4 * nodes + links + i, v);
    }
    for (i, &h) in headlosses.iter().enumerate() {
        put(4 * nodes + 2 * links + i, h);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_model::{Junction, Node, Pipe, Reservoir};

    fn network() -> Network {
        let r = Node::Reservoir(Reservoir::new(1, 50.0));
        let j2 = Node::Junction(Junction::new(2, 0.0, 10.0, 20.0));
        let j3 = Node::Junction(Junction::new(3, 5.0, 4.0, 15.0));
        let pipes = vec![
            Pipe::new(1, &r, &j2, 100.0, 110.2, 1.0).unwrap(),
            Pipe::new(2, &j2, &j3, 200.0, 79.2, 1.0).unwrap(),
        ];
        Network::new(vec![r, j2, j3], pipes).unwrap()
    }

    #[test]
    fn offsets_match_layout_arithmetic() {
        assert_eq!(dynamic_offset(3, 2), 884 + 36 * 3 + 52 * 2 + 12);
        assert_eq!(dynamic_len(3, 2), 16 * 3 + 32 * 2);
    }

    #[test]
    fn round_trip_recovers_known_values() {
        let mut net = network();
        // pressure array is indexed by node position; reservoir slot unused
        let bytes = craft_out_file(
            3,
            2,
            &[0.0, 31.5, 24.25],
            &[10.0, 4.5],
            &[1.25, 0.75],
            &[2.5, 1.125],
        );
        parse_results(&bytes, &mut net).unwrap();

        let junctions: Vec<_> = net.junctions().collect();
        assert_eq!(junctions[0].actual_head().unwrap(), 31.5);
        assert_eq!(junctions[1].actual_head().unwrap(), 24.25);
        assert_eq!(net.pipes()[0].discharge().unwrap(), 10.0);
        assert_eq!(net.pipes()[0].velocity().unwrap(), 1.25);
        assert_eq!(net.pipes()[0].headloss().unwrap(), 2.5);
        assert_eq!(net.pipes()[1].discharge().unwrap(), 4.5);
        assert_eq!(net.pipes()[1].velocity().unwrap(), 0.75);
        assert_eq!(net.pipes()[1].headloss().unwrap(), 1.125);
    }

    #[test]
    fn reservoirs_are_skipped() {
        let mut net = network();
        let bytes = craft_out_file(3, 2, &[99.0, 1.0, 2.0], &[0.0; 2], &[0.0; 2], &[0.0; 2]);
        parse_results(&bytes, &mut net).unwrap();
        // The reservoir slot value never lands anywhere.
        assert!(net.nodes()[0].as_reservoir().is_some());
    }

    #[test]
    fn short_file_is_a_corruption_fault() {
        let mut net = network();
        let full = craft_out_file(3, 2, &[0.0; 3], &[0.0; 2], &[0.0; 2], &[0.0; 2]);
        let expected = full.len();
        let truncated = &full[..full.len() - 5];
        let err = parse_results(truncated, &mut net).unwrap_err();
        match err {
            BridgeError::TruncatedOutput {
                expected: e,
                actual,
            } => {
                assert_eq!(e, expected);
                assert_eq!(actual, expected - 5);
            }
            other => panic!("expected TruncatedOutput, got {other:?}"),
        }
        // Nothing was populated.
        assert!(net.pipes()[0].discharge().is_err());
    }

    #[test]
    fn count_mismatch_is_detected_by_length_check() {
        // File written for a smaller network than the one parsed against.
        let mut net = network();
        let bytes = craft_out_file(2, 1, &[0.0; 2], &[0.0], &[0.0], &[0.0]);
        assert!(matches!(
            parse_results(&bytes, &mut net),
            Err(BridgeError::TruncatedOutput { .. })
        ));
    }
}
