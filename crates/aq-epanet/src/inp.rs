//! INP serialization: the engine's section-tagged text input grammar.
//!
//! Section keywords, field order and the options block are a strict
//! compatibility surface with the engine version in use, not a style
//! choice. Do not reorder.

use crate::error::BridgeResult;
use aq_model::Network;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Render a network as INP text.
pub fn render_inp(network: &Network) -> String {
    let mut s = String::new();

    s.push_str("[TITLE]\n\n\n");

    s.push_str("[JUNCTIONS]\n");
    s.push_str(";ID\tElev\tDemand\tPattern\n");
    for junction in network.junctions() {
        let _ = writeln!(
            s,
            " {}\t{}\t{}\t\t;",
            junction.id(),
            junction.elevation,
            junction.demand
        );
    }
    s.push('\n');

    s.push_str("[RESERVOIRS]\n");
    s.push_str(";ID\tHead\tPattern\n");
    for node in network.nodes() {
        if let Some(reservoir) = node.as_reservoir() {
            let _ = writeln!(s, " {}\t{}\t\t;", reservoir.id(), reservoir.head);
        }
    }
    s.push('\n');

    s.push_str("[PIPES]\n");
    s.push_str(";ID\tNode1\tNode2\tLength\tDiameter\tRoughness\tMinorLoss\tStatus\n");
    for pipe in network.pipes() {
        let _ = writeln!(
            s,
            " {}\t{}\t{}\t{}\t{}\t{}\t0\tOpen\t;",
            pipe.id(),
            pipe.start().id(),
            pipe.end().id(),
            pipe.length(),
            pipe.diameter(),
            pipe.roughness()
        );
    }
    s.push('\n');

    s.push_str("[REPORT]\n");
    s.push_str(" Status\tYES\n");
    s.push_str(" Summary\tNO\n");
    s.push_str(" Page\t0\n");
    s.push_str(" NODES\tALL\n");
    s.push_str(" LINKS\tALL\n");
    s.push('\n');

    s.push_str("[OPTIONS]\n");
    s.push_str(" Units\tLPS\n");
    s.push_str(" Headloss\tD-W\n");
    s.push_str(" Specific Gravity\t1\n");
    s.push_str(" Viscosity\t1\n");
    s.push_str(" Trials\t40\n");
    s.push_str(" Accuracy\t0.001\n");
    s.push_str(" CHECKFREQ\t2\n");
    s.push_str(" MAXCHECK\t10\n");
    s.push_str(" DAMPLIMIT\t0\n");
    s.push_str(" Unbalanced\tContinue 10\n");
    s.push_str(" Pattern\t1\n");
    s.push_str(" Demand Multiplier\t1.0\n");
    s.push_str(" Emitter Exponent\t0.5\n");
    s.push_str(" Quality\tNone mg/L\n");
    s.push_str(" Diffusivity\t1\n");
    s.push_str(" Tolerance\t0.01\n");
    s.push_str("\n[END]\n");

    s
}

/// Write the INP file for a network.
pub fn write_inp(network: &Network, path: &Path) -> BridgeResult<()> {
    fs::write(path, render_inp(network))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_model::{Junction, Node, Pipe, Reservoir};

    fn network() -> Network {
        let r = Node::Reservoir(Reservoir::new(1, 50.0));
        let j = Node::Junction(Junction::new(2, 0.0, 10.0, 20.0));
        let pipe = Pipe::new(1, &r, &j, 100.0, 110.2, 1.0).unwrap();
        Network::new(vec![r, j], vec![pipe]).unwrap()
    }

    #[test]
    fn sections_appear_in_engine_order() {
        let text = render_inp(&network());
        let order = [
            "[TITLE]",
            "[JUNCTIONS]",
            "[RESERVOIRS]",
            "[PIPES]",
            "[REPORT]",
            "[OPTIONS]",
            "[END]",
        ];
        let mut last = 0;
        for section in order {
            let pos = text.find(section).unwrap_or_else(|| {
                panic!("missing section {section}");
            });
            assert!(pos >= last, "{section} out of order");
            last = pos;
        }
    }

    #[test]
    fn entity_lines_carry_field_order() {
        let text = render_inp(&network());
        assert!(text.contains(" 2\t0\t10\t\t;"), "junction line:\n{text}");
        assert!(text.contains(" 1\t50\t\t;"), "reservoir line:\n{text}");
        assert!(
            text.contains(" 1\t1\t2\t100\t110.2\t1\t0\tOpen\t;"),
            "pipe line:\n{text}"
        );
    }

    #[test]
    fn options_block_matches_engine_defaults() {
        let text = render_inp(&network());
        for line in [
            " Units\tLPS",
            " Headloss\tD-W",
            " Trials\t40",
            " Accuracy\t0.001",
            " Unbalanced\tContinue 10",
            " Demand Multiplier\t1.0",
            " Emitter Exponent\t0.5",
            " Tolerance\t0.01",
        ] {
            assert!(text.contains(line), "missing option line {line:?}");
        }
    }
}
