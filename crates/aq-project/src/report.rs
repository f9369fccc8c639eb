//! Persistence of the optimized design.

use crate::error::ProjectResult;
use aq_model::Network;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Render the optimized diameters as a single labeled CSV row, one value
/// per pipe in pipe-id ascending order.
pub fn render_diameters(network: &Network) -> String {
    let mut row = String::from("optimized_diameters");
    for pipe in network.pipes() {
        let _ = write!(row, ",{}", pipe.diameter());
    }
    row.push('\n');
    row
}

/// Write the optimized-diameter row to a file.
pub fn write_diameters(path: &Path, network: &Network) -> ProjectResult<()> {
    fs::write(path, render_diameters(network))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_model::{Junction, Node, Pipe, Reservoir};

    #[test]
    fn one_labeled_row_in_pipe_order() {
        let r = Node::Reservoir(Reservoir::new(1, 50.0));
        let j = Node::Junction(Junction::new(2, 0.0, 10.0, 20.0));
        let pipes = vec![
            Pipe::new(2, &r, &j, 50.0, 79.2, 1.0).unwrap(),
            Pipe::new(1, &r, &j, 100.0, 110.2, 1.0).unwrap(),
        ];
        let network = Network::new(vec![r, j], pipes).unwrap();
        assert_eq!(
            render_diameters(&network),
            "optimized_diameters,110.2,79.2\n"
        );
    }
}
