//! Network template ingestion.
//!
//! The input is a fixed tabular contract: 10 labeled comma-separated
//! rows, one value per entity, in this exact label order. Any label
//! mismatch is an input-format fault, not a recoverable condition.

use crate::error::{ProjectError, ProjectResult};
use aq_model::{Junction, NetworkTemplate, Node, Pipe, Reservoir};
use aq_model::pipe::{DEFAULT_DIAMETER_MM, DEFAULT_ROUGHNESS_MM};
use std::fs;
use std::path::Path;
use std::str::FromStr;

const LABELS: [&str; 10] = [
    "junction_id",
    "junction_elevation",
    "junction_demand",
    "junction_pressure_demand",
    "pipe_id",
    "pipe_st_node",
    "pipe_end_node",
    "pipe_length",
    "reservoir_id",
    "reservoir_head",
];

fn parse_all<T: FromStr>(
    values: &[&str],
    row: &'static str,
    what: &'static str,
) -> ProjectResult<Vec<T>> {
    values
        .iter()
        .map(|v| {
            v.trim().parse::<T>().map_err(|_| ProjectError::Parse {
                row,
                what,
                value: (*v).to_string(),
            })
        })
        .collect()
}

// Pipe endpoint columns are 1-based positions in the id-sorted node list.
fn endpoint<'a>(nodes: &'a [Node], pipe: u32, index: usize) -> ProjectResult<&'a Node> {
    if index == 0 || index > nodes.len() {
        return Err(ProjectError::EndpointIndex {
            pipe,
            index,
            nodes: nodes.len(),
        });
    }
    Ok(&nodes[index - 1])
}

fn same_len(a_idx: usize, b_idx: usize, rows: &[Vec<&str>]) -> ProjectResult<()> {
    let (len_a, len_b) = (rows[a_idx].len(), rows[b_idx].len());
    if len_a != len_b {
        return Err(ProjectError::FieldCount {
            a: LABELS[a_idx],
            b: LABELS[b_idx],
            len_a,
            len_b,
        });
    }
    Ok(())
}

/// Parse template CSV text.
pub fn parse_template(content: &str) -> ProjectResult<NetworkTemplate> {
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.len() != LABELS.len() {
        return Err(ProjectError::RowCount {
            expected: LABELS.len(),
            found: lines.len(),
        });
    }

    let mut rows: Vec<Vec<&str>> = Vec::with_capacity(LABELS.len());
    for (index, line) in lines.iter().enumerate() {
        let mut fields: Vec<&str> = line.split(',').collect();
        let label = fields.remove(0).trim();
        if label != LABELS[index] {
            return Err(ProjectError::LabelMismatch {
                row: index,
                expected: LABELS[index],
                found: label.to_string(),
            });
        }
        rows.push(fields);
    }

    for pair in [(0, 1), (0, 2), (0, 3), (4, 5), (4, 6), (4, 7), (8, 9)] {
        same_len(pair.0, pair.1, &rows)?;
    }

    let junction_ids: Vec<u32> = parse_all(&rows[0], LABELS[0], "junction id")?;
    let elevations: Vec<f64> = parse_all(&rows[1], LABELS[1], "elevation")?;
    let demands: Vec<f64> = parse_all(&rows[2], LABELS[2], "demand")?;
    let pressure_demands: Vec<f64> = parse_all(&rows[3], LABELS[3], "pressure demand")?;
    let pipe_ids: Vec<u32> = parse_all(&rows[4], LABELS[4], "pipe id")?;
    let starts: Vec<usize> = parse_all(&rows[5], LABELS[5], "start node index")?;
    let ends: Vec<usize> = parse_all(&rows[6], LABELS[6], "end node index")?;
    let lengths: Vec<f64> = parse_all(&rows[7], LABELS[7], "length")?;
    let reservoir_ids: Vec<u32> = parse_all(&rows[8], LABELS[8], "reservoir id")?;
    let heads: Vec<f64> = parse_all(&rows[9], LABELS[9], "head")?;

    let mut nodes = Vec::with_capacity(reservoir_ids.len() + junction_ids.len());
    for (&id, &head) in reservoir_ids.iter().zip(&heads) {
        nodes.push(Node::Reservoir(Reservoir::new(id, head)));
    }
    for i in 0..junction_ids.len() {
        nodes.push(Node::Junction(Junction::new(
            junction_ids[i],
            elevations[i],
            demands[i],
            pressure_demands[i],
        )));
    }
    nodes.sort_by_key(|n| n.id());

    let mut pipes = Vec::with_capacity(pipe_ids.len());
    for i in 0..pipe_ids.len() {
        let id = pipe_ids[i];
        let pipe = Pipe::new(
            id,
            endpoint(&nodes, id, starts[i])?,
            endpoint(&nodes, id, ends[i])?,
            lengths[i],
            DEFAULT_DIAMETER_MM,
            DEFAULT_ROUGHNESS_MM,
        )?;
        pipes.push(pipe);
    }
    pipes.sort_by_key(|p| p.id());

    Ok(NetworkTemplate::new(nodes, pipes))
}

/// Read a template CSV file.
pub fn read_template(path: &Path) -> ProjectResult<NetworkTemplate> {
    let content = fs::read_to_string(path)?;
    parse_template(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "junction_id,2,3\n\
junction_elevation,0,5\n\
junction_demand,10,4\n\
junction_pressure_demand,20,15\n\
pipe_id,1,2\n\
pipe_st_node,1,2\n\
pipe_end_node,2,3\n\
pipe_length,100,200\n\
reservoir_id,1\n\
reservoir_head,50\n";

    #[test]
    fn parses_the_reference_layout() {
        let template = parse_template(GOOD).unwrap();
        let ids: Vec<u32> = template.nodes().iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(template.nodes()[0].is_reservoir());
        let j = template.nodes()[1].as_junction().unwrap();
        assert_eq!((j.elevation, j.demand, j.pressure_demand), (0.0, 10.0, 20.0));

        assert_eq!(template.pipes().len(), 2);
        let p1 = &template.pipes()[0];
        assert_eq!(p1.id(), 1);
        assert_eq!(p1.start().id(), 1);
        assert_eq!(p1.end().id(), 2);
        assert_eq!(p1.length(), 100.0);
        assert_eq!(p1.diameter(), DEFAULT_DIAMETER_MM);
        assert_eq!(p1.roughness(), DEFAULT_ROUGHNESS_MM);
    }

    #[test]
    fn label_order_is_a_contract() {
        let swapped = GOOD.replace("junction_elevation", "junction_demand_x");
        match parse_template(&swapped).unwrap_err() {
            ProjectError::LabelMismatch { row, expected, found } => {
                assert_eq!(row, 1);
                assert_eq!(expected, "junction_elevation");
                assert_eq!(found, "junction_demand_x");
            }
            other => panic!("expected LabelMismatch, got {other:?}"),
        }
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let missing: String = GOOD.lines().take(9).collect::<Vec<_>>().join("\n");
        assert!(matches!(
            parse_template(&missing),
            Err(ProjectError::RowCount {
                expected: 10,
                found: 9
            })
        ));
    }

    #[test]
    fn mismatched_value_counts_are_rejected() {
        let ragged = GOOD.replace("junction_demand,10,4", "junction_demand,10");
        assert!(matches!(
            parse_template(&ragged),
            Err(ProjectError::FieldCount { .. })
        ));
    }

    #[test]
    fn endpoint_indices_are_one_based_and_bounded() {
        let bad = GOOD.replace("pipe_st_node,1,2", "pipe_st_node,1,9");
        assert!(matches!(
            parse_template(&bad),
            Err(ProjectError::EndpointIndex {
                pipe: 2,
                index: 9,
                ..
            })
        ));
        let zero = GOOD.replace("pipe_st_node,1,2", "pipe_st_node,0,2");
        assert!(matches!(
            parse_template(&zero),
            Err(ProjectError::EndpointIndex { index: 0, .. })
        ));
    }

    #[test]
    fn garbage_values_fail_with_context() {
        let bad = GOOD.replace("reservoir_head,50", "reservoir_head,tall");
        match parse_template(&bad).unwrap_err() {
            ProjectError::Parse { row, value, .. } => {
                assert_eq!(row, "reservoir_head");
                assert_eq!(value, "tall");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
