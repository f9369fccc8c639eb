//! aq-project: tabular network data in and optimized diameters out.

pub mod error;
pub mod report;
pub mod template;

pub use error::{ProjectError, ProjectResult};
pub use report::{render_diameters, write_diameters};
pub use template::{parse_template, read_template};
