use aq_core::units::{m, m3ps};
use aq_epanet::{EngineCommand, EpanetSolver};
use aq_model::Network;
use aq_opt::{GaConfig, Optimizer};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "aq-cli")]
#[command(about = "Aquanet CLI - water-distribution diameter optimization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize pipe diameters for a network
    Optimize {
        /// Path to the network template CSV
        network_path: PathBuf,
        /// Path to the EPANET engine executable or launch script
        #[arg(long)]
        engine: PathBuf,
        /// Optional GA configuration YAML (defaults otherwise)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Generation budget (overrides the config file)
        #[arg(long)]
        generations: Option<usize>,
        /// Where to write the optimized-diameter CSV row
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Engine timeout per invocation, seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,
    },
    /// Run one hydraulic simulation and print the results
    Solve {
        /// Path to the network template CSV
        network_path: PathBuf,
        /// Path to the EPANET engine executable or launch script
        #[arg(long)]
        engine: PathBuf,
        /// Engine timeout per invocation, seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,
    },
    /// Single-pipe design calculations (no engine needed)
    #[command(subcommand)]
    Design(DesignCommands),
}

#[derive(Subcommand)]
enum DesignCommands {
    /// Diameter achieving a target head loss
    Diameter {
        /// Flow, m^3/s
        #[arg(long)]
        flow: f64,
        /// Target head loss, m
        #[arg(long)]
        head_loss: f64,
        /// Pipe length, m
        #[arg(long)]
        length: f64,
        /// Absolute roughness, m
        #[arg(long, default_value_t = 0.001)]
        roughness: f64,
    },
    /// Friction head loss of a pipe
    HeadLoss {
        /// Flow, m^3/s
        #[arg(long)]
        flow: f64,
        /// Inner diameter, m
        #[arg(long)]
        diameter: f64,
        /// Pipe length, m
        #[arg(long)]
        length: f64,
        /// Absolute roughness, m
        #[arg(long, default_value_t = 0.001)]
        roughness: f64,
    },
    /// Flow achieving a target head loss
    Discharge {
        /// Target head loss, m
        #[arg(long)]
        head_loss: f64,
        /// Inner diameter, m
        #[arg(long)]
        diameter: f64,
        /// Pipe length, m
        #[arg(long)]
        length: f64,
        /// Absolute roughness, m
        #[arg(long, default_value_t = 0.001)]
        roughness: f64,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize {
            network_path,
            engine,
            config,
            generations,
            output,
            timeout,
        } => cmd_optimize(
            &network_path,
            &engine,
            config.as_deref(),
            generations,
            output.as_deref(),
            timeout,
        ),
        Commands::Solve {
            network_path,
            engine,
            timeout,
        } => cmd_solve(&network_path, &engine, timeout),
        Commands::Design(design) => cmd_design(design),
    }
}

fn load_config(path: Option<&Path>, generations: Option<usize>) -> Result<GaConfig, Box<dyn Error>> {
    let mut config = match path {
        Some(path) => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
        None => GaConfig::new(100),
    };
    if let Some(generations) = generations {
        config.generations = generations;
    }
    Ok(config)
}

fn build_solver(engine: &Path, timeout: u64) -> Result<EpanetSolver, Box<dyn Error>> {
    let command = EngineCommand::new(engine).with_timeout(Duration::from_secs(timeout));
    Ok(EpanetSolver::new(command)?)
}

fn cmd_optimize(
    network_path: &Path,
    engine: &Path,
    config_path: Option<&Path>,
    generations: Option<usize>,
    output: Option<&Path>,
    timeout: u64,
) -> Result<(), Box<dyn Error>> {
    let template = aq_project::read_template(network_path)?;
    let config = load_config(config_path, generations)?;
    let solver = build_solver(engine, timeout)?;

    let optimizer = Optimizer::new(config)?;
    let outcome = optimizer.run(&template, &solver)?;

    println!("Optimal or near-optimal solution found: {:?}", outcome.genome);
    println!("Fitness: {}", outcome.fitness);
    if !outcome.is_feasible() {
        println!(
            "Warning: pressure demand not satisfied at nodes {:?}",
            outcome.unsatisfied_junctions
        );
    }

    if let Some(output) = output {
        let mut network = Network::from_template(&template)?;
        network.set_pipe_diameters(&outcome.genome)?;
        aq_project::write_diameters(output, &network)?;
        println!("Optimized diameters written to {}", output.display());
    }
    Ok(())
}

fn cmd_solve(network_path: &Path, engine: &Path, timeout: u64) -> Result<(), Box<dyn Error>> {
    let template = aq_project::read_template(network_path)?;
    let solver = build_solver(engine, timeout)?;

    let mut network = Network::from_template(&template)?;
    solver.solve_network(&mut network)?;

    println!("Junctions:");
    for junction in network.junctions() {
        println!(
            "  {}: head {:.3} m (demand {:.3} m){}",
            junction.id(),
            junction.actual_head()?,
            junction.pressure_demand,
            if junction.has_enough_head()? {
                ""
            } else {
                "  [SHORT]"
            }
        );
    }
    println!("Pipes:");
    for pipe in network.pipes() {
        println!(
            "  {}: discharge {:.3} L/s, velocity {:.3} m/s, headloss {:.3} m",
            pipe.id(),
            pipe.discharge()?,
            pipe.velocity()?,
            pipe.headloss()?
        );
    }
    Ok(())
}

fn cmd_design(design: DesignCommands) -> Result<(), Box<dyn Error>> {
    match design {
        DesignCommands::Diameter {
            flow,
            head_loss,
            length,
            roughness,
        } => {
            let d = aq_hydraulics::diameter(m3ps(flow), m(head_loss), m(length), m(roughness))?;
            println!("diameter: {:.4} m", d.value);
        }
        DesignCommands::HeadLoss {
            flow,
            diameter,
            length,
            roughness,
        } => {
            let hf = aq_hydraulics::head_loss(m3ps(flow), m(diameter), m(length), m(roughness))?;
            println!("head loss: {:.4} m", hf.value);
        }
        DesignCommands::Discharge {
            head_loss,
            diameter,
            length,
            roughness,
        } => {
            let q = aq_hydraulics::discharge(m(head_loss), m(diameter), m(length), m(roughness))?;
            println!("discharge: {:.5} m^3/s", q.value);
        }
    }
    Ok(())
}
