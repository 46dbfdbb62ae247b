//! Rhea board CLI.
//!
//! This binary builds a Rhea machine from a configuration and reports the result. It performs:
//! 1. **Configuration:** Loads an optional JSON file, then applies command-line overrides.
//! 2. **Construction:** Resolves the machine state and runs `RheaMachine::init`.
//! 3. **Dump:** Optionally prints the hart arrays and the physical memory map.
//!
//! Configuration errors exit with status 1; internal construction errors abort.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rhea_core::common::{ConfigError, MIB, Severity};
use rhea_core::config::{CpuType, NumaNodeConfig};
use rhea_core::soc::RHEA_MACHINE;
use rhea_core::{MachineConfig, MachineError, MachineState, RheaMachine};

#[derive(Parser, Debug)]
#[command(
    name = "rhea",
    author,
    version,
    about = "Build the Rhea RISC-V board and report its layout",
    long_about = "Build the Rhea RISC-V board from a JSON configuration and/or command-line options.\n\nExamples:\n  rhea --dump\n  rhea --cpus 4 --ram-size 256 --dump\n  rhea --config board.json --numa 0-1,3"
)]
struct Cli {
    /// JSON machine configuration; command-line options override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of harts.
    #[arg(long)]
    cpus: Option<u32>,

    /// CPU model (rv32, rv64, max).
    #[arg(long)]
    cpu_type: Option<CpuType>,

    /// DRAM size in MiB.
    #[arg(long, value_name = "MIB")]
    ram_size: Option<u64>,

    /// Adds a NUMA node holding the listed cpus (e.g. `0-1,3`). Repeat for more nodes.
    #[arg(long = "numa", value_name = "CPUS", value_parser = parse_cpu_list)]
    numa: Vec<CpuList>,

    /// Print the hart arrays and the memory map after construction.
    #[arg(long)]
    dump: bool,
}

/// Cpu indices of one `--numa` node.
#[derive(Clone, Debug, PartialEq, Eq)]
struct CpuList(Vec<u32>);

/// Parses a cpu list such as `0-1,3`. An empty string is an empty list.
///
/// Every index must be below the board's maximum hart count.
fn parse_cpu_list(s: &str) -> Result<CpuList, String> {
    let max = RHEA_MACHINE.max_cpus;
    let mut cpus = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let parse = |v: &str| {
            let cpu = v
                .trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid cpu index '{v}': {e}"))?;
            if cpu >= max {
                return Err(format!(
                    "cpu index {cpu} out of range, the board has at most {max} cpus"
                ));
            }
            Ok(cpu)
        };
        match part.split_once('-') {
            Some((lo, hi)) => {
                let (lo, hi) = (parse(lo)?, parse(hi)?);
                if lo > hi {
                    return Err(format!("invalid cpu range '{part}'"));
                }
                cpus.extend(lo..=hi);
            }
            None => cpus.push(parse(part)?),
        }
    }
    Ok(CpuList(cpus))
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let machine = build_config(&cli)
        .map_err(MachineError::from)
        .and_then(|config| MachineState::from_config(&config))
        .and_then(RheaMachine::init)
        .unwrap_or_else(|err| fail(&err));

    tracing::info!(
        machine = RHEA_MACHINE.name,
        cpu_type = %machine.cpu_type(),
        "machine ready"
    );

    if cli.dump {
        dump(&machine);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides.
fn build_config(cli: &Cli) -> Result<MachineConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => MachineConfig::from_file(path)?,
        None => MachineConfig::default(),
    };
    if let Some(cpus) = cli.cpus {
        config.smp.cpus = cpus;
    }
    if let Some(cpu_type) = cli.cpu_type {
        config.cpu_type = cpu_type;
    }
    if let Some(mib) = cli.ram_size {
        config.memory.ram_size = mib.saturating_mul(MIB);
    }
    if !cli.numa.is_empty() {
        config.numa.nodes = cli
            .numa
            .iter()
            .map(|list| NumaNodeConfig {
                cpus: list.0.clone(),
            })
            .collect();
    }
    Ok(config)
}

/// Reports a construction failure and terminates according to its severity.
fn fail(err: &MachineError) -> ! {
    tracing::error!("{err}");
    match err.severity() {
        Severity::Configuration => process::exit(1),
        Severity::Internal => process::abort(),
    }
}

fn dump(machine: &RheaMachine) {
    println!("{} ({})", RHEA_MACHINE.desc, machine.cpu_type());
    for (name, array) in machine.hart_arrays() {
        println!(
            "  {name}: hartid base {}, {} hart(s), reset vector {}",
            array.hart_id_base(),
            array.num_harts(),
            array.reset_vector()
        );
    }
    println!();
    print!("{}", machine.address_space());
}
