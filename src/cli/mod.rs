use std::collections::HashSet;
use std::fs::canonicalize;

use anyhow::{bail, Context};
use clap::Parser;

use crate::cli::args::Args;
use crate::cli::progress::StepContext;
use crate::config::{parse_config, MemoryShape};
use crate::plan::{execute_plan, generate_plan, ExecutePlanParams, PlanOutput, TaskKey};
use crate::Result;

pub mod args;
pub mod progress;

pub const BANNER: &str = r"
  __       _
 / _| __ _| | _____ _ __ __ _ _ __ ___
| |_ / _` | |/ / _ \ '__/ _` | '_ ` _ \
|  _| (_| |   <  __/ | | (_| | | | | | |
|_|  \__,_|_|\_\___|_|  \__,_|_| |_| |_|

FAKERAM v0.2
";

pub fn run() -> Result<()> {
    let args = Args::parse();

    let config_path = canonicalize(&args.config)
        .with_context(|| format!("configuration file {:?} not found", &args.config))?;

    println!("{BANNER}");

    println!("Reading configuration file...\n");
    let config = parse_config(&config_path)?;

    println!("Configuration file: {:?}", &config_path);
    println!("Process parameters:");
    println!("\tBitcell size: {} x {} um", config.process.bitcell_width, config.process.bitcell_height);
    println!("\tColumn mux factor: {}", config.process.column_mux_factor);
    println!("\tPin width: {} um", config.process.pin_width);
    println!("\tPin pitch: {} um", config.process.pin_pitch);
    println!("\tPin layer: {}", config.process.metal_layer);

    let srams = config
        .srams
        .iter()
        .filter(|sram| args.srams.is_empty() || args.srams.iter().any(|name| name == sram.name.as_str()))
        .collect::<Vec<_>>();
    if srams.is_empty() {
        bail!("No memories to generate in {:?}", &config_path);
    }

    let enabled_tasks = vec![
        (args.verilog, TaskKey::GenerateVerilog),
        (args.blackbox, TaskKey::GenerateBlackbox),
        (args.all, TaskKey::All),
    ]
    .into_iter()
    .filter_map(|(a, b)| if a { Some(b) } else { None });

    let tasks = HashSet::from_iter(enabled_tasks);

    std::fs::create_dir_all(&args.output_dir)?;
    let output_dir = canonicalize(&args.output_dir)?;

    for shape in srams {
        print_shape(shape);

        let mut ctx = StepContext::new(&tasks);

        let plan = ctx.check(generate_plan(&config.process, shape))?;
        ctx.finish(TaskKey::GeneratePlan);

        let work_dir = output_dir.join(shape.name.as_str());
        let res = execute_plan(ExecutePlanParams {
            work_dir: &work_dir,
            plan: &plan,
            tasks: &tasks,
            ctx: Some(&mut ctx),
        });

        let output = ctx.check(res)?;
        print_summary(&output);
    }

    println!("Artifacts saved to: {:?}\n", &output_dir);

    Ok(())
}

fn print_shape(shape: &MemoryShape) {
    println!("\nSRAM parameters ({}):", shape.name);
    println!("\tWord width: {}", shape.width);
    println!("\tNumber of words: {}", shape.depth);
    println!("\tCapacity: {} bits", shape.num_bits());
    println!("\tBanks: {}", shape.banks);
    println!("\tRead/write ports: {}", shape.rw_ports);
    if shape.independent_port_clocks {
        println!("\tIndependent port clocks: yes");
    }
}

fn print_summary(output: &PlanOutput) {
    let PlanOutput { abs, artifacts } = output;
    println!("Macro {}:", abs.name);
    println!("\tHeight: {:.3} um", abs.dims.height);
    println!("\tWidth: {:.3} um", abs.dims.width);
    println!("\tArea: {:.3} um^2", abs.dims.area());
    println!(
        "\tPin tracks: {} required, {} available (pitch multiplier {})",
        abs.budget.required, abs.budget.available, abs.budget.multiplier
    );
    for artifact in artifacts {
        println!("\tWrote {:?}", artifact);
    }
}
