use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::bail;
use log::info;

use crate::abs::lef::save_lef;
use crate::abs::{synthesize_layout, MacroAbstract};
use crate::area::compute_dimensions;
use crate::cli::progress::StepContext;
use crate::config::{MemoryShape, ProcessParams};
use crate::paths::{out_blackbox_verilog, out_lef, out_verilog};
use crate::verilog::{save_blackbox_verilog, save_verilog, SramVerilogParams};
use crate::Result;

/// Maximum number of read/write ports; ports are named `_A` through `_Z`.
pub const MAX_RW_PORTS: usize = 26;

/// A validated memory, ready to be generated.
pub struct SramPlan {
    pub process: ProcessParams,
    pub shape: MemoryShape,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TaskKey {
    GeneratePlan,
    ComputeGeometry,
    GenerateAbstract,
    GenerateLef,
    GenerateVerilog,
    GenerateBlackbox,
    All,
}

pub struct ExecutePlanParams<'a> {
    pub work_dir: &'a Path,
    pub plan: &'a SramPlan,
    pub tasks: &'a HashSet<TaskKey>,
    pub ctx: Option<&'a mut StepContext>,
}

/// Everything produced by [`execute_plan`].
pub struct PlanOutput {
    pub abs: MacroAbstract,
    pub artifacts: Vec<PathBuf>,
}

pub fn generate_plan(process: &ProcessParams, shape: &MemoryShape) -> Result<SramPlan> {
    if shape.width == 0 {
        bail!("Memory width must be at least 1 bit");
    }
    if shape.depth < 2 {
        bail!("Memory depth must be at least 2 words");
    }
    if shape.rw_ports == 0 || shape.rw_ports > MAX_RW_PORTS {
        bail!("Number of read/write ports must be between 1 and {MAX_RW_PORTS}");
    }
    if shape.access_overhead <= 0.0 {
        bail!("Access overhead multiplier must be positive");
    }
    if process.column_mux_factor == 0 {
        bail!("Column mux factor must be at least 1");
    }
    if process.pin_width <= 0.0 || process.pin_pitch <= 0.0 || process.manufacturing_grid <= 0.0
    {
        bail!("Pin width, pin pitch, and manufacturing grid must be positive");
    }
    if process.bitcell_width <= 0.0 || process.bitcell_height <= 0.0 {
        bail!("Bitcell dimensions must be positive");
    }

    Ok(SramPlan {
        process: process.clone(),
        shape: shape.clone(),
    })
}

macro_rules! try_finish_task {
    ( $ctx:expr, $task:expr ) => {
        if let Some(ctx) = $ctx.as_mut() {
            ctx.finish($task);
        }
    };
}

macro_rules! try_execute_task {
    ( $tasks:expr, $task:expr, $body:expr, $ctx:expr) => {
        if $tasks.contains(&$task) || $tasks.contains(&TaskKey::All) {
            $body;
            try_finish_task!($ctx, $task);
        }
    };
}

/// Generates all enabled views of a memory.
///
/// The abstract is synthesized in full before any file is written, so a
/// memory that does not fit its pins leaves no artifacts behind.
pub fn execute_plan(params: ExecutePlanParams) -> Result<PlanOutput> {
    let ExecutePlanParams {
        work_dir,
        plan,
        tasks,
        mut ctx,
    } = params;
    let SramPlan { process, shape } = plan;
    let name = shape.name.as_str();

    let dims = compute_dimensions(process, shape)?;
    try_finish_task!(ctx, TaskKey::ComputeGeometry);

    let abs = synthesize_layout(process, shape, dims)?;
    try_finish_task!(ctx, TaskKey::GenerateAbstract);

    std::fs::create_dir_all(work_dir)?;
    let mut artifacts = Vec::new();

    let lef_path = out_lef(work_dir, name);
    save_lef(&lef_path, &abs)?;
    info!("Wrote {:?}", &lef_path);
    artifacts.push(lef_path);
    try_finish_task!(ctx, TaskKey::GenerateLef);

    let verilog_params = SramVerilogParams::new(shape);
    try_execute_task!(
        tasks,
        TaskKey::GenerateVerilog,
        {
            let path = out_verilog(work_dir, name);
            save_verilog(&path, &verilog_params)?;
            info!("Wrote {:?}", &path);
            artifacts.push(path);
        },
        ctx
    );
    try_execute_task!(
        tasks,
        TaskKey::GenerateBlackbox,
        {
            let path = out_blackbox_verilog(work_dir, name);
            save_blackbox_verilog(&path, &verilog_params)?;
            info!("Wrote {:?}", &path);
            artifacts.push(path);
        },
        ctx
    );

    Ok(PlanOutput { abs, artifacts })
}
