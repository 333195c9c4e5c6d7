use std::collections::HashSet;
use std::time::Duration;

use colored::{ColoredString, Colorize};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::plan::TaskKey;
use crate::Result;

const TICK: Duration = Duration::from_millis(200);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Pending,
    InProgress,
    Disabled,
    Skipped,
    Failed,
}

impl StepStatus {
    fn label(self) -> ColoredString {
        match self {
            Self::Done => "Done".green().bold(),
            Self::Pending => "Pending".blue().bold(),
            Self::InProgress => "In Progress".bright_white().bold(),
            Self::Disabled => "Disabled".truecolor(120, 120, 120).bold(),
            Self::Skipped => "Skipped".yellow().bold(),
            Self::Failed => "Failed".bright_white().on_red().bold(),
        }
    }

    /// Whether the step is still waiting on work.
    #[inline]
    fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    fn style(self) -> ProgressStyle {
        let label = self.label();
        let template = if self.is_open() {
            format!("{{spinner:.green}} {label:16} {{msg}}")
        } else {
            format!("  {label:16} {{msg}}")
        };
        ProgressStyle::with_template(&template).unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

pub struct Step {
    desc: &'static str,
    key: TaskKey,
    enabled: bool,
    bar: ProgressBar,
}

impl Step {
    fn new(desc: &'static str, key: TaskKey, enabled: bool) -> Self {
        Self {
            desc,
            key,
            enabled,
            bar: ProgressBar::new_spinner(),
        }
    }

    fn mark(&mut self, status: StepStatus) {
        self.bar.set_style(status.style());
        match status {
            StepStatus::InProgress => self.bar.enable_steady_tick(TICK),
            StepStatus::Pending => {}
            _ => self.bar.finish(),
        }
    }
}

/// Tracks the progress of the steps run for a single memory.
///
/// Disabled steps are displayed but never become current.
pub struct StepContext {
    steps: Vec<Step>,
    current: Option<usize>,
}

impl StepContext {
    pub fn new(tasks: &HashSet<TaskKey>) -> Self {
        println!("Tasks:");

        let requested = |key: TaskKey| tasks.contains(&key) || tasks.contains(&TaskKey::All);
        let mut steps = vec![
            Step::new("Generate plan", TaskKey::GeneratePlan, true),
            Step::new("Compute geometry", TaskKey::ComputeGeometry, true),
            Step::new("Generate abstract", TaskKey::GenerateAbstract, true),
            Step::new("Write LEF", TaskKey::GenerateLef, true),
            Step::new(
                "Write Verilog",
                TaskKey::GenerateVerilog,
                requested(TaskKey::GenerateVerilog),
            ),
            Step::new(
                "Write black box",
                TaskKey::GenerateBlackbox,
                requested(TaskKey::GenerateBlackbox),
            ),
        ];

        let mp = MultiProgress::new();
        let total = steps.iter().filter(|step| step.enabled).count();
        let digits = total.to_string().len();
        let mut n = 0;
        for step in steps.iter_mut() {
            mp.add(step.bar.clone());
            let counter = if step.enabled {
                n += 1;
                format!("[{n:digits$}/{total:digits$}]")
            } else {
                "[-/-]".to_string()
            };
            step.bar.set_message(format!("{counter} {}", step.desc));
            step.mark(if step.enabled {
                StepStatus::Pending
            } else {
                StepStatus::Disabled
            });
        }

        let mut ctx = Self {
            steps,
            current: None,
        };
        ctx.current = ctx.next_enabled(0);
        if let Some(step) = ctx.current_step() {
            step.mark(StepStatus::InProgress);
        }
        ctx
    }

    fn next_enabled(&self, from: usize) -> Option<usize> {
        (from..self.steps.len()).find(|&i| self.steps[i].enabled)
    }

    #[inline]
    pub fn current_step(&mut self) -> Option<&mut Step> {
        match self.current {
            Some(i) => self.steps.get_mut(i),
            None => None,
        }
    }

    /// Marks the current step failed and all later steps skipped if `res` is an error.
    pub fn check<T>(&mut self, res: Result<T>) -> Result<T> {
        if res.is_err() {
            if let Some(i) = self.current.take() {
                self.steps[i].mark(StepStatus::Failed);
                for step in self.steps[i + 1..].iter_mut().filter(|step| step.enabled) {
                    step.mark(StepStatus::Skipped);
                }
            }
            println!("\n");
        }

        res
    }

    /// Completes the step for `key` and starts the next enabled one.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not the current step.
    pub fn finish(&mut self, key: TaskKey) {
        let i = match self.current {
            Some(i) if self.steps[i].key == key => i,
            Some(_) => panic!("Step {key:?} was completed out of order"),
            None => panic!("Step {key:?} was completed after all steps had ended"),
        };
        self.steps[i].mark(StepStatus::Done);

        self.current = self.next_enabled(i + 1);
        match self.current_step() {
            Some(step) => step.mark(StepStatus::InProgress),
            None => println!("\nCompleted all tasks\n"),
        }
    }
}
