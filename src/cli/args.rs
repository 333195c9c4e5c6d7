use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about,
    help_template(
        "{before-help}{name} {version}\n{author-with-newline}{about-with-newline}\n{usage-heading} {usage}\n\n{all-args}{after-help}"
    )
)]
pub struct Args {
    /// Path to TOML or JSON configuration file.
    #[arg(short, long, default_value = "fakeram.toml")]
    pub config: PathBuf,

    /// Directory to which output files should be saved.
    #[arg(short, long, default_value = "results")]
    pub output_dir: PathBuf,

    /// Generate a behavioral Verilog model.
    #[arg(long)]
    pub verilog: bool,

    /// Generate a black-box Verilog declaration.
    #[arg(long)]
    pub blackbox: bool,

    /// Only generate the memories with these names.
    #[arg(short, long = "sram")]
    pub srams: Vec<String>,

    /// Run all available steps.
    #[arg(short, long)]
    pub all: bool,
}
