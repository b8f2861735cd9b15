use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for basicworld")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Run the demo without a window for a number of frames
    Headless {
        #[arg(default_value_t = 120)]
        frames: u32,
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_doc()?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Doc => run_doc()?,
        Commands::Build => cargo("build", &["build", "--workspace"])?,
        Commands::Headless { frames, seed } => {
            let frames = frames.to_string();
            let seed = seed.to_string();
            cargo(
                "headless demo",
                &[
                    "run",
                    "-p",
                    "basicworld-desktop",
                    "--",
                    "--headless",
                    &frames,
                    "--seed",
                    &seed,
                ],
            )?;
        }
    }

    Ok(())
}

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("{step} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("cargo fmt check", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    cargo(
        "cargo clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn run_tests() -> Result<()> {
    cargo("cargo test", &["test", "--workspace"])
}

fn run_doc() -> Result<()> {
    cargo("cargo doc", &["doc", "--workspace", "--no-deps"])
}
