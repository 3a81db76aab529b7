use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for wavegrid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run fmt, clippy, tests and doc in order
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests, including the shader validation
    Test,
    /// Run the CPU heightfield benchmark in release mode
    Bench,
    /// Run the CLI headlessly: parameter table, one sample, a small preview
    Smoke,
    /// Build rustdoc for the workspace
    Doc,
}

/// One cargo invocation and a short name for error messages.
struct Task {
    name: &'static str,
    args: &'static [&'static str],
}

const FMT: Task = Task {
    name: "fmt",
    args: &["fmt", "--all", "--", "--check"],
};
const CLIPPY: Task = Task {
    name: "clippy",
    args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
};
const TEST: Task = Task {
    name: "test",
    args: &["test", "--workspace"],
};
const BENCH: Task = Task {
    name: "bench",
    args: &["bench", "-p", "wavegrid-mesh", "--bench", "bench_heightfield"],
};
const DOC: Task = Task {
    name: "doc",
    args: &["doc", "--workspace", "--no-deps"],
};
const SMOKE: &[Task] = &[
    Task {
        name: "cli params",
        args: &["run", "-q", "-p", "wavegrid-cli", "--", "params"],
    },
    Task {
        name: "cli sample",
        args: &[
            "run", "-q", "-p", "wavegrid-cli", "--", "sample", "--x", "1", "--y", "1", "--time",
            "0",
        ],
    },
    Task {
        name: "cli preview",
        args: &[
            "run", "-q", "-p", "wavegrid-cli", "--", "preview", "--resolution", "24", "--time",
            "2.5",
        ],
    },
];

fn run(task: &Task) -> Result<()> {
    println!("==> cargo {}", task.args.join(" "));
    let status = Command::new("cargo").args(task.args).status()?;
    if !status.success() {
        anyhow::bail!("{} failed ({status})", task.name);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            for task in [&FMT, &CLIPPY, &TEST, &DOC] {
                run(task)?;
            }
        }
        Commands::Fmt => run(&FMT)?,
        Commands::Clippy => run(&CLIPPY)?,
        Commands::Test => run(&TEST)?,
        Commands::Bench => run(&BENCH)?,
        Commands::Smoke => {
            for task in SMOKE {
                run(task)?;
            }
        }
        Commands::Doc => run(&DOC)?,
    }

    Ok(())
}
