use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "sheltie_lambda";
const LAMBDA_BINARY: &str = "sheltie_determinator";
const DIST_DIR: &str = "infra/sheltie_determinator/dist";
const DEFAULT_LAMBDA_TARGET: &str = "x86_64-unknown-linux-gnu";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the Sheltie determinator workspace",
    long_about = "A unified CLI for testing, CI checks, and packaging the\n\
                  Sheltie determinator Lambda."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run unit tests for every workspace crate
    Test,
    /// Run CI checks (fmt, clippy, tests, packaging)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build and package the Lambda binary as a bootstrap zip
    ServerlessPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, env = "LAMBDA_TARGET", default_value = DEFAULT_LAMBDA_TARGET)]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Release build and zip packaging for the default Lambda target
    Package,
    /// Run check + package
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_lambda(target: &str, profile: BuildProfile) {
    ensure_rust_target_installed(target);

    step("Build Lambda binary");

    let mut cargo_args = vec![
        "build",
        "-p",
        LAMBDA_PACKAGE,
        "--target",
        target,
        "--bin",
        LAMBDA_BINARY,
    ];
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    step("Package Lambda zip artifact");
    let target_dir = Path::new("target").join(target).join(profile.dir_name());
    let dist_dir = Path::new(DIST_DIR);
    fs::create_dir_all(dist_dir).expect("failed to create lambda dist directory");

    let binary_path = target_dir.join(LAMBDA_BINARY);
    let zip_path = dist_dir.join("runtime.zip");
    if let Err(error) = package_lambda_zip(&binary_path, &zip_path) {
        eprintln!(
            "error: failed to package '{}' into '{}': {error}",
            binary_path.display(),
            zip_path.display()
        );
        exit(1);
    }

    eprintln!("\nPackaged artifact:\n- {}", zip_path.display());
}

/// Fails fast with a hint when the Lambda target has not been added via rustup.
/// A missing rustup is not fatal; cargo will report the problem itself.
fn ensure_rust_target_installed(target: &str) {
    let Ok(output) = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    else {
        eprintln!("warning: rustup not found; skipping target preflight for `{target}`");
        return;
    };

    let installed = String::from_utf8_lossy(&output.stdout);
    if output.status.success() && !installed.lines().any(|line| line.trim() == target) {
        eprintln!(
            "error: rust target `{target}` is not installed. run `rustup target add {target}` first"
        );
        exit(1);
    }
}

/// Lambda custom runtimes look for an executable named `bootstrap` at the zip root.
fn package_lambda_zip(binary_path: &Path, zip_path: &Path) -> ZipResult<()> {
    let binary = fs::read(binary_path)?;
    let mut zip = ZipWriter::new(fs::File::create(zip_path)?);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)?;
    zip.write_all(&binary)?;
    zip.finish()?;
    Ok(())
}

// ── CI jobs ────────────────────────────────────────────────────────

fn run_tests() {
    step("Test sheltie_core");
    run_cargo(&["test", "-p", "sheltie_core"]);

    step("Test sheltie_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);
}

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    run_tests();
}

fn ci_package() {
    package_lambda(DEFAULT_LAMBDA_TARGET, BuildProfile::Release);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Test => run_tests(),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Package => ci_package(),
                CiJob::All => {
                    ci_check();
                    ci_package();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::ServerlessPackage { target, profile } => {
            package_lambda(&target, profile);
        }
    }
}
