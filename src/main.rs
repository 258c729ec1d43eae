use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_lines::cli::{self, PlanArgs};
use release_lines::config;
use release_lines::domain::ReleaseType;
use release_lines::git::Git2Repository;
use release_lines::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-lines",
    version,
    about = "Plan semantic releases across release, maintenance and prerelease branches"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, default_value = ".", help = "Path to the git repository")]
    repo: PathBuf,

    #[arg(short, long, help = "Branch to plan for (defaults to the checked-out branch)")]
    branch: Option<String>,

    #[arg(short = 't', long, help = "Release type of the pending changes: patch, minor or major")]
    release_type: Option<ReleaseType>,

    #[arg(long, help = "Show normalized release branches and exit")]
    list: bool,

    #[arg(long, help = "Print the result as JSON")]
    json: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("release_lines=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        match e.downcast_ref::<release_lines::ReleaseError>() {
            Some(release_error) => ui::display_release_error(release_error),
            None => ui::display_error(&format!("{:#}", e)),
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let repo = Git2Repository::open(&args.repo)?;

    if args.list {
        let snapshot = cli::load_branches(&repo, &config)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            snapshot.warnings.iter().for_each(ui::display_boundary_warning);
            ui::display_branches(&snapshot.branches);
        }
        return Ok(());
    }

    let plan = cli::plan_release(
        &repo,
        &config,
        &PlanArgs {
            branch: args.branch.clone(),
            release_type: args.release_type,
        },
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    plan.warnings.iter().for_each(ui::display_boundary_warning);
    ui::display_plan(
        &plan.branch,
        plan.last_release.as_ref(),
        plan.release_to_add.as_ref(),
        plan.next_release.as_ref(),
    );
    Ok(())
}
