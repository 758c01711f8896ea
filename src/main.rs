use anyhow::{bail, Context};
use clap::Parser;
use pdf_wordfreq::scanner::format_bytes;
use pdf_wordfreq::{
    Cli, OutputFormatter, OutputMode, Prompter, UserFriendlyError, WordFreq, WordFreqError,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(&cli);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match WordFreq::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    if cli.dry_run {
        return handle_dry_run(&app);
    }

    let request = if cli.no_prompt {
        app.request_from_config()
    } else {
        app.resolve_request(&mut Prompter::stdio(app.output_formatter().mode()))
    };

    let request = match request {
        Ok(request) => request,
        Err(e) => {
            app.handle_error(&e);
            return e.exit_code();
        }
    };

    match app.run(&request) {
        Ok(report) => {
            app.output_formatter().print_run_summary(&report);

            if report.has_skipped() {
                2 // Report written, some documents skipped
            } else {
                0
            }
        }
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            app.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("wordfreq.toml"));

    match write_sample_config(&config_path) {
        Ok(()) => {
            println!(
                "Generated sample configuration file: {}",
                config_path.display()
            );
            println!("\nTo use this configuration:");
            println!("  pdf-wordfreq --config {}", config_path.display());
            println!("\nEdit the file to set the theme, fiscal year and keywords.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {:#}", e);
            6
        }
    }
}

fn write_sample_config(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    WordFreq::generate_sample_config(path)
        .with_context(|| format!("could not write {}", path.display()))
}

fn handle_dry_run(app: &WordFreq) -> i32 {
    let formatter = app.output_formatter();

    let plan = match app.plan() {
        Ok(plan) => plan,
        Err(e) => {
            app.handle_error(&e);
            return e.exit_code();
        }
    };

    if formatter.mode() == OutputMode::Json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize plan: {}", e);
                return 1;
            }
        }
        return 0;
    }

    formatter.info("DRY RUN MODE - No documents will be read and no report written");
    formatter.print_separator();

    println!("  Input folder: {}", plan.folder.display());
    println!("  Extension: {}", plan.extension);
    println!("  On error: {:?}", plan.on_error);
    match plan.keywords {
        Some(ref keywords) => println!("  Keywords: {}", keywords.join(", ")),
        None => println!("  Keywords: (will be asked for)"),
    }
    match plan.report_path {
        Some(ref path) => println!("  Report: {}", path.display()),
        None => println!("  Report: (named after theme and fiscal year, asked for at run time)"),
    }

    formatter.print_separator();
    println!(
        "  {} documents ({})",
        plan.documents.len(),
        format_bytes(plan.total_size)
    );
    for document in &plan.documents {
        println!("    {}", document);
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");

    0
}

fn print_startup_error(error: &WordFreqError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
    tracing::debug!(suggestion = ?error.suggestion(), "startup failed");
}

fn setup_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
