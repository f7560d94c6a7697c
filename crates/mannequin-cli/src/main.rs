//! Mannequin CLI - Command-line interface for parametric avatars
//!
//! This binary provides commands for building procedural avatars,
//! normalizing external models, running headless viewer sessions, and
//! managing saved avatar records.

use clap::{ArgAction, Args, Parser, Subcommand};
use mannequin_spec::{Gender, HairType, Rgb};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// Use modules from the library crate
use mannequin_cli::commands;
use mannequin_cli::input::ParamOverrides;

/// Mannequin - Parametric Avatar Generation
#[derive(Parser)]
#[command(name = "mannequin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Avatar parameters shared by several commands.
#[derive(Args, Debug, Clone, Default)]
struct ParamArgs {
    /// Params or avatar-record JSON file
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Height in centimeters (140-200)
    #[arg(long)]
    height: Option<f64>,

    /// Weight in kilograms (40-120)
    #[arg(long)]
    weight: Option<f64>,

    /// Gender (male, female)
    #[arg(long)]
    gender: Option<Gender>,

    /// Skin color as #RRGGBB; snapped to the nearest palette tone
    #[arg(long)]
    skin: Option<Rgb>,

    /// Hair type (short, medium, long, curly, bald)
    #[arg(long)]
    hair: Option<HairType>,
}

impl From<ParamArgs> for ParamOverrides {
    fn from(args: ParamArgs) -> Self {
        Self {
            file: args.params,
            height_cm: args.height,
            weight_kg: args.weight,
            gender: args.gender,
            skin_color: args.skin,
            hair_type: args.hair,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the procedural avatar and report its structure and fingerprint
    Build {
        #[command(flatten)]
        params: ParamArgs,

        /// Write the part hierarchy as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Load a glTF/GLB model, normalize it and apply the parameters
    Normalize {
        /// Path to the model file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        params: ParamArgs,

        /// Base scale strategy
        #[arg(long, default_value = "reference_height", value_parser = ["reference_height", "fixed_micro"])]
        strategy: String,

        /// Write the prepared hierarchy as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the customization roles assigned to each part of a model
    Classify {
        /// Path to the model file
        #[arg(short, long)]
        input: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Clamp a parameter set and report every adjustment
    Validate {
        #[command(flatten)]
        params: ParamArgs,

        /// Fail if any field had to be adjusted
        #[arg(long)]
        strict: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Run a headless viewer session
    Session {
        #[command(flatten)]
        params: ParamArgs,

        /// Viewer config JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Model used for the male gender
        #[arg(long)]
        male_model: Option<PathBuf>,

        /// Model used for the female gender
        #[arg(long)]
        female_model: Option<PathBuf>,

        /// Base scale strategy override
        #[arg(long, value_parser = ["reference_height", "fixed_micro"])]
        strategy: Option<String>,

        /// Number of frames to run
        #[arg(long, default_value = "60")]
        frames: usize,

        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        delta: f32,

        /// Flip the gender at this frame
        #[arg(long)]
        switch_gender_at: Option<usize>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Save the parameters as an avatar record
    Save {
        /// Record file
        #[arg(short, long)]
        store: PathBuf,

        #[command(flatten)]
        params: ParamArgs,

        /// Owning account id
        #[arg(long)]
        user: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Load a saved avatar record
    Load {
        /// Record file
        #[arg(short, long)]
        store: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved avatar record
    Delete {
        /// Record file
        #[arg(short, long)]
        store: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Logs go to stderr so `--json` output on stdout stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            params,
            output,
            json,
        } => commands::build::run(&params.into(), output.as_deref(), json),
        Commands::Normalize {
            input,
            params,
            strategy,
            output,
            json,
        } => commands::normalize::parse_strategy(&strategy).and_then(|strategy| {
            commands::normalize::run(&input, &params.into(), strategy, output.as_deref(), json)
        }),
        Commands::Classify { input, json } => commands::classify::run(&input, json),
        Commands::Validate {
            params,
            strict,
            json,
        } => commands::validate::run(&params.into(), strict, json),
        Commands::Session {
            params,
            config,
            male_model,
            female_model,
            strategy,
            frames,
            delta,
            switch_gender_at,
            json,
        } => strategy
            .as_deref()
            .map(commands::normalize::parse_strategy)
            .transpose()
            .and_then(|strategy| {
                let options = commands::session::SessionOptions {
                    config,
                    male_model,
                    female_model,
                    strategy,
                    frames,
                    delta_secs: delta,
                    switch_gender_at,
                };
                commands::session::run(&params.into(), &options, json)
            }),
        Commands::Save {
            store,
            params,
            user,
            json,
        } => commands::save::run(&store, &params.into(), user.as_deref(), json),
        Commands::Load { store, json } => commands::load::run(&store, json),
        Commands::Delete { store, json } => commands::delete::run(&store, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
