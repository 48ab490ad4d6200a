//! Archive Repertory - CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use archive_repertory::{
    archive::{ArchiveRelocator, DerivativeRegistry, LocalFs},
    cli::{args::build_resource, Args, Command},
    config::{validate_config, Config},
    error::{exit_codes, Error, Result},
    layout::StorageIdBuilder,
    model::Artifact,
    naming::{convert, sanitize, SanitizeOptions},
    output::{print_error, print_info, print_success, print_warning},
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::InvalidName(_) => ExitCode::from(exit_codes::VALIDATION_ERROR as u8),
                Error::SourceMissing(_)
                | Error::RenameFailed { .. }
                | Error::BadDestinationDir(_)
                | Error::Io(_) => ExitCode::from(exit_codes::IO_ERROR as u8),
            }
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Load configuration; `sanitize` works without one
    let config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            args.config.display()
        ));
        print_info("Using default naming options");
        Config::default()
    };

    match args.command {
        Command::Sanitize { name, mode } => {
            let opts = SanitizeOptions {
                keep_parenthesis: config.naming.keep_parenthesis,
                max_len: config.naming.segment_max_len,
            };
            println!("{}", convert(&sanitize(&name, &opts), mode, &opts));
            Ok(())
        }

        Command::StorageId {
            filename,
            media_id,
            item_id,
            values,
            item_set_id,
            set_values,
        } => {
            validate_config(&config)?;
            let registry = DerivativeRegistry::new(config.derivatives.clone())?;

            let item = build_resource(item_id, &values)?;
            let item_set = item_set_id
                .map(|id| build_resource(id, &set_values))
                .transpose()?;

            let extension = Path::new(&filename)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string();
            let artifact = Artifact::new(media_id, filename, extension, "");

            let builder = StorageIdBuilder::new(&config, &registry, &LocalFs);
            let outcome = builder.build(&artifact, &item, item_set.as_ref())?;
            for notice in &outcome.notices {
                print_warning(&notice.to_string());
            }
            println!("{}", outcome.storage_id);
            Ok(())
        }

        Command::Relocate {
            old,
            new,
            extension,
        } => {
            validate_config(&config)?;
            let registry = DerivativeRegistry::new(config.derivatives.clone())?;

            let relocator = ArchiveRelocator::new(&registry, &LocalFs);
            let outcome = relocator.relocate(&old, &new, &extension)?;
            for notice in &outcome.notices {
                print_warning(&notice.to_string());
            }
            print_success(&format!("{} file(s) moved", outcome.moved));
            Ok(())
        }
    }
}
