use clap::Parser;
use schema_form::cli::commands::{cmd_compare, cmd_parse, cmd_render};
use schema_form::cli::config::{load_config, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Render {
            schema,
            values,
            metrics,
            name,
            compact,
            output,
        } => {
            let output = output.unwrap_or(config.render.output);
            cmd_render(
                &schema,
                values.as_deref(),
                metrics.as_deref(),
                &name,
                compact,
                &output,
                cli.verbose > 0,
            )?;
        }
        Commands::Parse {
            schema,
            submission,
            values,
            name,
            validate,
        } => {
            let ok = cmd_parse(
                &schema,
                &submission,
                values.as_deref(),
                &name,
                validate,
                cli.verbose > 0,
            )?;
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Compare {
            schema,
            left,
            right,
            name,
            diff_metrics,
            output,
        } => {
            let output = output.unwrap_or(config.compare.output);
            cmd_compare(
                &schema,
                left.as_deref(),
                right.as_deref(),
                &name,
                diff_metrics,
                &output,
                cli.verbose > 0,
            )?;
        }
    }

    Ok(())
}
