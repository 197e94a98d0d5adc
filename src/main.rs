use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use jmx_migrate::{run_batch, Ordering, Settings, Strategy};

#[derive(Parser, Debug)]
#[command(name = "jmx-migrate")]
#[command(about = "Convert legacy Java agent JMX definitions into JMX collection files")]
struct Args {
    /// Legacy definition files (absolute paths, comma separated or repeated).
    /// Use "-" to read standard input.
    #[arg(required = true, value_delimiter = ',')]
    files: Vec<PathBuf>,

    /// Settings file (YAML or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print converted documents instead of writing <file><suffix>
    #[arg(long)]
    stdout: bool,

    /// Convert each declaration separately instead of merging
    #[arg(long)]
    flat: bool,

    /// Sort domains, queries and attributes by name
    #[arg(long)]
    sort: bool,

    /// Warn when a domain collects more attributes than this (0 disables)
    #[arg(long)]
    metric_limit: Option<usize>,

    /// Suffix appended to each input path to name its output
    #[arg(long)]
    suffix: Option<String>,

    /// Accept relative definition paths
    #[arg(long)]
    allow_relative: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so converted documents can be piped from stdout
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(&args)?;

    let summary = run_batch(&args.files, &settings, args.stdout)
        .context("Failed to convert collection definitions")?;

    info!(
        "Converted {} file(s), {} attributes in total",
        summary.len(),
        summary.total_attributes()
    );
    Ok(())
}

/// Layer command-line flags over file and environment settings.
fn load_settings(args: &Args) -> Result<Settings> {
    let settings = Settings::load(args.config.as_deref())
        .with_context(|| match &args.config {
            Some(path) => format!("Failed to load settings from {}", path.display()),
            None => "Failed to load settings from environment".to_string(),
        })?;

    let settings = apply_overrides(settings, args);
    settings.validate().context("Invalid command-line settings")?;
    Ok(settings)
}

fn apply_overrides(mut settings: Settings, args: &Args) -> Settings {
    if args.flat {
        settings.strategy = Strategy::Flat;
    }
    if args.sort {
        settings.ordering = Ordering::Sorted;
    }
    if let Some(limit) = args.metric_limit {
        settings.metric_limit = limit;
    }
    if let Some(ref suffix) = args.suffix {
        settings.output_suffix = suffix.clone();
    }
    if args.allow_relative {
        settings.allow_relative_paths = true;
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("jmx-migrate").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings {
            metric_limit: 50,
            output_suffix: ".collect".to_string(),
            ..Default::default()
        };
        let args = parse(&[
            "--flat",
            "--sort",
            "--metric-limit",
            "0",
            "--suffix",
            ".out",
            "--allow-relative",
            "/etc/jmx.yml",
        ]);

        let settings = apply_overrides(settings, &args);
        assert_eq!(settings.strategy, Strategy::Flat);
        assert_eq!(settings.ordering, Ordering::Sorted);
        assert_eq!(settings.metric_limit, 0);
        assert_eq!(settings.output_suffix, ".out");
        assert!(settings.allow_relative_paths);
    }

    #[test]
    fn test_absent_flags_keep_settings() {
        let settings = Settings {
            metric_limit: 50,
            allow_relative_paths: true,
            ..Default::default()
        };
        let args = parse(&["/etc/jmx.yml"]);

        let settings = apply_overrides(settings, &args);
        assert_eq!(settings.metric_limit, 50);
        assert_eq!(settings.output_suffix, ".new");
        assert!(settings.allow_relative_paths);
    }

    #[test]
    fn test_files_split_on_commas() {
        let args = parse(&["/a.yml,/b.yml", "-"]);
        assert_eq!(
            args.files,
            vec![
                PathBuf::from("/a.yml"),
                PathBuf::from("/b.yml"),
                PathBuf::from("-")
            ]
        );
    }

    #[test]
    fn test_load_settings_layers_flags_over_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "metric_limit: 50\ndefault_event_type: FromFile").unwrap();
        let config = file.path().to_string_lossy().into_owned();

        let args = parse(&["--config", &config, "--metric-limit", "10", "/etc/jmx.yml"]);
        let settings = load_settings(&args).unwrap();
        assert_eq!(settings.metric_limit, 10);
        assert_eq!(settings.default_event_type, "FromFile");
    }

    #[test]
    fn test_empty_suffix_flag_is_rejected() {
        let args = parse(&["--suffix", "", "/etc/jmx.yml"]);
        assert!(load_settings(&args).is_err());
    }
}
