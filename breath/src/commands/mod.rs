mod completions;
mod generate;

use clap::Parser;
use clap_complete::Shell;
use eyre::Result;
use generate::GenerateCommand;
use tracing_subscriber::EnvFilter;

/// Extension trait for exiting on template file errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for breath_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "breath")]
#[command(version)]
#[command(about = "Generate companion code for annotated structs from templates")]
pub(crate) struct Cli {
    #[command(flatten)]
    generate: GenerateCommand,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match self.completions {
            Some(shell) => completions::print_completions(shell),
            None => self.generate.run(),
        }
    }

    /// Install the stderr log subscriber. `RUST_LOG` takes precedence over
    /// `--verbose`.
    pub fn init_tracing(&self) {
        let default = if self.generate.verbose {
            "warn,breath_codegen=debug"
        } else {
            "warn"
        };
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["breath"]).unwrap();
        assert_eq!(cli.generate.dir, Path::new("."));
        assert!(cli.generate.template.is_none());
        assert!(!cli.generate.verbose);
        assert!(!cli.generate.silent);
        assert!(!cli.generate.dry_run);
        assert!(!cli.generate.parallel);
        assert!(cli.completions.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "breath", "-s", "-v", "-j", "--dry-run", "-t", "templates.toml", "models",
        ])
        .unwrap();
        assert_eq!(cli.generate.dir, Path::new("models"));
        assert_eq!(cli.generate.template.as_deref(), Some(Path::new("templates.toml")));
        assert!(cli.generate.verbose);
        assert!(cli.generate.silent);
        assert!(cli.generate.dry_run);
        assert!(cli.generate.parallel);
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["breath", "--completions", "bash"]).unwrap();
        assert_eq!(cli.completions, Some(Shell::Bash));
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
