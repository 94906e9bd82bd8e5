use std::path::PathBuf;

use breath_manifest::{DEFAULT_TEMPLATE_FILE, TemplateFile};
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Directory whose `*.rs` files are scanned (non-recursive)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Suppress the summary line
    #[arg(short, long)]
    pub silent: bool,

    /// Print per-file progress and skip diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Template file (defaults to <DIR>/gen.yml)
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Preview generated files without writing or deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Process files on a worker pool
    #[arg(short = 'j', long)]
    pub parallel: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let template_path = self.template_path();
        let templates = TemplateFile::from_file(&template_path).unwrap_or_exit();

        let report = ops::generate(
            &templates,
            ops::generate::GenerateOptions {
                dir: &self.dir,
                template_path: &template_path,
                codegen: breath_codegen::GenerateOptions {
                    verbose: self.verbose,
                    silent: self.silent,
                    dry_run: self.dry_run,
                    parallel: self.parallel,
                },
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    fn template_path(&self) -> PathBuf {
        self.template
            .clone()
            .unwrap_or_else(|| self.dir.join(DEFAULT_TEMPLATE_FILE))
    }
}
