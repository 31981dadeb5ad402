use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use relgen_codegen::Generator;
use relgen_meta::{Config, PgMetadataStore, load_schema};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to relgen.toml (defaults to ./relgen.toml)
    #[arg(short, long, default_value = "relgen.toml")]
    pub config: PathBuf,

    /// Output directory (overrides the configured [app] output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub async fn run(&self) -> Result<()> {
        let config = Config::open(&self.config).unwrap_or_exit();
        let store = PgMetadataStore::connect(&config.database.url)
            .await
            .unwrap_or_exit();
        let graph = load_schema(&store).await.unwrap_or_exit();

        let generator = Generator::new(&graph, &config.packages, &config.app.name);

        if self.dry_run {
            return Self::run_preview(&generator);
        }

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.app.output.clone());
        let summary = generator
            .generate(&output)
            .wrap_err("Failed to generate code")?;

        // Print generation summary
        println!("Entities ({}):", summary.entities.len());
        for name in &summary.entities {
            println!("  {}", name);
        }
        println!();
        println!(
            "{} files written under {}",
            summary.files.len(),
            output.display()
        );
        println!();
        println!("{} generated!!", config.app.name);

        Ok(())
    }

    fn run_preview(generator: &Generator) -> Result<()> {
        let files = generator.preview();

        for file in &files {
            println!("── {} ──", file.path);
            println!("{}", file.content);
        }

        println!("── Summary ──");
        println!("{} files would be generated", files.len());

        Ok(())
    }
}
