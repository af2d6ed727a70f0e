use anyhow::{Context, Result};
use markdown_newtab::{Config, MarkdownRenderer, NewTabExtension};
use std::fs;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

/// Reads markdown from input file or stdin.
fn read_input(config: &Config) -> Result<String> {
    match &config.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

/// Writes rendered HTML to output file or stdout.
fn write_output(config: &Config, html: &str) -> Result<()> {
    match &config.output {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Generated: {}", path.display());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("Failed to write stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let extension = NewTabExtension::new(config.decorator_config());
    let renderer = MarkdownRenderer::with_extension(&extension);

    let content = read_input(&config)?;
    let html = renderer.render(&content).context("Failed to render markdown")?;

    write_output(&config, &html)
}
