//! Layout preview
//!
//! Generates one page against a schema file and prints the stored document.
//!
//! ```text
//! layout_preview --schema models.yaml --title "Pricing" --description "our plans"
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use genpage::{ContentSource, FileContentSource, GenerativeContentSource, GenpageConfig};
use genpage_types::{CreateDocumentRequest, ModelSchema, UpdateOperationField};

#[derive(Parser, Debug)]
#[command(name = "layout_preview", about = "Generate a page layout and store it as JSON")]
struct Args {
    /// Content model: a JSON or YAML list of models
    #[arg(long)]
    schema: PathBuf,

    /// Page title
    #[arg(long)]
    title: String,

    /// Page description
    #[arg(long)]
    description: Option<String>,

    /// Model of the created page
    #[arg(long, default_value = "PageLayout")]
    model: String,

    /// YAML config file; the environment is used when absent
    #[arg(long, env = "GENPAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides the configured content directory
    #[arg(long)]
    content_dir: Option<PathBuf>,
}

fn load_schema(path: &PathBuf) -> Result<ModelSchema> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading schema {}", path.display()))?;
    let schema = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&text)?,
        _ => serde_yaml::from_str(&text)?,
    };
    Ok(schema)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GenpageConfig::load(path)?,
        None => GenpageConfig::from_env()?,
    };
    if let Some(dir) = args.content_dir {
        config.content_dir = dir;
    }

    let schema = Arc::new(load_schema(&args.schema)?);
    let page_model = schema
        .get(&args.model)
        .cloned()
        .ok_or_else(|| anyhow!("model '{}' not found in {}", args.model, args.schema.display()))?;

    let files = FileContentSource::new(&config.content_dir, schema.clone());
    let source = GenerativeContentSource::from_config(files, &config)?;
    source.init().await?;

    let mut request = CreateDocumentRequest::new(page_model, schema)
        .with_field("title", UpdateOperationField::string(args.title));
    if let Some(description) = args.description {
        request = request.with_field("description", UpdateOperationField::string(description));
    }

    let document = source.create_document(request).await?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
