//! CLI command implementations

use std::path::PathBuf;

use anyhow::Context;
use repomap_ai::create_provider;
use repomap_scanner::{scan_with_config, ScanConfig};

pub fn scan(path: PathBuf, pretty: bool, top: usize, exclude: Vec<String>) -> anyhow::Result<()> {
    tracing::info!("Scanning repository: {}", path.display());

    let config = ScanConfig {
        hotspot_limit: top,
        extra_excluded_dirs: exclude,
    };
    let result = scan_with_config(&path, &config)
        .with_context(|| format!("failed to scan {}", path.display()))?;

    tracing::info!(
        "Scanned {} files, {} edges",
        result.stats.total_files,
        result.edges.len()
    );

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", json);

    Ok(())
}

pub async fn summarize(file: PathBuf, provider_name: String) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let provider = create_provider(&provider_name, None)?;
    tracing::info!("Summarizing {} via {}", file.display(), provider.name());
    let summary = provider.summarize(&file, &content).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
