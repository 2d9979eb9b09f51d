//! `packagecloud distro` command implementation.
//!
//! Prints the distribution catalog, one ecosystem of it, or the versions of
//! a single distribution as JSON.

use packagecloud_core::error::{PackagecloudError, PackagecloudResult};
use packagecloud_core::types::{Distributions, Ecosystem};

use super::CommandContext;

/// Execute the `packagecloud distro` command
pub async fn execute(
    ecosystem: Option<Ecosystem>,
    name: Option<&str>,
    ctx: &CommandContext,
) -> PackagecloudResult<()> {
    let catalog = ctx.client.distributions().await?;
    ctx.output.data(&render(catalog, ecosystem, name)?);
    Ok(())
}

/// Render the selected part of the catalog as compact JSON
pub fn render(
    catalog: &Distributions,
    ecosystem: Option<Ecosystem>,
    name: Option<&str>,
) -> PackagecloudResult<String> {
    let rendered = match (ecosystem, name) {
        (None, _) => serde_json::to_string(catalog),
        (Some(ecosystem), None) => serde_json::to_string(catalog.for_ecosystem(ecosystem)),
        (Some(ecosystem), Some(name)) => {
            let distribution = catalog.find(ecosystem, name).ok_or_else(|| {
                PackagecloudError::invalid_argument(format!("unknown distribution: {} {}", ecosystem, name))
            })?;
            serde_json::to_string(&distribution.versions)
        }
    };

    rendered.map_err(|e| PackagecloudError::decode(format!("encode distributions: {}", e), e))
}
