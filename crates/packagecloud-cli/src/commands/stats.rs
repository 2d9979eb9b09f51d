//! `packagecloud stats` command implementation.

use packagecloud_core::error::PackagecloudResult;
use packagecloud_core::types::PackageDownloads;

use super::{find_packages, CommandContext};

/// Optional `YYYYMMDDZ` bounds for the statistics
#[derive(Debug, Clone, Default)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Execute the `packagecloud stats` command
pub async fn execute(
    target: &str,
    query: &str,
    version: Option<&str>,
    range: &DateRange,
    detail: bool,
    ctx: &CommandContext,
) -> PackagecloudResult<()> {
    let start = range.start.as_deref();
    let end = range.end.as_deref();

    for package in find_packages(target, query, version, ctx).await? {
        if detail {
            for record in ctx.client.download_details(&package, start, end).await? {
                ctx.output.data(&format_record(&package.filename, &record));
            }
        } else {
            let count = ctx.client.download_count(&package, start, end).await?;
            ctx.output.data(&format!("{} {}", package.filename, count.value));
        }
    }
    Ok(())
}

/// `filename downloaded_at ip_address user_agent source`, `-` for unknowns
pub fn format_record(filename: &str, record: &PackageDownloads) -> String {
    format!(
        "{} {} {} {} {}",
        filename,
        record.downloaded_at.to_rfc3339(),
        record.ip_address.as_deref().unwrap_or("-"),
        record.user_agent.as_deref().unwrap_or("-"),
        record.source.as_deref().unwrap_or("-"),
    )
}
