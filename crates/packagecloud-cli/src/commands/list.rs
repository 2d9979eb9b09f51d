//! `packagecloud list` command implementation.

use packagecloud_core::error::PackagecloudResult;
use packagecloud_core::types::PackageDetail;

use super::{find_packages, CommandContext};

/// Execute the `packagecloud list` command
pub async fn execute(
    target: &str,
    query: &str,
    version: Option<&str>,
    ctx: &CommandContext,
) -> PackagecloudResult<()> {
    for detail in find_packages(target, query, version, ctx).await? {
        ctx.output.data(&format_listing(&detail));
    }
    Ok(())
}

/// `distro_version filename name version`
pub fn format_listing(detail: &PackageDetail) -> String {
    format!(
        "{} {} {} {}",
        detail.distro_version, detail.filename, detail.name, detail.version
    )
}
