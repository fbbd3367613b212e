//! depmerge: merge nested node_modules file records into one root package

use anyhow::Result;

fn main() -> Result<()> {
    depmerge::cli::run()
}
