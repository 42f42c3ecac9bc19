//! json-merge: merge same-named JSON files across folders
//!
//! Files from later folders override keys from earlier ones while the
//! first-seen key order is preserved in the output.

use anyhow::Result;

fn main() -> Result<()> {
    json_merge::cli::run()
}
