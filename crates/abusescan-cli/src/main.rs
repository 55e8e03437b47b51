//! abusescan - check a list of hosts against AbuseIPDB.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    abusescan_cli::run().await
}
