//! Web server command

use std::path::Path;

use anyhow::Result;
use tracing::warn;

use super::open_db;

pub async fn cmd_serve(db_path: &Path, host: &str, port: u16, no_auth: bool) -> Result<()> {
    let db = open_db(db_path)?;

    println!("🚀 Starting Fisc server at http://{}:{}", host, port);
    if no_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    let config = fisc_server::ServerConfig {
        require_auth: !no_auth,
        ..Default::default()
    };

    fisc_server::serve_with_config(db, host, port, config).await
}
