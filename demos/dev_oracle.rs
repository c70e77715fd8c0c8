//! Runs the reference oracle server with permissive auth.
//!
//! ```sh
//! cargo run --example dev_oracle --features "server,mock"
//! ```

use timecard::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let app = TimecardServer::default().build(AllowAllAuth);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    println!("oracle listening on http://0.0.0.0:3000 (any token accepted)");
    axum::serve(listener, app).await?;

    Ok(())
}
