use anyhow::Result;
use clap::Parser;
use pbj::App;

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();
    app.init_tracing();
    app.run().await
}
