use sure_scout::stdio_service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries JSON-RPC; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    // MCP hosts may probe stdio servers with `--version`/`--help` before
    // opening a session; answer those without starting the transport.
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("sure-scout-mcp {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("sure-scout-mcp (MCP stdio server); usage: sure-scout-mcp [--version|--help]");
        return Ok(());
    }
    stdio_service::run().await
}
