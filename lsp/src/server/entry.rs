use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use super::{cli::try_cli_analyze, state::RobsonLanguageServer};

pub async fn run() {
    match try_cli_analyze() {
        Ok(Some(output)) => {
            println!("{output}");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("robson-lsp analyze error: {e:#}");
            std::process::exit(2);
        }
    }

    // stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(RobsonLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
