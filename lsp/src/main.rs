#[tokio::main]
async fn main() {
    robson_lsp::run().await;
}
