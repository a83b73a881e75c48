//! Betting Backend Binary
//!
//! Launch authentication and the betting book API in a single server.
//! Runs on BIND_ADDR (e.g. 0.0.0.0:8888).

#[tokio::main]
async fn main() {
    toto_core::log();
    toto_core::kys();
    toto_server::run().await.unwrap();
}
