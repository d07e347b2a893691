#[tokio::main]
async fn main() {
    vagas_planner::run().await;
}
