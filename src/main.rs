#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    pgpeek_lib::run().await
}
