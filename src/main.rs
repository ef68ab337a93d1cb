#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    brent_oil_api_lib::run().await
}
