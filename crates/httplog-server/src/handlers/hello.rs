/// Handler for `GET /`.
pub async fn hello() -> &'static str {
    "Hello World!"
}
