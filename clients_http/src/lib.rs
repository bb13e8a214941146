// reqwest implementations of the users and events service ports

mod events;
mod users;

pub use events::*;
pub use users::*;

use anyhow::{Context, Result};
use url::Url;

/// Base URL of a collaborating service from its HOST_SERVER/HOST_PORT
/// environment variable pair.
pub fn service_url(server_var: &str, port_var: &str) -> Result<Url> {
    let server = std::env::var(server_var)
        .with_context(|| format!("{server_var} must be set. Hint: did you run dotenv()?"))?;
    let port = std::env::var(port_var)
        .with_context(|| format!("{port_var} must be set. Hint: did you run dotenv()?"))?;
    Url::parse(&format!("http://{server}:{port}"))
        .with_context(|| format!("invalid url from {server_var}/{port_var}"))
}
