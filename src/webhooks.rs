use rocket::{routes, Build, Rocket};

use crate::config::PrwatchConfig;

pub mod github;
use github::github_webhook;

/// Builds the rocket instance serving the webhook endpoints, with `config` as managed state.
pub fn build_rocket(config: PrwatchConfig) -> Rocket<Build> {
    rocket::build()
        .mount("/", routes![github_webhook])
        .manage(config)
}
