#[macro_use]
extern crate rocket;

use rocket::figment::Figment;
use rocket::fs::{FileServer, Options};
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};

mod boot;
mod config;
mod data;
mod dom;
mod page;
mod routes;
mod sidebar;
mod storage;
mod template;
mod toggle;


use config::SiteConfig;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Assemble the server for a site. Fails on unusable configuration.
pub fn build(figment: Figment, config: SiteConfig) -> Result<Rocket<Build>, String> {
    config.data_source()?;
    let static_root = config.site_root.clone();

    Ok(rocket::custom(figment)
        .manage(config)
        .mount("/", routes::routes())
        .mount("/", FileServer::new(static_root, Options::Missing))
        .register("/", catchers![not_found, server_error]))
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let figment = rocket::Config::figment();
    let config = SiteConfig::from_figment(&figment).expect("Failed to read site configuration");

    // Boot check — verify/create the site root, validate pages and data
    boot::run(&config);

    eprintln!("Serving site from: {}", config.site_root.display());

    build(figment, config).expect("Failed to configure site")
}
