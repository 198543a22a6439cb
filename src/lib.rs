extern crate clap;

pub mod config;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod reader;
pub mod services;
pub mod validation;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches};
use std::path::Path;

use config::{ClientSettings, DEFAULT_CONFIG_FILE};
use services::{HttpTransport, MemoryCache, TourismClient};

pub use domain::{
    template::{UriTemplate, Value},
    Catalog, CatalogEntry, ListTerm, Relation,
};
pub use error::{ClientError, Result};
pub use services::{Parameters, ResourceResolver};

fn parameter_arg() -> Arg {
    Arg::new("param")
        .short('p')
        .long("param")
        .value_name("NAME=VALUE")
        .action(ArgAction::Append)
        .help("Template variable binding; JSON arrays and objects become lists and maps")
}

/// Command line definition for the `tourism-client` binary
pub fn build_cli() -> clap::Command {
    clap::Command::new("tourism-client")
        .about("Resolve and call resources of a hypermedia tourism endpoint")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("CONFIG")
                .global(true)
                .help("Path to a YAML or JSON settings file"),
        )
        .arg(
            Arg::new("home")
                .long("home")
                .value_name("HOME_URI")
                .global(true)
                .help("Home URI of the hypermedia document, overrides the settings file"),
        )
        .arg(
            Arg::new("api_version")
                .short('V')
                .long("api-version")
                .value_name("VERSION")
                .global(true)
                .help("API version to use, overrides the settings file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log requests and resolution details"),
        )
        .subcommand(clap::Command::new("resources").about("List resources of the active version"))
        .subcommand(
            clap::Command::new("resolve")
                .about("Print the URI a resource call would use")
                .arg(Arg::new("resource").required(true).value_name("RESOURCE"))
                .arg(parameter_arg()),
        )
        .subcommand(
            clap::Command::new("fetch")
                .about("Call a resource and print the JSON response")
                .arg(Arg::new("resource").required(true).value_name("RESOURCE"))
                .arg(parameter_arg()),
        )
        .subcommand(
            clap::Command::new("expand")
                .about("Expand a URI template locally")
                .arg(Arg::new("template").required(true).value_name("TEMPLATE"))
                .arg(parameter_arg()),
        )
        .subcommand(
            clap::Command::new("check")
                .about("Check URI template syntax")
                .arg(Arg::new("template").required(true).value_name("TEMPLATE")),
        )
}

fn parameters_of(matches: &ArgMatches) -> Result<Parameters> {
    let arguments = matches
        .get_many::<String>("param")
        .into_iter()
        .flatten()
        .map(String::as_str);
    helpers::parameters_from_args(arguments)
}

/// Settings from `--config` (or `tourism.yml` when present), then command line overrides
pub fn load_settings(matches: &ArgMatches) -> anyhow::Result<ClientSettings> {
    let config_path = matches.get_one::<String>("config").map(String::as_str);
    let home = matches.get_one::<String>("home");

    let mut settings = match config_path {
        Some(path) => ClientSettings::load(Path::new(path))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            ClientSettings::load(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => match home {
            Some(home) => ClientSettings::new(home),
            None => bail!("No home URI given; use --home or a settings file"),
        },
    };

    if let Some(home) = home {
        settings.home_uri = home.clone();
    }
    if let Some(version) = matches.get_one::<String>("api_version") {
        settings.version = Some(version.clone());
    }

    settings.validate()?;
    Ok(settings)
}

/// The configured version, else the highest version the catalog lists
pub fn select_version(settings: &ClientSettings, catalog: &Catalog) -> anyhow::Result<String> {
    match settings.version.as_deref() {
        Some(version) => Ok(version.to_string()),
        None => catalog
            .latest_version()
            .map(str::to_string)
            .context("Hypermedia document lists no versions"),
    }
}

/// Run one command line invocation
pub async fn run(matches: ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("expand", sub)) => {
            let template = sub
                .get_one::<String>("template")
                .context("template is required")?;
            let mut uri_template = UriTemplate::new(template);
            for (name, value) in parameters_of(sub)?.iter() {
                uri_template.set(name, value.clone());
            }
            println!("{}", uri_template.build());
            return Ok(());
        }
        Some(("check", sub)) => {
            let template = sub
                .get_one::<String>("template")
                .context("template is required")?;
            let parsed = validation::validate_template(template)?;
            println!("Variables: {}", parsed.variable_names().join(", "));
            return Ok(());
        }
        _ => {}
    }

    let settings = load_settings(&matches)?;
    let transport = HttpTransport::from_settings(&settings)?;
    let cache = MemoryCache::new();
    let mut client = TourismClient::connect(&settings.home_uri, transport, &cache)
        .await
        .with_context(|| format!("Could not load hypermedia document from {}", settings.home_uri))?;

    let version = select_version(&settings, client.resolver().catalog())?;
    tracing::info!(%version, "Using API version");
    client.use_version(&version);

    match matches.subcommand() {
        Some(("resources", _)) => {
            for resource in client.resources()? {
                println!("{}", resource);
            }
        }
        Some(("resolve", sub)) => {
            let resource = sub
                .get_one::<String>("resource")
                .context("resource is required")?;
            let uri = client.resolver().resolve(resource, &parameters_of(sub)?)?;
            println!("{}", uri);
        }
        Some(("fetch", sub)) => {
            let resource = sub
                .get_one::<String>("resource")
                .context("resource is required")?;
            let response = client.fetch(resource, &parameters_of(sub)?).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Some((other, _)) => bail!("Unknown command {}", other),
        None => bail!("A command is required"),
    }

    Ok(())
}
