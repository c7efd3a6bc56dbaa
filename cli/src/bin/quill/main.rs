mod http;
mod shell;

use std::path::PathBuf;
use std::time::Duration;

use log::*;
use anyhow::*;
use clap::{Arg, Command};
use tracing_subscriber::EnvFilter;

use quill::config::Config;
use quill::controller::Controller;
use quill::credential::FsCredentialStore;
use quill::session::Session;

pub fn main() -> Result<()> {
	let app = Command::new("quill")
		.about("Log in to an articles server and manage your articles")
		.arg(Arg::new("server").long("server").takes_value(true)
			.value_parser(clap::value_parser!(String))
			.help("Base address of the API (overrides QUILL_SERVER and the config file)"))
		.arg(Arg::new("session").long("session").takes_value(true)
			.value_parser(clap::value_parser!(PathBuf))
			.help("File holding the session token"))
		.arg(Arg::new("verbose").long("verbose").short('v'))
	;

	let opts = app.get_matches();
	init_logging(opts.contains_id("verbose"));
	debug!("cli opts: {:?}", &opts);

	let mut config = Config::load_user()?;
	if let Some(server) = opts.get_one::<String>("server") {
		config = config.with_base_url(server);
	}
	info!("Using server {}", &config.base_url);

	let store = match opts.get_one::<PathBuf>("session") {
		Some(path) => FsCredentialStore::new(path.to_owned()),
		None => FsCredentialStore::user_default(),
	};
	let controller = Controller::new(&config, Box::new(store));
	let session = Session::new(controller, http::UreqTransport::new(Duration::from_secs(30)))
		.on_request(|state| shell::loading_indicator(state.busy));

	shell::Shell::new(session).run()
}

fn init_logging(verbose: bool) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
