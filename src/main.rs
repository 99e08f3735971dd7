use std::env;
use std::process;

use ant_tour::Config;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::build(env::args()).unwrap_or_else(|err| {
        println!("Problem parsing arguments: {err}");
        process::exit(1);
    });

    if let Err(e) = ant_tour::run(&config) {
        println!("Application error: {e}");
        process::exit(1);
    };
}
