use camino::Utf8PathBuf;
use chrono::{Local, NaiveDateTime};
use env_logger::{Builder, Env, Target};

use neowise::{config::NeowiseConfig, neowise::Neowise, neowise_errors::NeowiseError};

fn chart(config: NeowiseConfig, now: NaiveDateTime) -> Result<Utf8PathBuf, NeowiseError> {
    let neowise = Neowise::new(config)?;
    let anchor = neowise.anchor(now)?;

    let record = neowise.fetch_position(&anchor)?;
    println!("{}", record.date.format("%Y-%m-%d %H:%M:%S%.3f"));
    println!("{}", record.ra);
    println!("{}", record.dec);

    neowise.draw(&anchor, &record)
}

pub fn main() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    match chart(NeowiseConfig::default(), Local::now().naive_local()) {
        Ok(path) => println!("{path}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
