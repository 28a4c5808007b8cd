use std::fs::{self, OpenOptions};
use std::path::Path;
use env_logger::{Builder, Env, Target};
use reverie_core::config::SystemConfig;
use crate::config_gen;

pub const CONFIG_PATH: &str = "config.toml";
const LOG_FILE: &str = "reverie.log";

pub fn init() {
    config_gen::ensure_config_exists(CONFIG_PATH);

    if let Err(e) = reverie_shared::config::init(CONFIG_PATH) {
        eprintln!("Config load warning: {}", e);
    }

    init_logger(&SystemConfig::from_global());
}

// The terminal belongs to the dialogue, so records go to the log file and
// only reach stderr when the file cannot be opened.
fn init_logger(sys_cfg: &SystemConfig) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(&sys_cfg.log_level));

    let log_file_path = Path::new(&sys_cfg.log_path).join(LOG_FILE);
    let opened = fs::create_dir_all(&sys_cfg.log_path)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&log_file_path));
    match opened {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_file_path, e);
            builder.target(Target::Stderr);
        }
    }

    builder.init();
}
