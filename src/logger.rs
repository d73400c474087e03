use std::path::Path;

use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

const CONFIG_FILE: &str = "log4rs.yaml";
const STDERR_APPENDER: &str = "stderr";

#[ctor::ctor]
fn init() {
    if Path::new(CONFIG_FILE).is_file()
        && log4rs::init_file(CONFIG_FILE, Default::default()).is_ok()
    {
        return;
    }
    if let Some(config) = default_config() {
        // a logger installed by the host process wins
        let _ = log4rs::init_config(config);
    }
}

fn default_config() -> Option<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {t} - {m}{n}")))
        .build();
    Config::builder()
        .appender(Appender::builder().build(STDERR_APPENDER, Box::new(stderr)))
        .build(Root::builder().appender(STDERR_APPENDER).build(LevelFilter::Warn))
        .ok()
}
