//! Entry point for the **sstswitch** demo.
//!
//! Loads the switch list from `$XDG_CONFIG_HOME/sstswitch/config.json`
//! (falling back to the built-in demo set) and hands it to a host.
//!
//! When the `demo-gtk` feature is enabled the main thread runs the GLib
//! main loop and shows a window.  Without the feature, touch events are
//! read as JSON lines from stdin (see [`sstswitch::host::headless`]).

use log::{error, info, warn};
use sstswitch::config::Config;
use std::path::{Path, PathBuf};

/// Where the demo keeps its files: `$XDG_CONFIG_HOME/sstswitch`, else
/// `~/.config/sstswitch`.
fn settings_dir() -> PathBuf {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
            .join(".config"),
    };
    base.join("sstswitch")
}

/// The configured switches, or the demo set when there is no usable file.
fn read_settings(dir: &Path) -> Config {
    let path = dir.join("config.json");
    if !path.is_file() {
        info!("{} absent, showing the demo switches", path.display());
        return Config::default();
    }
    Config::load(&path).unwrap_or_else(|e| {
        warn!("{}; showing the demo switches", e);
        Config::default()
    })
}

//  Main

fn main() {
    env_logger::init();

    let dir = settings_dir();
    let config = read_settings(&dir);
    info!("{} switch(es) configured", config.switches.len());

    if let Err(e) = run(config, &dir) {
        error!("{}", e);
        std::process::exit(1);
    }
}

//  Hosts

#[cfg(feature = "demo-gtk")]
fn run(config: Config, dir: &Path) -> Result<(), sstswitch::host::HostError> {
    sstswitch::host::gtk::run_main_loop(config, Some(dir.join("style.css")), dir)
}

#[cfg(not(feature = "demo-gtk"))]
fn run(config: Config, _dir: &Path) -> Result<(), sstswitch::host::HostError> {
    use sstswitch::host::headless::HeadlessHost;

    info!("sstswitch running headless, reading events from stdin");
    let mut host = HeadlessHost::new(config.build_switches());
    let stdin = std::io::stdin();
    let toggles = host.run(stdin.lock())?;
    info!("input closed after {} toggle(s), exiting", toggles);
    Ok(())
}
