use std::path::PathBuf;

pub fn get_home_dir() -> Option<PathBuf> {
    home::home_dir().map(|path| path.join(".tor-dns-proxy"))
}

/// `~/.tor-dns-proxy/conf.toml`, when that file exists.
pub fn default_config_file() -> Option<PathBuf> {
    get_home_dir()
        .map(|dir| dir.join("conf.toml"))
        .filter(|path| path.is_file())
}
