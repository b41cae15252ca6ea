use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_termtunes_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TERMTUNES_CONFIG_PATH", "/tmp/termtunes-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/termtunes-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("termtunes")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("termtunes")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[appearance]
theme = "Amber Terminal"

[audio]
volume = 40

[columns]
year = true
path = true
album = false

[library]
paths = ["/music", "/more-music"]
active_path = "/more-music"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TERMTUNES_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TERMTUNES__AUDIO__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.appearance.theme, "Amber Terminal");
    assert_eq!(s.audio.volume, 40);
    assert!(s.columns.year);
    assert!(s.columns.path);
    assert!(!s.columns.album);
    assert_eq!(
        s.library.paths,
        vec!["/music".to_string(), "/more-music".to_string()]
    );
    assert_eq!(s.library.active_path.as_deref(), Some("/more-music"));
    s.validate().unwrap();
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 40
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TERMTUNES_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TERMTUNES__AUDIO__VOLUME", "15");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.volume, 15);
}

#[test]
fn save_then_load_round_trips() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("nested").join("config.toml");
    let _g1 = EnvGuard::set("TERMTUNES_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TERMTUNES__AUDIO__VOLUME");

    let mut s = Settings::default();
    s.appearance.theme = "Classic DOS".to_string();
    s.audio.volume = 65;
    s.library.paths = vec!["/music".to_string()];
    s.library.active_path = Some("/music".to_string());
    s.save().unwrap();

    let loaded = Settings::load().unwrap();
    assert_eq!(loaded.appearance.theme, "Classic DOS");
    assert_eq!(loaded.audio.volume, 65);
    assert_eq!(loaded.library.active_path.as_deref(), Some("/music"));
}

#[test]
fn validate_rejects_out_of_range_volume_and_dangling_active_path() {
    let mut s = Settings::default();
    s.audio.volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.active_path = Some("/nowhere".to_string());
    assert!(s.validate().is_err());

    assert!(Settings::default().validate().is_ok());
}

#[test]
fn default_columns_match_the_compact_table() {
    let visible = ColumnSettings::default().visible();
    assert_eq!(
        visible,
        vec![
            Column::Track,
            Column::Title,
            Column::Artist,
            Column::Album,
            Column::Time,
        ]
    );
}
