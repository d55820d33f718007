use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    redirect_url: String,
    redirect_key: String,
    redirect_delay_ms: u32,
    exit_threshold: f32,
    gravity_scale: f32,
    max_tilt_deg: f32,
    friction: f32,
    max_dt_ms: f64,
    shake_threshold: f64,
    shake_cooldown_ms: f64,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            redirect_url: "https://www.thebelgiantouch.com".to_string(),
            redirect_key: "tbt_redirected".to_string(),
            redirect_delay_ms: 2000,
            exit_threshold: 48.0,
            gravity_scale: 2400.0,
            max_tilt_deg: 45.0,
            friction: 0.98,
            max_dt_ms: 50.0,
            shake_threshold: 18.0,
            shake_cooldown_ms: 350.0,
        }
    }
}

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=WIDGET_CONFIG_PATH");
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    let config_path = resolve_config_path(workspace_root);
    println!("cargo:rerun-if-changed={}", config_path.display());

    let config = if config_path.exists() {
        let contents = fs::read_to_string(&config_path).unwrap_or_else(|err| {
            panic!(
                "failed to read widget config at {}: {err}",
                config_path.display()
            )
        });
        toml::from_str::<ConfigFile>(&contents).unwrap_or_else(|err| {
            panic!(
                "failed to parse widget config at {}: {err}",
                config_path.display()
            )
        })
    } else {
        println!(
            "cargo:warning=widget config {} not found, using built-in defaults",
            config_path.display()
        );
        ConfigFile::default()
    };

    validate(&config, &config_path);

    let mut output = String::new();
    writeln!(
        &mut output,
        "pub const DEFAULT_REDIRECT_URL: &str = {};",
        rust_string(&config.redirect_url)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const DEFAULT_REDIRECT_KEY: &str = {};",
        rust_string(&config.redirect_key)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const DEFAULT_REDIRECT_DELAY_MS: u32 = {};",
        config.redirect_delay_ms
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const DEFAULT_EXIT_THRESHOLD: f32 = {:?};",
        config.exit_threshold
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const DEFAULT_GRAVITY_SCALE: f32 = {:?};",
        config.gravity_scale
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const DEFAULT_MAX_TILT_DEG: f32 = {:?};",
        config.max_tilt_deg
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const DEFAULT_FRICTION: f32 = {:?};",
        config.friction
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const DEFAULT_MAX_DT_MS: f64 = {:?};",
        config.max_dt_ms
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const DEFAULT_SHAKE_THRESHOLD: f64 = {:?};",
        config.shake_threshold
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const DEFAULT_SHAKE_COOLDOWN_MS: f64 = {:?};",
        config.shake_cooldown_ms
    )
    .unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("widget_defaults.rs");
    fs::write(&out_path, output)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_path.display()));
}

fn resolve_config_path(workspace_root: &Path) -> PathBuf {
    let env_value = env::var("WIDGET_CONFIG_PATH").ok();
    let raw_path = match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => workspace_root.join("widget.toml"),
    };
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

fn validate(config: &ConfigFile, config_path: &Path) {
    let url = config.redirect_url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        panic!(
            "redirect_url '{}' must be an http(s) URL in {}",
            config.redirect_url,
            config_path.display()
        );
    }
    if config.redirect_key.trim().is_empty() {
        panic!("redirect_key cannot be empty in {}", config_path.display());
    }
    let positive = [
        ("exit_threshold", config.exit_threshold as f64),
        ("gravity_scale", config.gravity_scale as f64),
        ("max_tilt_deg", config.max_tilt_deg as f64),
        ("max_dt_ms", config.max_dt_ms),
        ("shake_threshold", config.shake_threshold),
    ];
    for (name, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            panic!(
                "{name} must be a positive number (got {value}) in {}",
                config_path.display()
            );
        }
    }
    if !(config.friction > 0.0 && config.friction <= 1.0) {
        panic!(
            "friction must be in (0, 1] (got {}) in {}",
            config.friction,
            config_path.display()
        );
    }
    if !config.shake_cooldown_ms.is_finite() || config.shake_cooldown_ms < 0.0 {
        panic!(
            "shake_cooldown_ms cannot be negative (got {}) in {}",
            config.shake_cooldown_ms,
            config_path.display()
        );
    }
}
