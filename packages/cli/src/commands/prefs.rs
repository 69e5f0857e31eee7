use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use vinyl_editor::{JsonFileStorage, PageBuilderStore, PreviewDevice, UiPreferences};

#[derive(Args, Debug, Default)]
pub struct PrefsArgs {
    /// Preview device (desktop, tablet, mobile)
    #[arg(long)]
    pub device: Option<PreviewDevice>,

    /// Show the sidebar
    #[arg(long)]
    pub sidebar: Option<bool>,

    /// Live preview while editing
    #[arg(long)]
    pub preview: Option<bool>,

    /// Auto-save while editing
    #[arg(long)]
    pub autosave: Option<bool>,
}

pub fn prefs(args: PrefsArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let preferences = apply_prefs(&args, &config, cwd);

    let (width, height) = preferences.preview_device.dimensions();
    println!("{}", "UI preferences".bright_white().bold());
    println!("   Preview device: {} ({}x{})", preferences.preview_device, width, height);
    println!("   Sidebar open:   {}", on_off(preferences.sidebar_open));
    println!("   Live preview:   {}", on_off(preferences.show_real_time_preview));
    println!("   Auto-save:      {}", on_off(preferences.auto_save_enabled));

    Ok(())
}

/// Route updates through the store so they are written the same way an editor session writes them
pub(crate) fn apply_prefs(args: &PrefsArgs, config: &Config, cwd: &str) -> UiPreferences {
    let mut store = PageBuilderStore::builder()
        .preference_storage(JsonFileStorage::new(config.get_preferences_path(cwd)))
        .build();

    if let Some(device) = args.device {
        store.set_preview_device(device);
    }
    if let Some(open) = args.sidebar {
        store.set_sidebar_open(open);
    }
    if let Some(show) = args.preview {
        store.set_show_real_time_preview(show);
    }
    if let Some(enabled) = args.autosave {
        store.set_auto_save_enabled(enabled);
    }

    *store.preferences()
}

fn on_off(value: bool) -> colored::ColoredString {
    if value {
        "on".green()
    } else {
        "off".dimmed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefs_persist_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let config = Config::default();

        let updated = apply_prefs(
            &PrefsArgs {
                device: Some(PreviewDevice::Mobile),
                autosave: Some(true),
                ..PrefsArgs::default()
            },
            &config,
            &cwd,
        );
        assert_eq!(updated.preview_device, PreviewDevice::Mobile);

        let reloaded = apply_prefs(&PrefsArgs::default(), &config, &cwd);
        assert_eq!(reloaded, updated);
        assert!(reloaded.auto_save_enabled);
        assert!(reloaded.sidebar_open);
        assert!(dir.path().join(".vinyl/preferences.json").exists());
    }
}
