use anyhow::{Context, Result};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};

use crate::parse::parse_hotkey;

/// Owns the registration of the translate hotkey
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
    spec: String,
}

impl HotkeyManager {
    /// Register a hotkey given as a string, e.g. `ctrl+shift+t`
    pub fn new(spec: &str) -> Result<Self> {
        let hotkey = parse_hotkey(spec)?;
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        manager
            .register(hotkey)
            .with_context(|| format!("Failed to register hotkey {spec}"))?;

        tracing::info!("Hotkey registered: {}", spec.to_uppercase());

        Ok(Self {
            manager,
            hotkey,
            spec: spec.to_string(),
        })
    }

    /// Replace the registered hotkey, the old one stays active if the new one fails
    pub fn rebind(&mut self, spec: &str) -> Result<()> {
        let hotkey = parse_hotkey(spec)?;

        self.manager
            .register(hotkey)
            .with_context(|| format!("Failed to register hotkey {spec}"))?;
        let _ = self.manager.unregister(self.hotkey);

        tracing::info!("Hotkey changed: {} -> {}", self.spec, spec);
        self.hotkey = hotkey;
        self.spec = spec.to_string();
        Ok(())
    }

    /// Check if hotkey was pressed (non-blocking)
    pub fn poll(&self) -> bool {
        let receiver = GlobalHotKeyEvent::receiver();
        let mut pressed = false;
        while let Ok(event) = receiver.try_recv() {
            if self.matches(&event) {
                pressed = true;
            }
        }
        pressed
    }

    pub fn spec(&self) -> &str {
        &self.spec
    }

    fn matches(&self, event: &GlobalHotKeyEvent) -> bool {
        let is_match = event.id == self.hotkey.id() && event.state == HotKeyState::Pressed;
        if !is_match {
            tracing::trace!("Ignoring hotkey event {:?}", event.id);
        }
        is_match
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.hotkey);
    }
}
