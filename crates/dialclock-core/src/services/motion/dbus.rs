use std::ops::Deref;

use masterror::{AppError, AppResult};
use zbus::{
    Result, proxy,
    zvariant::{OwnedValue, Value},
};

pub const INTERFACE_NAMESPACE: &str = "org.gnome.desktop.interface";
pub const ANIMATIONS_KEY: &str = "enable-animations";

pub struct SettingsDbus<'a>(SettingsProxy<'a>);

impl<'a> Deref for SettingsDbus<'a> {
    type Target = SettingsProxy<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl SettingsDbus<'_> {
    pub async fn new(conn: &zbus::Connection) -> AppResult<Self> {
        let settings = SettingsProxy::new(conn)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create SettingsProxy: {e}")))?;

        Ok(Self(settings))
    }

    /// Whether the desktop asks for reduced motion, if it says anything at
    /// all.
    pub async fn reduced_motion(&self) -> AppResult<Option<bool>> {
        let value = match self.read_one(INTERFACE_NAMESPACE, ANIMATIONS_KEY).await {
            Ok(value) => value,
            Err(_) => self.read(INTERFACE_NAMESPACE, ANIMATIONS_KEY).await.map_err(|e| {
                AppError::internal(format!("Failed to read {ANIMATIONS_KEY}: {e}"))
            })?,
        };

        Ok(animations_disabled(&value))
    }
}

pub fn is_animation_setting(namespace: &str, key: &str) -> bool {
    namespace == INTERFACE_NAMESPACE && key == ANIMATIONS_KEY
}

/// Maps the `enable-animations` value to a reduced-motion flag.
///
/// Older portals wrap the value in an extra variant layer.
pub fn animations_disabled(value: &Value<'_>) -> Option<bool> {
    match value {
        Value::Bool(enabled) => Some(!enabled),
        Value::Value(inner) => animations_disabled(inner),
        _ => None,
    }
}

#[proxy(
    interface = "org.freedesktop.portal.Settings",
    default_service = "org.freedesktop.portal.Desktop",
    default_path = "/org/freedesktop/portal/desktop"
)]
pub trait Settings {
    fn read_one(&self, namespace: &str, key: &str) -> Result<OwnedValue>;

    fn read(&self, namespace: &str, key: &str) -> Result<OwnedValue>;

    #[zbus(signal)]
    fn setting_changed(&self, namespace: &str, key: &str, value: Value<'_>) -> Result<()>;
}
