//! Process-wide default office manager, used by `OnlineConverter::make()`.

use log::{debug, warn};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

use super::OfficeManager;

static INSTALLED: Lazy<RwLock<Option<Arc<dyn OfficeManager>>>> = Lazy::new(|| RwLock::new(None));

/// Install `manager` as the default, returning the one it replaces
pub fn install(manager: Arc<dyn OfficeManager>) -> Option<Arc<dyn OfficeManager>> {
    let previous = INSTALLED.write().replace(manager);
    if previous.is_some() {
        warn!("Replacing the installed office manager");
    } else {
        debug!("Office manager installed");
    }
    previous
}

/// The installed office manager, if any
pub fn instance() -> Option<Arc<dyn OfficeManager>> {
    INSTALLED.read().clone()
}

/// Remove the installed office manager
pub fn uninstall() -> Option<Arc<dyn OfficeManager>> {
    INSTALLED.write().take()
}
