//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads. Set once in `main` after CLI
//! overrides are applied; read anywhere through [`cfg`].

use crate::config::RainbowConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<RainbowConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(RainbowConfig::default()));

#[inline]
pub fn cfg() -> Arc<RainbowConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: RainbowConfig) -> Arc<RainbowConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
