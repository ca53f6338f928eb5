//! Feature flag handling for the Assistify application.
//!
//! Features are toggled in two ways:
//!
//! 1. Compile-time feature flags using `#[cfg(feature = "...")]`
//!    (currently only `openapi`)
//! 2. Runtime flags from configuration (`use_calendar` plus the presence of
//!    the matching config section)
//!
//! This module provides helper functions for the runtime checks.

use assistify_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// A feature counts as enabled when its `use_*` flag is set and its
/// configuration section is present.
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the calendar feature is enabled at runtime.
pub fn is_calendar_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_calendar, config.calendar.as_ref())
}
