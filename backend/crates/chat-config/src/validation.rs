use crate::{ConfigError, ConfigErrorResult};

use std::fmt::Display;

/// Inclusive range check reported as `section.key`.
pub(crate) fn check_range<T>(
    section: &'static str,
    key: &str,
    value: T,
    (min, max): (T, T),
) -> ConfigErrorResult<()>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(ConfigError::invalid(
            section,
            format!("{section}.{key} must be {min}-{max}, got {value}"),
        ));
    }
    Ok(())
}

/// `longer` must strictly exceed `shorter`; both are `section` keys.
pub(crate) fn check_exceeds(
    section: &'static str,
    (longer_key, longer): (&str, u64),
    (shorter_key, shorter): (&str, u64),
) -> ConfigErrorResult<()> {
    if longer <= shorter {
        return Err(ConfigError::invalid(
            section,
            format!(
                "{section}.{longer_key} ({longer}) must be greater than {shorter_key} ({shorter})"
            ),
        ));
    }
    Ok(())
}
