use std::fmt::Display;

use log::warn;

/// Failures of background requests end here: logged to the console, never
/// shown to the user.
pub fn recover_default_and_log_err<T: Default, E: Display>(context: &str, result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!("{context}: {err}");
            T::default()
        }
    }
}
