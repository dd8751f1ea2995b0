//! Validator and change-callback hooks attached to settings
//!
//! Validators run against the raw string before coercion. Callbacks run after
//! a value has been written to the store.

use crate::value::SettingValue;
use std::sync::Arc;

/// Type alias for a validator function
///
/// Receives (`name`, `raw_value`) and returns a message naming the failed rule.
pub type Validator = Arc<dyn Fn(&str, &str) -> Result<(), String> + Send + Sync>;

/// Type alias for a change callback
///
/// Receives (`name`, `old_value`, `new_value`). `old_value` is `None` when the
/// key was not present in the store before the write.
pub type ChangeCallback = Arc<dyn Fn(&str, Option<&SettingValue>, &SettingValue) + Send + Sync>;

/// Run validators in order
///
/// Returns Ok(()) if all validators pass, or Err with the first error message.
pub(crate) fn validate(validators: &[Validator], name: &str, raw: &str) -> Result<(), String> {
    for validator in validators {
        validator(name, raw)?;
    }
    Ok(())
}

/// Notify callbacks about a change
pub(crate) fn notify(
    callbacks: &[ChangeCallback],
    name: &str,
    old_value: Option<&SettingValue>,
    new_value: &SettingValue,
) {
    for callback in callbacks {
        callback(name, old_value, new_value);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_first_failing_validator_wins() {
        let not_empty: Validator = Arc::new(|_name: &str, raw: &str| -> Result<(), String> {
            if raw.is_empty() {
                Err("value cannot be empty".to_string())
            } else {
                Ok(())
            }
        });
        let read_only: Validator = Arc::new(|name: &str, _raw: &str| -> Result<(), String> {
            Err(format!("{name} is read-only"))
        });
        let validators = vec![not_empty, read_only];

        assert_eq!(
            validate(&validators, "vm-driver", ""),
            Err("value cannot be empty".to_string())
        );
        assert_eq!(
            validate(&validators, "vm-driver", "kvm"),
            Err("vm-driver is read-only".to_string())
        );
        assert!(validate(&[], "vm-driver", "").is_ok());
    }

    #[test]
    fn test_notify_calls_every_callback() {
        let counter = Arc::new(AtomicUsize::new(0));
        let first = counter.clone();
        let second = counter.clone();

        let first: ChangeCallback = Arc::new(
            move |_name: &str, old: Option<&SettingValue>, _new: &SettingValue| {
                assert!(old.is_none());
                first.fetch_add(1, Ordering::SeqCst);
            },
        );
        let second: ChangeCallback = Arc::new(
            move |_name: &str, _old: Option<&SettingValue>, new: &SettingValue| {
                assert_eq!(new.as_int(), Some(4));
                second.fetch_add(1, Ordering::SeqCst);
            },
        );
        let callbacks = vec![first, second];

        notify(&callbacks, "cpus", None, &SettingValue::Int(4));

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
