//! Stock validators
//!
//! Each validator receives (`name`, `raw_value`) and runs before coercion, so
//! numeric validators parse the raw string themselves.
//!
//! ```rust
//! use settings_registry::{Setting, validators};
//!
//! let cpus = Setting::int("cpus").validator(validators::is_positive);
//! let driver = Setting::string("vm-driver")
//!     .validator(validators::is_one_of(&["kvm", "virtualbox"]));
//! ```

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

static DISK_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(\.\d+)?\s?([kKmMgGtTpP][iI]?)?[bB]?$").expect("disk size regex is valid")
});

static HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("url regex is valid"));

/// Accepts integers greater than zero
pub fn is_positive(name: &str, raw: &str) -> Result<(), String> {
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err(format!("{name}: not a positive integer")),
        Err(e) => Err(format!("{name}: {e}")),
    }
}

/// Accepts integers greater than or equal to zero
pub fn is_non_negative(name: &str, raw: &str) -> Result<(), String> {
    match raw.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(()),
        Ok(_) => Err(format!("{name}: must not be negative")),
        Err(e) => Err(format!("{name}: {e}")),
    }
}

/// Accepts one of a fixed set of values (case-sensitive)
pub fn is_one_of(
    options: &[&str],
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + use<> {
    let options: Vec<String> = options.iter().map(|o| (*o).to_string()).collect();
    move |name: &str, raw: &str| {
        if options.iter().any(|o| o == raw) {
            Ok(())
        } else {
            Err(format!(
                "{name}: '{raw}' is not one of: {}",
                options.join(", ")
            ))
        }
    }
}

/// Accepts values matching a regex
///
/// The pattern is compiled once, here.
///
/// # Errors
///
/// Returns the regex error if the pattern does not compile.
pub fn matches_pattern(
    pattern: &str,
) -> Result<impl Fn(&str, &str) -> Result<(), String> + Send + Sync + use<>, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(move |name: &str, raw: &str| {
        if re.is_match(raw) {
            Ok(())
        } else {
            Err(format!("{name}: '{raw}' does not match pattern {}", re.as_str()))
        }
    })
}

/// Accepts human-readable sizes such as `20g`, `2048MB` or `1.5 GiB`
pub fn is_valid_disk_size(name: &str, raw: &str) -> Result<(), String> {
    if DISK_SIZE.is_match(raw) {
        Ok(())
    } else {
        Err(format!("{name}: '{raw}' is not a valid disk size"))
    }
}

/// Accepts CIDR notation such as `172.30.0.0/16` or `fd00::/8`
pub fn is_valid_cidr(name: &str, raw: &str) -> Result<(), String> {
    let invalid = || format!("{name}: '{raw}' is not a valid CIDR");

    let (addr, prefix) = raw.split_once('/').ok_or_else(invalid)?;
    let addr: IpAddr = addr.parse().map_err(|_| invalid())?;
    let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
    let max_prefix = if addr.is_ipv4() { 32 } else { 128 };

    if prefix > max_prefix {
        return Err(invalid());
    }
    Ok(())
}

/// Accepts absolute `http://` or `https://` URLs
pub fn is_valid_url(name: &str, raw: &str) -> Result<(), String> {
    if HTTP_URL.is_match(raw) {
        Ok(())
    } else {
        Err(format!("{name}: '{raw}' is not a valid http(s) URL"))
    }
}

/// Lift a validator over every comma-separated item of a raw list
///
/// Empty input has no items and passes.
pub fn each_item<F>(
    validator: F,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + 'static
where
    F: Fn(&str, &str) -> Result<(), String> + Send + Sync + 'static,
{
    move |name: &str, raw: &str| {
        if raw.is_empty() {
            return Ok(());
        }
        raw.split(',').try_for_each(|item| validator(name, item))
    }
}
