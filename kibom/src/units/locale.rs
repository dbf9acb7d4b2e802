//! Decimal separator detection from the process locale.
//!
//! Rust's standard library exposes no `localeconv()`, so the separator is
//! derived from the locale *name* found in the environment, using the same
//! precedence as POSIX (`LC_ALL` > `LC_NUMERIC` > `LANG`).

use std::sync::OnceLock;

/// Languages whose conventional decimal separator is a comma.
const DECIMAL_COMMA_LANGUAGES: &[&str] = &[
    "af", "az", "be", "bg", "bs", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fo",
    "fr", "gl", "hr", "hu", "hy", "id", "is", "it", "ka", "kk", "ky", "lt", "lv", "mk", "mn",
    "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sq", "sr", "sv", "tr", "uk",
    "uz", "vi",
];

/// Regions that use a decimal point even though their language usually does not.
const DECIMAL_POINT_REGIONS: &[&str] = &["de_CH", "it_CH", "fr_CH", "es_MX", "es_US", "pt_MO"];

static DECIMAL_POINT: OnceLock<char> = OnceLock::new();

/// Decimal separator of the current process locale.
///
/// The environment is only consulted on the first call; later calls return
/// the cached character.
pub fn decimal_point() -> char {
    *DECIMAL_POINT.get_or_init(|| {
        let locale = ["LC_ALL", "LC_NUMERIC", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_default();
        let point = decimal_point_for(&locale);
        tracing::debug!("Locale {:?} uses decimal separator {:?}", locale, point);
        point
    })
}

/// Decimal separator for a locale name such as `de_DE.UTF-8` or `C`.
pub fn decimal_point_for(locale: &str) -> char {
    // Strip codeset and modifier: "de_DE.UTF-8@euro" -> "de_DE"
    let name = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default();

    if name.is_empty() || name == "C" || name == "POSIX" {
        return '.';
    }
    if DECIMAL_POINT_REGIONS.contains(&name) {
        return '.';
    }

    let language = name.split(['_', '-']).next().unwrap_or_default();
    let language = language.to_ascii_lowercase();
    if DECIMAL_COMMA_LANGUAGES.contains(&language.as_str()) {
        ','
    } else {
        '.'
    }
}
