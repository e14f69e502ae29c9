//! UTC timestamps in the wire format shared by every scribe output file.

/// Current UTC time as an RFC 3339 string.
///
/// Used for turn record timestamps and diagnostics line prefixes.
#[must_use]
pub fn utc_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_parses_as_rfc3339() {
        let ts = utc_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn timestamp_is_utc() {
        let ts = utc_timestamp();
        assert!(ts.ends_with("+00:00") || ts.ends_with('Z'));
    }
}
