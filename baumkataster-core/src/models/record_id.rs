use chrono::Utc;

/// Mints a timestamp-based record identifier, e.g. `t-1718000000000`.
///
/// The prefix distinguishes collections (`t` for trees, `m` for meadows).
pub fn mint_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_id_format() {
        let id = mint_id("t");
        let (prefix, millis) = id.split_once('-').unwrap();
        assert_eq!(prefix, "t");
        assert!(millis.parse::<i64>().unwrap() > 0);
    }
}
