//! Time helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current Unix timestamp (milliseconds, UTC)
pub fn now_unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp in milliseconds to an RFC 3339 string (UTC).
///
/// Out-of-range values fall back to the Unix epoch.
pub fn unix_millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_millis_to_rfc3339() {
        // テスト項目: ミリ秒の Unix タイムスタンプが RFC 3339 (UTC) に変換される
        // given (前提条件):
        let millis = 1_700_000_000_123;

        // when (操作):
        let result = unix_millis_to_rfc3339(millis);

        // then (期待する結果):
        assert_eq!(result, "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn test_unix_millis_to_rfc3339_out_of_range() {
        // テスト項目: 範囲外の値はエポックにフォールバックする
        // when (操作):
        let result = unix_millis_to_rfc3339(i64::MAX);

        // then (期待する結果):
        assert_eq!(result, "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_now_unix_millis_is_monotonic_enough() {
        // テスト項目: 連続して取得した現在時刻が巻き戻らない
        let first = now_unix_millis();
        let second = now_unix_millis();
        assert!(second >= first);
    }
}
