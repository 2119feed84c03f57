use anyhow::Context;
use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the precision the relational backend can store.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub fn to_millis(time: &DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

pub fn from_millis(millis: i64) -> anyhow::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).context("Timestamp out of range")
}

pub fn new_comment_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_round_trip_keeps_now_millis() {
        let now = now_millis();
        assert_eq!(from_millis(to_millis(&now)).unwrap(), now);
    }

    #[test]
    fn out_of_range_millis_is_an_error() {
        assert!(from_millis(i64::MAX).is_err());
    }

    #[test]
    fn comment_ids_are_unique() {
        assert_ne!(new_comment_id(), new_comment_id());
    }
}
