use chrono::{DateTime, Utc};

/// Second-resolution timestamp used to name training jobs and uploads.
pub fn second_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d-%H-%M-%S").to_string()
}

pub fn generate_unique_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn second_timestamp_formats_to_second_granularity() {
        let at = Utc.with_ymd_and_hms(2023, 4, 7, 16, 5, 9).unwrap();
        assert_eq!(second_timestamp(at), "2023-04-07-16-05-09");
    }
}
