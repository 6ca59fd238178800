pub mod availability;
pub mod facility;
pub mod reservation;

/// クエリパラメータの時刻は "HH:MM" と "HH:MM:SS" の両方を受け付ける
pub(crate) mod lenient_hour {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer};

    pub fn parse(s: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(s, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        s.map(|s| parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::lenient_hour;
    use chrono::NaiveTime;

    #[test]
    fn hours_parse_with_and_without_seconds() {
        assert_eq!(
            lenient_hour::parse("10:00").unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap()
        );
        assert_eq!(
            lenient_hour::parse("09:30:15").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 15).unwrap()
        );
        assert!(lenient_hour::parse("25:00").is_err());
        assert!(lenient_hour::parse("10").is_err());
    }
}
