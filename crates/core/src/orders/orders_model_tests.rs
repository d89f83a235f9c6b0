#[cfg(test)]
mod tests {
    use crate::orders::{Province, ORDER_DATE_FORMAT};
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[test]
    fn test_province_round_trips_through_its_code() {
        let codes = ["ON", "QC", "NS", "NB", "MB", "BC", "PE", "SK", "AB", "NL"];
        for code in codes {
            let province = Province::from_str(code).unwrap();
            assert_eq!(province.to_string(), code);
        }
    }

    #[test]
    fn test_province_parse_ignores_case_and_whitespace() {
        assert_eq!(Province::from_str(" on ").unwrap(), Province::On);
        assert_eq!(Province::from_str("qc").unwrap(), Province::Qc);
    }

    #[test]
    fn test_unknown_province_code_is_rejected() {
        let err = Province::from_str("ZZ").unwrap_err();
        assert!(err.to_string().contains("ZZ"));
    }

    #[test]
    fn test_province_serializes_as_uppercase_code() {
        assert_eq!(serde_json::to_string(&Province::Bc).unwrap(), "\"BC\"");
        let parsed: Province = serde_json::from_str("\"NL\"").unwrap();
        assert_eq!(parsed, Province::Nl);
    }

    #[test]
    fn test_order_date_format_renders_date_only() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();
        assert_eq!(date.format(ORDER_DATE_FORMAT).to_string(), "2024-03-09");
    }
}
