//! Bilingual plain-text weather report.

use crate::models::CityWeatherRecord;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Asia::Shanghai;

const BANNER_WIDTH: usize = 50;
const RULE_WIDTH: usize = 40;

/// Attribution printed at the foot of every report
pub const ATTRIBUTION: &str = "💡 数据来源 Data source: Open-Meteo API";

/// Format a report stamped with the current time
pub fn format_report(records: &[CityWeatherRecord]) -> String {
    format_report_at(records, Utc::now())
}

/// Format a report stamped with `now`. Records are presented in the given order.
pub fn format_report_at(records: &[CityWeatherRecord], now: DateTime<Utc>) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let rule = "-".repeat(RULE_WIDTH);

    let mut report = format!(
        "\n{banner}\n🌤️  多城市天气播报 | Multi-City Weather Report\n📅 {}\n{banner}\n\n",
        local_timestamp(now)
    );

    for record in records {
        let current = &record.current;
        let today = &record.today;

        report.push_str(&format!("📍 {} ({})\n{rule}\n", record.city, record.city_en));
        report.push_str(&format!(
            "🌡️  当前温度 Current: {}°C (体感 Feels like: {}°C)\n",
            current.temperature, current.feels_like
        ));
        report.push_str(&format!(
            "{}  天气状况 Weather: {} | {}\n",
            current.descriptor.pictogram, current.descriptor.local, current.descriptor.english
        ));
        report.push_str(&format!("💧 湿度 Humidity: {}%\n", current.humidity));
        report.push_str(&format!("🌬️  风速 Wind: {} km/h\n", current.wind_speed));
        report.push_str(&format!(
            "📊 今日温度范围 Today: {}°C ~ {}°C\n",
            today.temp_min, today.temp_max
        ));
        if let Some(precipitation) = today.precipitation.filter(|mm| *mm > 0.0) {
            report.push_str(&format!("☔ 今日降水 Precipitation: {precipitation}mm\n"));
        }
        report.push('\n');
    }

    report.push_str(&format!("{banner}\n{ATTRIBUTION}\n{banner}\n"));
    report
}

/// Render a timestamp the way the report header shows it: Beijing time, `YYYY/M/D HH:MM:SS`
pub fn local_timestamp<Tz: TimeZone>(at: DateTime<Tz>) -> String {
    at.with_timezone(&Shanghai)
        .format("%Y/%-m/%-d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{CurrentConditions, TodayForecast},
        services::descriptions::describe,
    };

    fn record(precipitation: Option<f64>) -> CityWeatherRecord {
        CityWeatherRecord {
            city: "北京".to_string(),
            city_en: "Beijing".to_string(),
            current: CurrentConditions {
                temperature: 21.3,
                feels_like: 20.1,
                humidity: serde_json::Number::from(55),
                precipitation: Some(0.0),
                wind_speed: 10.0,
                weather_code: 2,
                descriptor: describe(2),
            },
            today: TodayForecast {
                temp_max: 25.0,
                temp_min: 15.0,
                precipitation,
                weather_code: 2,
                descriptor: describe(2),
            },
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 0, 30, 0).unwrap()
    }

    #[test]
    fn test_report_contents() {
        let report = format_report_at(&[record(Some(0.0))], fixed_now());

        assert!(report.contains("📍 北京 (Beijing)"));
        assert!(report.contains("当前温度 Current: 21.3°C (体感 Feels like: 20.1°C)"));
        assert!(report.contains("⛅  天气状况 Weather: 部分多云 | Partly cloudy"));
        assert!(report.contains("湿度 Humidity: 55%"));
        assert!(report.contains("风速 Wind: 10 km/h"));
        assert!(report.contains("今日温度范围 Today: 15°C ~ 25°C"));
        assert!(!report.contains("Precipitation"));
        assert!(report.contains(ATTRIBUTION));
    }

    #[test]
    fn test_precipitation_line_only_when_positive() {
        let wet = format_report_at(&[record(Some(2.5))], fixed_now());
        assert!(wet.contains("☔ 今日降水 Precipitation: 2.5mm"));

        let dry = format_report_at(&[record(Some(0.0))], fixed_now());
        assert!(!dry.contains("☔"));

        let unreported = format_report_at(&[record(None)], fixed_now());
        assert!(unreported.contains("📍 北京 (Beijing)"));
        assert!(!unreported.contains("☔"));
    }

    #[test]
    fn test_report_is_deterministic() {
        let records = [record(Some(0.0)), record(Some(2.5))];
        assert_eq!(
            format_report_at(&records, fixed_now()),
            format_report_at(&records, fixed_now())
        );
    }

    #[test]
    fn test_header_timestamp_in_beijing_time() {
        let report = format_report_at(&[], fixed_now());
        assert!(report.contains("📅 2024/3/5 08:30:00"));
    }

    #[test]
    fn test_layout() {
        let report = format_report_at(&[record(Some(0.0))], fixed_now());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[4], "=".repeat(50));
        assert_eq!(lines[7], "-".repeat(40));
        assert_eq!(lines[lines.len() - 1], "=".repeat(50));
        assert_eq!(lines[lines.len() - 2], ATTRIBUTION);
    }
}
