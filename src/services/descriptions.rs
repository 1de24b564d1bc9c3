//! WMO weather interpretation codes.
//!
//! See the "WMO Weather interpretation codes" table at
//! <https://open-meteo.com/en/docs#weathervariables>.

use crate::models::Descriptor;

/// Descriptor used for any code missing from the table
pub const UNKNOWN: Descriptor = Descriptor {
    local: "未知",
    english: "Unknown",
    pictogram: "❓",
};

const fn d(local: &'static str, english: &'static str, pictogram: &'static str) -> Descriptor {
    Descriptor {
        local,
        english,
        pictogram,
    }
}

/// Describe a weather code. Unrecognized codes map to [`UNKNOWN`].
pub fn describe(code: i64) -> Descriptor {
    match code {
        0 => d("晴朗", "Clear sky", "☀️"),
        1 => d("主要晴朗", "Mainly clear", "🌤️"),
        2 => d("部分多云", "Partly cloudy", "⛅"),
        3 => d("多云", "Overcast", "☁️"),
        45 => d("有雾", "Foggy", "🌫️"),
        48 => d("雾凇", "Depositing rime fog", "🌫️"),
        51 => d("小毛毛雨", "Light drizzle", "🌦️"),
        53 => d("毛毛雨", "Moderate drizzle", "🌦️"),
        55 => d("大毛毛雨", "Dense drizzle", "🌧️"),
        61 => d("小雨", "Slight rain", "🌧️"),
        63 => d("中雨", "Moderate rain", "🌧️"),
        65 => d("大雨", "Heavy rain", "⛈️"),
        71 => d("小雪", "Slight snow", "🌨️"),
        73 => d("中雪", "Moderate snow", "❄️"),
        75 => d("大雪", "Heavy snow", "❄️"),
        77 => d("雨夹雪", "Snow grains", "🌨️"),
        80 => d("小阵雨", "Slight rain showers", "🌦️"),
        81 => d("阵雨", "Moderate rain showers", "🌧️"),
        82 => d("大阵雨", "Violent rain showers", "⛈️"),
        85 => d("小阵雪", "Slight snow showers", "🌨️"),
        86 => d("大阵雪", "Heavy snow showers", "❄️"),
        95 => d("雷暴", "Thunderstorm", "⛈️"),
        96 => d("雷暴伴小冰雹", "Thunderstorm with slight hail", "⛈️"),
        99 => d("雷暴伴大冰雹", "Thunderstorm with heavy hail", "⛈️"),
        _ => UNKNOWN,
    }
}
