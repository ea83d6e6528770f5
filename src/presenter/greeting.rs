// src/presenter/greeting.rs
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    /// 05:00–11:59 is morning, 12:00–17:59 afternoon, anything else evening.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Greeting::Morning,
            12..=17 => Greeting::Afternoon,
            _ => Greeting::Evening,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Greeting::Morning => "Good morning! / おはよう",
            Greeting::Afternoon => "Good afternoon! / こんにちは",
            Greeting::Evening => "Good evening! / こんばんは",
        }
    }
}

impl std::fmt::Display for Greeting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
