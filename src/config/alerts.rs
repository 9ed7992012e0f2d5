//! County alert wording

pub struct AlertTexts {
    pub danger_title: &'static str,
    pub missing_title: &'static str,
}

pub const ALERTS: AlertTexts = AlertTexts {
    danger_title: "New Danger Alert",
    missing_title: "Missing Person Alert",
};

pub fn danger_message(county: &str) -> String {
    format!("A danger has been reported in {}. Stay alert!", county)
}

pub fn missing_message(county: &str) -> String {
    format!(
        "A missing person has been reported in {}. Please help if you can.",
        county
    )
}
