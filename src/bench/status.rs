/// Two line progress display updated by the scheduler.
pub trait StatusDisplay {
    fn set_title(&mut self, text: &str);
    fn set_subtitle(&mut self, text: &str);
}

/// Keeps the latest title and subtitle plus every title shown so far.
#[derive(Debug, Clone, Default)]
pub struct StatusText {
    pub title: String,
    pub subtitle: String,
    pub history: Vec<String>,
}

impl StatusDisplay for StatusText {
    fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
        self.history.push(text.to_string());
    }

    fn set_subtitle(&mut self, text: &str) {
        self.subtitle = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_records_history() {
        let mut status = StatusText::default();
        status.set_title("1/2: A");
        status.set_subtitle("");
        status.set_title("2/2: A + opa");
        status.set_subtitle("Result of \"A\": 5 FPS");

        assert_eq!(status.title, "2/2: A + opa");
        assert_eq!(status.subtitle, "Result of \"A\": 5 FPS");
        assert_eq!(status.history, vec!["1/2: A", "2/2: A + opa"]);
    }
}
