use skycast_core::{DisplaySurface, ResultCard};

/// Terminal implementation of the display surface.
///
/// A terminal is append-only, so hiding a region is a no-op and the submit
/// flag has no control to disable; showing a region prints it.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    pending_card: Option<String>,
    pending_error: Option<String>,
}

impl DisplaySurface for TerminalSurface {
    fn set_loading_visible(&mut self, visible: bool) {
        if visible {
            println!("Looking up weather...");
        }
    }

    fn render_result(&mut self, card: &ResultCard) {
        let mut out = String::new();

        out.push_str("\nLocation\n");
        for field in &card.location_fields {
            out.push_str(&format!("  {:<12} {}\n", format!("{}:", field.label), field.value));
        }

        out.push_str("\nWeather\n");
        for field in &card.weather_fields {
            out.push_str(&format!("  {:<12} {}\n", format!("{}:", field.label), field.value));
        }

        self.pending_card = Some(out);
    }

    fn set_result_visible(&mut self, visible: bool) {
        if visible {
            if let Some(card) = self.pending_card.take() {
                print!("{card}");
            }
        }
    }

    fn render_error(&mut self, message: &str) {
        self.pending_error = Some(message.to_string());
    }

    fn set_error_visible(&mut self, visible: bool) {
        if visible {
            if let Some(message) = self.pending_error.take() {
                eprintln!("Error: {message}");
            }
        }
    }

    fn set_submit_enabled(&mut self, _enabled: bool) {}
}
