// Abstract Factory: one factory per look-and-feel builds a whole family of
// widgets, so switching the factory switches every widget together.

use std::io;

use crate::transcript::Transcript;

pub trait Button {
    fn render(&self) -> String;
}

pub trait TextBox {
    fn render(&self) -> String;
}

pub trait CheckBox {
    fn render(&self) -> String;
}

// Windows family
struct WindowsButton;
impl Button for WindowsButton {
    fn render(&self) -> String {
        "[windows button]".to_string()
    }
}

struct WindowsTextBox;
impl TextBox for WindowsTextBox {
    fn render(&self) -> String {
        "[windows text box]".to_string()
    }
}

struct WindowsCheckBox;
impl CheckBox for WindowsCheckBox {
    fn render(&self) -> String {
        "[windows check box]".to_string()
    }
}

// Mac family
struct MacButton;
impl Button for MacButton {
    fn render(&self) -> String {
        "(mac button)".to_string()
    }
}

struct MacTextBox;
impl TextBox for MacTextBox {
    fn render(&self) -> String {
        "(mac text box)".to_string()
    }
}

struct MacCheckBox;
impl CheckBox for MacCheckBox {
    fn render(&self) -> String {
        "(mac check box)".to_string()
    }
}

pub trait UiFactory {
    fn family(&self) -> &'static str;
    fn create_button(&self) -> Box<dyn Button>;
    fn create_text_box(&self) -> Box<dyn TextBox>;
    fn create_check_box(&self) -> Box<dyn CheckBox>;
}

pub struct WindowsFactory;
impl UiFactory for WindowsFactory {
    fn family(&self) -> &'static str {
        "windows"
    }
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(WindowsButton)
    }
    fn create_text_box(&self) -> Box<dyn TextBox> {
        Box::new(WindowsTextBox)
    }
    fn create_check_box(&self) -> Box<dyn CheckBox> {
        Box::new(WindowsCheckBox)
    }
}

pub struct MacFactory;
impl UiFactory for MacFactory {
    fn family(&self) -> &'static str {
        "mac"
    }
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(MacButton)
    }
    fn create_text_box(&self) -> Box<dyn TextBox> {
        Box::new(MacTextBox)
    }
    fn create_check_box(&self) -> Box<dyn CheckBox> {
        Box::new(MacCheckBox)
    }
}

/// Client code: never names a concrete widget.
pub fn render_form(factory: &dyn UiFactory) -> Vec<String> {
    vec![
        factory.create_button().render(),
        factory.create_text_box().render(),
        factory.create_check_box().render(),
    ]
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let factories: [&dyn UiFactory; 2] = [&WindowsFactory, &MacFactory];
    for factory in factories {
        out.line("factory", factory.family())?;
        let widgets = render_form(factory);
        for widget in &widgets {
            out.line("widget", widget)?;
        }
        let consistent = widgets.iter().all(|w| w.contains(factory.family()));
        out.check("family-consistent", consistent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_no_cross_family_mixing() {
        for widget in render_form(&WindowsFactory) {
            assert!(widget.contains("windows") && !widget.contains("mac"));
        }
        for widget in render_form(&MacFactory) {
            assert!(widget.contains("mac") && !widget.contains("windows"));
        }
    }

    #[test]
    fn test_switching_factory_changes_every_kind() {
        let windows = render_form(&WindowsFactory);
        let mac = render_form(&MacFactory);
        assert_eq!(windows.len(), 3);
        for (w, m) in windows.iter().zip(&mac) {
            assert_ne!(w, m);
        }
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert_eq!(text.matches("family-consistent: true\n").count(), 2);
        assert!(text.contains("widget: (mac check box)\n"));
    }
}
