//! Outbound contact links (WhatsApp chat, e-mail) and the contact form payload.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::SiteConfig;

/// Everything `encodeURIComponent` escapes.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// `https://wa.me/<number>?text=<message>`
pub fn whatsapp_link(config: &SiteConfig, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        config.whatsapp_number,
        encode_component(message)
    )
}

pub fn mailto_link(address: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{address}?subject={}&body={}",
        encode_component(subject),
        encode_component(body)
    )
}

/// Chat opener sent from a design's detail view.
pub fn design_inquiry_message(config: &SiteConfig, title: &str) -> String {
    format!(
        "Hi {}! I'm interested in your {title} design. Please send me more information.",
        config.business_name
    )
}

/// `mailto:` link asking about one design.
pub fn design_email_link(config: &SiteConfig, title: &str) -> String {
    let subject = format!("Inquiry about {title} Design");
    let body = format!(
        "Hello,\n\nI'm interested in your {title} design. Please provide more details about this project.\n\nThank you."
    );
    mailto_link(&config.contact_email, &subject, &body)
}

/// Values read from the contact form. Nothing is validated; empty fields are
/// sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn whatsapp_message(&self, config: &SiteConfig) -> String {
        format!(
            "Hello {}!\n\nMy name is {}.\nEmail: {}\nPhone: {}\n\nMessage:\n{}",
            config.business_name, self.name, self.email, self.phone, self.message
        )
    }

    pub fn whatsapp_url(&self, config: &SiteConfig) -> String {
        whatsapp_link(config, &self.whatsapp_message(config))
    }
}

/// Notice shown once the chat has been opened.
pub const SUBMIT_CONFIRMATION: &str =
    "Thank you for your message! You will be redirected to WhatsApp to send your inquiry.";

/// Browsing context the chat link opens in.
pub const CHAT_TARGET: &str = "_blank";

pub trait ContactFormView {
    fn read(&self) -> anyhow::Result<ContactSubmission>;
    fn open(&self, url: &str, target: &str) -> anyhow::Result<()>;
    /// Blocking notice to the visitor.
    fn notify(&self, message: &str) -> anyhow::Result<()>;
    fn reset(&self);
}

/// Form submit: open the prefilled chat, confirm, clear the fields.
/// If any step fails the fields keep what the visitor typed.
pub fn submit_contact<V: ContactFormView>(view: &V, config: &SiteConfig) -> anyhow::Result<()> {
    let url = view.read()?.whatsapp_url(config);
    view.open(&url, CHAT_TARGET)?;
    view.notify(SUBMIT_CONFIRMATION)?;
    view.reset();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    enum FormEvent {
        Open(String, String),
        Notify(String),
        Reset,
    }

    struct FakeForm {
        fields: Option<ContactSubmission>,
        events: RefCell<Vec<FormEvent>>,
    }

    impl FakeForm {
        fn with(fields: Option<ContactSubmission>) -> Self {
            Self { fields, events: RefCell::default() }
        }
    }

    impl ContactFormView for FakeForm {
        fn read(&self) -> anyhow::Result<ContactSubmission> {
            match &self.fields {
                Some(f) => Ok(f.clone()),
                None => bail!("missing form field #name"),
            }
        }
        fn open(&self, url: &str, target: &str) -> anyhow::Result<()> {
            self.events.borrow_mut().push(FormEvent::Open(url.into(), target.into()));
            Ok(())
        }
        fn notify(&self, message: &str) -> anyhow::Result<()> {
            self.events.borrow_mut().push(FormEvent::Notify(message.into()));
            Ok(())
        }
        fn reset(&self) {
            self.events.borrow_mut().push(FormEvent::Reset);
        }
    }

    #[test]
    fn submit_opens_chat_then_confirms_then_resets() {
        let cfg = SiteConfig::default();
        let form = FakeForm::with(Some(ContactSubmission {
            name: "Jane".into(),
            message: "Hi".into(),
            ..Default::default()
        }));
        submit_contact(&form, &cfg).unwrap();

        let events = form.events.borrow();
        assert_eq!(events.len(), 3);
        let FormEvent::Open(url, target) = &events[0] else {
            panic!("expected the chat to open first, got {:?}", events[0]);
        };
        assert!(url.starts_with("https://wa.me/"));
        assert!(url.contains("Jane"));
        assert!(url.ends_with("Hi"));
        assert_eq!(target, "_blank");
        assert_eq!(events[1], FormEvent::Notify(SUBMIT_CONFIRMATION.into()));
        assert_eq!(events[2], FormEvent::Reset);
    }

    #[test]
    fn failed_read_keeps_the_form() {
        let form = FakeForm::with(None);
        assert!(submit_contact(&form, &SiteConfig::default()).is_err());
        assert!(form.events.borrow().is_empty());
    }

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_component("a b&c=d#e%"), "a%20b%26c%3Dd%23e%25");
        assert_eq!(encode_component("it's(ok)!~*._-"), "it's(ok)!~*._-");
        assert_eq!(encode_component("line\nnext"), "line%0Anext");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn inquiry_links_mention_the_design() {
        let cfg = SiteConfig::default();
        let wa = whatsapp_link(&cfg, &design_inquiry_message(&cfg, "Foo"));
        assert!(wa.starts_with("https://wa.me/+234816262854?text=Hi%20Pure%20Pleasure"));
        assert!(wa.contains("your%20Foo%20design"));

        let mail = design_email_link(&cfg, "Foo");
        assert!(mail.starts_with("mailto:Abrahamuwaoma71@gmail.com?subject=Inquiry%20about%20Foo%20Design&body="));
        assert!(mail.contains("Hello%2C%0A%0AI'm%20interested%20in%20your%20Foo%20design"));
    }

    #[test]
    fn contact_form_link_carries_every_field() {
        let cfg = SiteConfig::default();
        let sub = ContactSubmission {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            phone: "0800".into(),
            message: "Hi".into(),
        };
        let url = sub.whatsapp_url(&cfg);
        assert!(url.contains("My%20name%20is%20Jane."));
        assert!(url.contains("Email%3A%20jane%40example.com%0APhone%3A%200800"));
        assert!(url.ends_with("Message%3A%0AHi"));
    }

    #[test]
    fn reserved_characters_in_the_message_stay_inside_the_text_parameter() {
        let cfg = SiteConfig::default();
        let sub = ContactSubmission {
            message: "50% off & more #deal".into(),
            ..Default::default()
        };
        let url = sub.whatsapp_url(&cfg);
        let (_, text) = url.split_once("?text=").unwrap();
        assert!(!text.contains('&'));
        assert!(!text.contains('#'));
        assert!(text.ends_with("50%25%20off%20%26%20more%20%23deal"));
    }
}
