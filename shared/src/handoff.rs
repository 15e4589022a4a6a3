use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{CLOSING_LINE, WHATSAPP_NUMBER};
use crate::reveal_session::RewardAssignment;

/// Only plain "<n>% Discount" rewards carry price arithmetic; combined
/// offers like "Next Registration 50% Discount" go out verbatim.
static DISCOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)% Discount$").unwrap());

pub fn discount_percent(reward: &str) -> Option<i64> {
    DISCOUNT_RE
        .captures(reward)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Builds the canonical WhatsApp message for a finalized reward. Percent
/// discounts get base/final/savings lines; everything else is just module
/// and offer. The email and closing call-to-action always follow.
pub fn format_message(heading: &str, result: &RewardAssignment) -> String {
    let mut message = format!(
        "{}\n\nModule: {}\nOffer: {}\n",
        heading, result.module, result.reward
    );
    if let Some(percent) = discount_percent(&result.reward) {
        let final_amount = result.base_price - result.base_price * percent / 100;
        message.push_str(&format!(
            "Base Price: ₹{}\nFinal Amount: ₹{}\n(Saved ₹{}!)\n",
            result.base_price,
            final_amount,
            result.base_price - final_amount
        ));
    }
    if !result.email.is_empty() {
        message.push_str(&format!("\nEmail: {}\n", result.email));
    }
    message.push_str(&format!("\n{}", CLOSING_LINE));
    message
}

/// WhatsApp deep link for a message that has already been URL-escaped by
/// the caller.
pub fn whatsapp_url(escaped_message: &str) -> String {
    format!("https://wa.me/{}?text={}", WHATSAPP_NUMBER, escaped_message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(reward: &str, base_price: i64, email: &str) -> RewardAssignment {
        RewardAssignment {
            reward: reward.to_string(),
            module: "sprechen b2".to_string(),
            base_price,
            email: email.to_string(),
        }
    }

    #[test]
    fn percent_pattern_is_exact() {
        assert_eq!(discount_percent("20% Discount"), Some(20));
        assert_eq!(discount_percent("5% Discount"), Some(5));
        assert_eq!(discount_percent("Free Consultation"), None);
        assert_eq!(discount_percent("Next Registration 50% Discount"), None);
        assert_eq!(discount_percent("20% Discounted"), None);
        assert_eq!(discount_percent("Registration for ₹1800"), None);
    }

    #[test]
    fn discount_message_includes_final_amount_and_savings() {
        let message = format_message("🎉 Scratch & Win Result!", &assignment("20% Discount", 1000, ""));
        assert!(message.contains("Offer: 20% Discount"));
        assert!(message.contains("Base Price: ₹1000"));
        assert!(message.contains("Final Amount: ₹800"));
        assert!(message.contains("(Saved ₹200!)"));
    }

    #[test]
    fn odd_percentages_use_integer_arithmetic() {
        let message = format_message("🎉 Spin & Win Result!", &assignment("13% Discount", 2000, ""));
        assert!(message.contains("Final Amount: ₹1740"));
        assert!(message.contains("(Saved ₹260!)"));
    }

    #[test]
    fn non_discount_message_skips_price_lines() {
        let message = format_message("🎉 Spin & Win Result!", &assignment("Free Consultation", 1500, ""));
        assert!(message.contains("Offer: Free Consultation"));
        assert!(!message.contains("Base Price"));
        assert!(!message.contains("Final Amount"));
        assert!(!message.contains("Saved"));
    }

    #[test]
    fn email_is_included_only_when_present() {
        let with_email = format_message("h", &assignment("10% Discount", 100, "a@b.test"));
        assert!(with_email.contains("Email: a@b.test"));
        let without = format_message("h", &assignment("10% Discount", 100, ""));
        assert!(!without.contains("Email:"));
    }

    #[test]
    fn message_always_ends_with_the_call_to_action() {
        let message = format_message("h", &assignment("Free Consultation", 0, ""));
        assert!(message.ends_with(CLOSING_LINE));
    }

    #[test]
    fn deep_link_embeds_destination_and_text() {
        let url = whatsapp_url("Hello%20there");
        assert_eq!(
            url,
            format!("https://wa.me/{}?text=Hello%20there", WHATSAPP_NUMBER)
        );
    }
}
