//! # Keyword Responder
//!
//! File: cli/src/common/chat/responder.rs
//!
//! ## Overview
//!
//! Maps a free-text question to one canned reply. The lookup is plain substring
//! containment over the lowercased query, evaluated in three tiers:
//!
//! 1. The ordered knowledge base of `KeywordRule`s. The first rule whose pattern
//!    occurs in the query wins, so a rule can only ever be shadowed by rules
//!    declared before it. Configured rules are appended after the built-in ones.
//! 2. Categorical fallbacks (pricing words, then thanks).
//! 3. A fixed default reply pointing at the contact form and support address.
//!
//! Matching is not tokenized: "costly" contains "cost" and therefore gets the
//! pricing reply. "valuation" does not contain "value" and falls through to the
//! default reply.
//!
//! ## Examples
//!
//! ```rust
//! let responder = Responder::default();
//! let reply = responder.respond("How do I sell my license?");
//! assert!(reply.starts_with("To sell your license"));
//! ```
//!
use crate::core::config::ChatConfig;
use tracing::trace;

/// The built-in knowledge base, in precedence order.
const BUILTIN_RULES: [(&str, &str); 5] = [
    (
        "how do i sell my license",
        "To sell your license, simply fill out our contact form with details about your software license. Our team will evaluate it and provide you with a competitive offer within 24 hours.",
    ),
    (
        "what types of licenses do you buy",
        "We purchase a wide range of software licenses including enterprise software, cloud subscriptions, desktop applications, and SaaS subscriptions. If you're unsure, please contact us with the details.",
    ),
    (
        "how long does the process take",
        "Our process typically takes 3-5 business days from initial contact to payment. The valuation is usually provided within 24 hours of submitting your license details.",
    ),
    (
        "how do i get paid",
        "We offer multiple payment options including bank transfer, PayPal, and cryptocurrency. You can select your preferred method when accepting our offer.",
    ),
    (
        "is my license information secure",
        "Absolutely. We use end-to-end encryption and secure transfer protocols to protect all your sensitive license information. Your data is only accessible to authorized personnel.",
    ),
];

const PRICING_REPLY: &str = "The value of your license depends on factors like software type, remaining subscription time, and current market demand. Submit your details through our form for a personalized valuation.";

const THANKS_REPLY: &str =
    "You're welcome! If you have any other questions, feel free to ask.";

/// Categorical fallbacks: any keyword of a group selects its reply. Checked in order.
const CATEGORY_FALLBACKS: [(&[&str], &str); 2] = [
    (&["price", "cost", "value"], PRICING_REPLY),
    (&["thank"], THANKS_REPLY),
];

/// Address used when none is configured.
pub const DEFAULT_SUPPORT_EMAIL: &str = "support@softsell.com";

/// One entry of the knowledge base: a lowercase substring and its fixed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pattern: String,
    response: String,
}

impl KeywordRule {
    /// Builds a rule. The pattern is lowercased so it can match the normalized query.
    pub fn new(pattern: &str, response: &str) -> Self {
        Self {
            pattern: pattern.to_lowercase(),
            response: response.to_string(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    fn matches(&self, normalized_query: &str) -> bool {
        normalized_query.contains(self.pattern.as_str())
    }
}

/// The chat widget's canned-reply engine. Immutable once built.
#[derive(Debug, Clone)]
pub struct Responder {
    rules: Vec<KeywordRule>,
    default_reply: String,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPORT_EMAIL)
    }
}

impl Responder {
    /// Creates a responder with the built-in rules and a default reply quoting `support_email`.
    pub fn new(support_email: &str) -> Self {
        Self {
            rules: BUILTIN_RULES
                .iter()
                .map(|(pattern, response)| KeywordRule::new(pattern, response))
                .collect(),
            default_reply: format!(
                "I don't have specific information about that. For detailed assistance, please fill out our contact form or email us at {}.",
                support_email
            ),
        }
    }

    /// Builds the responder described by the `[chat]` config section.
    pub fn from_config(config: &ChatConfig) -> Self {
        config
            .rules
            .iter()
            .fold(Self::new(&config.support_email), |responder, rule| {
                responder.with_rule(KeywordRule::new(&rule.pattern, &rule.response))
            })
    }

    /// Appends a rule at the lowest keyword precedence.
    ///
    /// Callers must not pass an empty pattern: it matches every query.
    pub fn with_rule(mut self, rule: KeywordRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The ordered knowledge base.
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn default_reply(&self) -> &str {
        &self.default_reply
    }

    /// # Answer a Question (`respond`)
    ///
    /// Looks `query` up against the knowledge base. Matching is plain substring
    /// containment over the lowercased query, tried in this order:
    /// 1. Keyword rules in declaration order; the first match wins.
    /// 2. Category fallbacks: pricing words, then thanks.
    /// 3. The default reply.
    ///
    /// ## Arguments
    ///
    /// * `query`: Free text from the user. Blank input is allowed and gets the
    ///   default reply.
    ///
    /// ## Returns
    ///
    /// * `&str`: The canned reply. The function is total and deterministic, and
    ///   the reply is never empty.
    pub fn respond(&self, query: &str) -> &str {
        let normalized = query.to_lowercase();

        if let Some(rule) = self.rules.iter().find(|rule| rule.matches(&normalized)) {
            trace!(pattern = rule.pattern(), "Keyword rule matched");
            return rule.response();
        }

        for (keywords, reply) in CATEGORY_FALLBACKS {
            if keywords.iter().any(|keyword| normalized.contains(keyword)) {
                trace!(?keywords, "Category fallback matched");
                return reply;
            }
        }

        trace!("No rule matched, using default reply");
        &self.default_reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RuleConfig;

    #[test]
    fn test_sell_question_matches_first_rule() {
        let responder = Responder::default();
        assert_eq!(
            responder.respond("How do I sell my license?"),
            BUILTIN_RULES[0].1
        );
    }

    #[test]
    fn test_first_match_wins_regardless_of_query_order() {
        let responder = Responder::default();
        // "how do i get paid" appears first in the text but later in the rule order.
        let reply = responder.respond("how do i get paid after how do i sell my license?");
        assert_eq!(reply, BUILTIN_RULES[0].1);
    }

    #[test]
    fn test_keyword_rule_beats_category_fallback() {
        let responder = Responder::default();
        // Contains "cost" but also the payment rule.
        let reply = responder.respond("How do I get paid and what does it cost?");
        assert_eq!(reply, BUILTIN_RULES[3].1);
    }

    #[test]
    fn test_cost_question_gets_pricing_fallback() {
        let responder = Responder::default();
        assert_eq!(responder.respond("What does this cost"), PRICING_REPLY);
        assert_eq!(responder.respond("PRICE?"), PRICING_REPLY);
    }

    #[test]
    fn test_pricing_precedes_thanks() {
        let responder = Responder::default();
        assert_eq!(responder.respond("thanks, what's the value?"), PRICING_REPLY);
        assert_eq!(responder.respond("Thank you!"), THANKS_REPLY);
    }

    #[test]
    fn test_substring_inside_longer_word_matches() {
        let responder = Responder::default();
        assert_eq!(responder.respond("Is it costly?"), PRICING_REPLY);
        assert_eq!(responder.respond("Feels overpriced"), PRICING_REPLY);
        assert_eq!(responder.respond("Thankful for the help"), THANKS_REPLY);
    }

    #[test]
    fn test_near_miss_word_gets_default_reply() {
        // "valua-tion" never spells "value".
        let responder = Responder::default();
        assert_eq!(
            responder.respond("Can I get a valuation?"),
            responder.default_reply()
        );
    }

    #[test]
    fn test_blank_queries_get_default_reply() {
        let responder = Responder::default();
        for query in ["", "   ", "\t\n"] {
            let reply = responder.respond(query);
            assert_eq!(reply, responder.default_reply());
            assert!(!reply.is_empty());
        }
    }

    #[test]
    fn test_default_reply_quotes_support_email() {
        let responder = Responder::new("help@example.com");
        let reply = responder.respond("Do you like pizza?");
        assert!(reply.contains("help@example.com"));
        assert!(reply.contains("contact form"));
    }

    #[test]
    fn test_internal_whitespace_is_not_collapsed() {
        let responder = Responder::default();
        let reply = responder.respond("how  do i sell my license");
        assert_eq!(reply, responder.default_reply());
    }

    #[test]
    fn test_replies_are_deterministic() {
        let responder = Responder::default();
        for query in ["how long does the process take", "cost", "hello", ""] {
            assert_eq!(responder.respond(query), responder.respond(query));
        }
    }

    #[test]
    fn test_configured_rules_follow_builtin_rules() {
        let mut config = ChatConfig::default();
        config.rules.push(RuleConfig {
            pattern: "Sell My License".into(),
            response: "shadowed".into(),
        });
        config.rules.push(RuleConfig {
            pattern: "Refund".into(),
            response: "Refunds are handled case by case.".into(),
        });
        let responder = Responder::from_config(&config);

        assert_eq!(responder.rules().len(), BUILTIN_RULES.len() + 2);
        assert_eq!(responder.rules()[BUILTIN_RULES.len() + 1].pattern(), "refund");
        // Built-in rule keeps precedence over a configured duplicate.
        assert_eq!(responder.respond("how do i sell my license"), BUILTIN_RULES[0].1);
        // Configured rules outrank the categorical fallbacks.
        assert_eq!(
            responder.respond("What does a refund cost?"),
            "Refunds are handled case by case."
        );
    }
}
