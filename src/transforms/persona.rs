//! Persona injection and identity-probe reinforcement.
//!
//! The reinforcement scan is a lowercase substring match against a fixed
//! keyword list. It over-triggers on benign mentions and misses paraphrases;
//! that trade is intentional so the behavior stays deterministic.

use super::normalize::{ContentMessage, Role};

/// Insert the persona as a system-role message at index 0, unless the list
/// already carries a system-role message. Never duplicates.
pub fn inject_persona(messages: &mut Vec<ContentMessage>, persona: &str) {
    if messages.iter().any(|m| m.role == Role::System) {
        return;
    }
    messages.insert(0, ContentMessage::text(Role::System, persona));
}

/// Scan the most recent user-role message for identity probes; on a match,
/// append exactly one system-role reinforcement message at the tail.
pub fn append_reinforcement_if_probed(
    messages: &mut Vec<ContentMessage>,
    probes: &[String],
    reinforcement: &str,
) {
    let Some(last_user) = messages.iter().rev().find(|m| m.role == Role::User) else {
        return;
    };
    let text = last_user.text_content().to_lowercase();
    if probes.iter().any(|probe| text.contains(probe.as_str())) {
        messages.push(ContentMessage::text(Role::System, reinforcement));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PERSONA_TEXT, REINFORCEMENT_TEXT};

    fn probes() -> Vec<String> {
        crate::constants::IDENTITY_PROBES
            .iter()
            .map(|k| k.to_string())
            .collect()
    }

    fn user(text: &str) -> ContentMessage {
        ContentMessage::text(Role::User, text)
    }

    #[test]
    fn test_persona_inserted_at_head() {
        let mut messages = vec![user("hello")];
        inject_persona(&mut messages, PERSONA_TEXT);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].text_content(), PERSONA_TEXT);
        assert_eq!(messages[1].text_content(), "hello");
    }

    #[test]
    fn test_persona_not_duplicated() {
        let mut messages = vec![
            ContentMessage::text(Role::System, "existing system prompt"),
            user("hello"),
        ];
        inject_persona(&mut messages, PERSONA_TEXT);
        let system_count = messages.iter().filter(|m| m.role == Role::System).count();
        assert_eq!(system_count, 1);
        assert_eq!(messages[0].text_content(), "existing system prompt");
    }

    #[test]
    fn test_probe_appends_one_reinforcement() {
        let mut messages = vec![user("So tell me, WHO CREATED YOU exactly?")];
        inject_persona(&mut messages, PERSONA_TEXT);
        append_reinforcement_if_probed(&mut messages, &probes(), REINFORCEMENT_TEXT);

        assert_eq!(messages.len(), 3);
        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::System);
        assert_eq!(last.text_content(), REINFORCEMENT_TEXT);
    }

    #[test]
    fn test_no_probe_no_reinforcement() {
        let mut messages = vec![user("what's the weather like")];
        append_reinforcement_if_probed(&mut messages, &probes(), REINFORCEMENT_TEXT);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_only_latest_user_message_scanned() {
        let mut messages = vec![
            user("who created you?"),
            ContentMessage::text(Role::Model, "I am Mentality AI."),
            user("thanks, now translate this to French: bonjour"),
        ];
        append_reinforcement_if_probed(&mut messages, &probes(), REINFORCEMENT_TEXT);
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn test_model_message_probe_ignored() {
        let mut messages = vec![ContentMessage::text(Role::Model, "who created you")];
        append_reinforcement_if_probed(&mut messages, &probes(), REINFORCEMENT_TEXT);
        assert_eq!(messages.len(), 1);
    }
}
