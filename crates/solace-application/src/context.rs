//! Conversation context rendering.

use solace_core::session::Turn;

/// Number of recent turns included in the prompt context.
pub const CONTEXT_WINDOW: usize = 5;

/// Renders the last [`CONTEXT_WINDOW`] turns as role-prefixed lines.
pub fn build_context(turns: &[Turn]) -> String {
    let start = turns.len().saturating_sub(CONTEXT_WINDOW);
    let mut context = String::new();
    for turn in &turns[start..] {
        context.push_str(turn.role.context_prefix());
        context.push_str(": ");
        context.push_str(&turn.text);
        context.push('\n');
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_core::session::MessageRole;

    fn turn(role: MessageRole, text: &str) -> Turn {
        Turn::new(role, text, "2024-01-01T00:00:00Z")
    }

    #[test]
    fn renders_role_prefixes() {
        let turns = vec![
            turn(MessageRole::User, "hello"),
            turn(MessageRole::Assistant, "hi, how are you?"),
        ];
        assert_eq!(build_context(&turns), "User: hello\nAI: hi, how are you?\n");
    }

    #[test]
    fn bounds_to_the_last_five_turns() {
        let turns: Vec<Turn> = (0..7)
            .map(|i| turn(MessageRole::User, &format!("message {i}")))
            .collect();
        let context = build_context(&turns);
        assert!(!context.contains("message 0"));
        assert!(!context.contains("message 1"));
        assert!(context.contains("message 2"));
        assert!(context.contains("message 6"));
    }

    #[test]
    fn empty_history_renders_empty() {
        assert_eq!(build_context(&[]), "");
    }
}
