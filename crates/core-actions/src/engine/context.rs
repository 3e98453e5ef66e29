//! Context queries for conditional key bindings. Pure reads of the input state.

use super::ModalEngine;
use core_state::MotionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Equal,
    NotEqual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextQuery {
    /// `vi_action`: the pending action equals the operand.
    Action(String),
    /// `vi_has_action`
    HasAction(bool),
    /// `vi_motion_mode`; `None` holds an operand that names no mode.
    MotionMode(Option<MotionMode>),
    /// `vi_has_repeat_digit`: the digit sequence the next digit would extend is non-empty.
    HasRepeatDigit(bool),
}

impl ContextQuery {
    /// Build a query from a binding's context key and string operand. Unknown
    /// keys yield `None` so another layer can answer them.
    pub fn parse(key: &str, operand: &str) -> Option<Self> {
        let flag = operand == "true";
        Some(match key {
            "vi_action" => ContextQuery::Action(operand.to_string()),
            "vi_has_action" => ContextQuery::HasAction(flag),
            "vi_motion_mode" => ContextQuery::MotionMode(operand.parse().ok()),
            "vi_has_repeat_digit" => ContextQuery::HasRepeatDigit(flag),
            _ => return None,
        })
    }
}

impl ModalEngine {
    /// Evaluate a context query. `Action` answers `None` while no action is
    /// pending, which leaves the binding undecided.
    pub fn query_context(&self, query: &ContextQuery, op: QueryOperator) -> Option<bool> {
        let input = &self.input;
        let matched = match query {
            ContextQuery::Action(name) => input.action_name()? == name.as_str(),
            ContextQuery::HasAction(v) => input.has_action() == *v,
            ContextQuery::MotionMode(mode) => Some(input.motion_mode) == *mode,
            ContextQuery::HasRepeatDigit(v) => input.pending_digits().is_empty() != *v,
        };
        Some(match op {
            QueryOperator::Equal => matched,
            QueryOperator::NotEqual => !matched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vi_view;
    use core_state::CommandArgs;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_known_keys() {
        assert_eq!(
            ContextQuery::parse("vi_action", "vi_delete"),
            Some(ContextQuery::Action("vi_delete".into()))
        );
        assert_eq!(
            ContextQuery::parse("vi_motion_mode", "line"),
            Some(ContextQuery::MotionMode(Some(MotionMode::Line)))
        );
        assert_eq!(
            ContextQuery::parse("vi_motion_mode", "bogus"),
            Some(ContextQuery::MotionMode(None))
        );
        assert_eq!(ContextQuery::parse("selector", "x"), None);
    }

    #[test]
    fn action_queries() {
        let mut engine = ModalEngine::new();
        let mut view = vi_view("t", "abc");
        let q = ContextQuery::Action("vi_delete".into());
        assert_eq!(engine.query_context(&q, QueryOperator::Equal), None);
        assert_eq!(
            engine.query_context(&ContextQuery::HasAction(false), QueryOperator::Equal),
            Some(true)
        );
        engine
            .set_action(&mut view, "vi_delete", CommandArgs::new(), None, None)
            .unwrap();
        assert_eq!(engine.query_context(&q, QueryOperator::Equal), Some(true));
        assert_eq!(engine.query_context(&q, QueryOperator::NotEqual), Some(false));
        assert_eq!(
            engine.query_context(&ContextQuery::HasAction(true), QueryOperator::Equal),
            Some(true)
        );
    }

    #[test]
    fn repeat_digit_query_follows_pending_sequence() {
        let mut engine = ModalEngine::new();
        let mut view = vi_view("t", "abc");
        let q = ContextQuery::HasRepeatDigit(true);
        assert_eq!(engine.query_context(&q, QueryOperator::Equal), Some(false));
        engine.push_repeat_digit(&mut view, '2');
        assert_eq!(engine.query_context(&q, QueryOperator::Equal), Some(true));
        engine
            .set_action(&mut view, "vi_delete", CommandArgs::new(), None, None)
            .unwrap();
        // prefix digits no longer count once an action is pending
        assert_eq!(engine.query_context(&q, QueryOperator::Equal), Some(false));
        engine.push_repeat_digit(&mut view, '3');
        assert_eq!(engine.query_context(&q, QueryOperator::Equal), Some(true));
    }

    #[test]
    fn queries_do_not_mutate() {
        let mut engine = ModalEngine::new();
        let mut view = vi_view("t", "abc");
        engine.set_motion_mode(&mut view, "auto_line");
        let before = engine.input().clone();
        let q = ContextQuery::MotionMode(Some(MotionMode::AutoLine));
        assert_eq!(engine.query_context(&q, QueryOperator::Equal), Some(true));
        assert_eq!(
            engine.query_context(&ContextQuery::MotionMode(None), QueryOperator::NotEqual),
            Some(true)
        );
        assert_eq!(engine.input(), &before);
    }
}
