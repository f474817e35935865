//! Nesting state carried through one build pass.

use super::table::TableCollector;
use crate::ir::nodes::ListMarker;
use std::collections::BTreeMap;

/// Bullet symbols, cycled by list depth.
pub const BULLETS: [char; 4] = ['•', '◦', '▪', '▸'];

/// State for a single conversion. A fresh context is created for every
/// build and is never shared.
#[derive(Debug, Default)]
pub struct ParserContext {
    list_depth: usize,
    /// Ordinal counters, present only for depths that are ordered lists.
    ordinals: BTreeMap<usize, usize>,
    blockquote_depth: usize,
    pub table: TableCollector,
}

impl ParserContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_depth(&self) -> usize {
        self.list_depth
    }

    pub fn open_list(&mut self, ordered: bool) {
        self.list_depth += 1;
        if ordered {
            self.ordinals.insert(self.list_depth, 0);
        }
    }

    /// Close the innermost list. A close with no open list is ignored.
    pub fn close_list(&mut self) {
        if self.list_depth == 0 {
            return;
        }
        self.ordinals.remove(&self.list_depth);
        self.list_depth -= 1;
    }

    /// Advance the ordinal counter when the current list is ordered.
    pub fn start_item(&mut self) {
        if let Some(counter) = self.ordinals.get_mut(&self.list_depth) {
            *counter += 1;
        }
    }

    pub fn ordinal(&self) -> Option<usize> {
        self.ordinals.get(&self.list_depth).copied()
    }

    /// Marker for an item at the current depth.
    pub fn current_marker(&self) -> ListMarker {
        match self.ordinal() {
            Some(n) => ListMarker::Ordinal(n),
            None => {
                let depth = self.list_depth.max(1);
                ListMarker::Bullet(BULLETS[(depth - 1) % BULLETS.len()])
            }
        }
    }

    pub fn enter_blockquote(&mut self) {
        self.blockquote_depth += 1;
    }

    pub fn leave_blockquote(&mut self) {
        self.blockquote_depth = self.blockquote_depth.saturating_sub(1);
    }

    /// Nested quotes render the same as a single level.
    pub fn in_blockquote(&self) -> bool {
        self.blockquote_depth > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_count_items_and_restart_per_list() {
        let mut ctx = ParserContext::new();
        ctx.open_list(true);
        let mut seen = Vec::new();
        for _ in 0..3 {
            ctx.start_item();
            seen.push(ctx.current_marker());
        }
        assert_eq!(
            seen,
            vec![
                ListMarker::Ordinal(1),
                ListMarker::Ordinal(2),
                ListMarker::Ordinal(3)
            ]
        );
        ctx.close_list();
        assert_eq!(ctx.ordinal(), None);

        ctx.open_list(true);
        ctx.start_item();
        assert_eq!(ctx.current_marker(), ListMarker::Ordinal(1));
    }

    #[test]
    fn bullets_cycle_by_depth() {
        let mut ctx = ParserContext::new();
        let mut markers = Vec::new();
        for _ in 0..5 {
            ctx.open_list(false);
            markers.push(ctx.current_marker());
        }
        assert_eq!(
            markers,
            vec![
                ListMarker::Bullet('•'),
                ListMarker::Bullet('◦'),
                ListMarker::Bullet('▪'),
                ListMarker::Bullet('▸'),
                ListMarker::Bullet('•'),
            ]
        );
    }

    #[test]
    fn nested_bullet_inside_ordered_keeps_outer_counter() {
        let mut ctx = ParserContext::new();
        ctx.open_list(true);
        ctx.start_item();
        ctx.open_list(false);
        ctx.start_item();
        assert_eq!(ctx.current_marker(), ListMarker::Bullet('◦'));
        assert_eq!(ctx.ordinal(), None);
        ctx.close_list();
        assert_eq!(ctx.ordinal(), Some(1));
        ctx.start_item();
        assert_eq!(ctx.current_marker(), ListMarker::Ordinal(2));
    }

    #[test]
    fn stray_close_is_ignored() {
        let mut ctx = ParserContext::new();
        ctx.close_list();
        assert_eq!(ctx.list_depth(), 0);
        ctx.leave_blockquote();
        assert!(!ctx.in_blockquote());
    }

    #[test]
    fn nested_blockquotes_stay_inside_until_last_close() {
        let mut ctx = ParserContext::new();
        ctx.enter_blockquote();
        ctx.enter_blockquote();
        ctx.leave_blockquote();
        assert!(ctx.in_blockquote());
        ctx.leave_blockquote();
        assert!(!ctx.in_blockquote());
    }
}
