use crate::PageTree;

pub const MAX_DOT_COUNT: u8 = 3;

/// Non-breaking space, so the label keeps a fixed width of three characters
/// and the layout around it never jitters.
const PAD: char = '\u{00A0}';

/// Cycles a text label through 0-3 dots to signal "working".
///
/// The counter advances on every tick and resets to 0 instead of passing
/// `MAX_DOT_COUNT`, so after n ticks the label shows `n mod 4` dots.
#[derive(Debug, Default)]
pub struct DotAnimator {
    count: u8,
}

impl DotAnimator {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn advance(&mut self) {
        if self.count >= MAX_DOT_COUNT {
            self.count = 0;
        } else {
            self.count += 1;
        }
    }

    /// The label for the current count: dots padded to `MAX_DOT_COUNT`
    /// characters with non-breaking spaces.
    pub fn label(&self) -> String {
        let mut label = ".".repeat(self.count as usize);
        for _ in self.count..MAX_DOT_COUNT {
            label.push(PAD);
        }
        label
    }

    /// One animation tick: advance the counter, then render the label into
    /// the dot element. The only side effect is the label text.
    pub fn render_tick(&mut self, tree: &impl PageTree, dots_id: &str) {
        self.advance();
        tree.set_text(dots_id, &self.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_counter_renders_only_padding() {
        let animator = DotAnimator::new();
        assert_eq!(animator.count(), 0);
        assert_eq!(animator.label(), "\u{a0}\u{a0}\u{a0}");
    }

    #[test]
    fn label_shows_tick_count_mod_four() {
        let mut animator = DotAnimator::new();
        for n in 1..=12u32 {
            animator.advance();
            let dots = (n % 4) as usize;
            let mut expected = ".".repeat(dots);
            while expected.chars().count() < MAX_DOT_COUNT as usize {
                expected.push('\u{a0}');
            }
            assert_eq!(animator.label(), expected, "after {} ticks", n);
        }
    }

    #[test]
    fn counter_never_leaves_range() {
        let mut animator = DotAnimator::new();
        for _ in 0..20 {
            animator.advance();
            assert!(animator.count() <= MAX_DOT_COUNT);
        }
    }

    #[test]
    fn full_width_label_has_no_padding() {
        let mut animator = DotAnimator::new();
        animator.advance();
        animator.advance();
        animator.advance();
        assert_eq!(animator.label(), "...");
    }
}
