//! Decision logic behind the scroll and visibility effects.

pub fn is_header_scrolled(scroll_y: f64, threshold_px: f64) -> bool {
    scroll_y > threshold_px
}

/// Subscriptions that fire at most once each. An item leaves the set on its
/// first qualifying trigger and is never re-armed.
#[derive(Debug)]
pub struct OneShotSet<T> {
    pending: Vec<T>,
}

impl<T> Default for OneShotSet<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T: PartialEq> OneShotSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when `item` is already waiting.
    pub fn subscribe(&mut self, item: T) -> bool {
        if self.pending.contains(&item) {
            return false;
        }
        self.pending.push(item);
        true
    }

    /// Hands back the subscribed item the first time it intersects.
    pub fn trigger(&mut self, item: &T, is_intersecting: bool) -> Option<T> {
        if !is_intersecting {
            return None;
        }
        let index = self.pending.iter().position(|pending| pending == item)?;
        Some(self.pending.swap_remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[cfg(test)]
    fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// CSS width for a skill bar, from its `data-width` percentage.
pub fn skill_width(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    let parsed = value.parse::<f64>().ok()?;
    parsed.is_finite().then(|| format!("{value}%"))
}

/// Leading integer of a counter's `data-target`, read the way HTML authors
/// expect: `"1200+"` counts to 1200 and `"4.2"` to 4. `None` without digits.
pub fn counter_target(raw: Option<&str>) -> Option<i64> {
    let value = raw?.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Selector an in-page anchor scrolls to; bare `#` links are left alone.
pub fn anchor_selector(href: Option<&str>) -> Option<&str> {
    href.filter(|href| href.starts_with('#') && *href != "#")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterFrame {
    Running(i64),
    Finished(i64),
}

impl CounterFrame {
    pub fn value(self) -> i64 {
        match self {
            Self::Running(value) | Self::Finished(value) => value,
        }
    }
}

/// Frame-paced count from zero up to a target.
///
/// The step is sized so that the count lands in roughly `frames` frames; the
/// final frame always shows the target exactly.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: i64,
    step: i64,
    current: i64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, frames: f64) -> Self {
        let step = (target as f64 / frames.max(1.0)).ceil() as i64;
        Self {
            target,
            step,
            current: 0,
            finished: false,
        }
    }

    #[cfg(test)]
    fn step(&self) -> i64 {
        self.step
    }
}

impl Iterator for CounterAnimation {
    type Item = CounterFrame;

    fn next(&mut self) -> Option<CounterFrame> {
        if self.finished {
            return None;
        }

        self.current = self.current.saturating_add(self.step);
        if self.current >= self.target {
            self.finished = true;
            return Some(CounterFrame::Finished(self.target));
        }

        Some(CounterFrame::Running(self.current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAMES: f64 = 1_800.0 / 16.0;

    #[test]
    fn header_scrolled_only_strictly_past_threshold() {
        for y in [0.0, 30.0, 59.9, 60.0] {
            assert!(!is_header_scrolled(y, 60.0), "y = {y}");
        }
        for y in [60.1, 61.0, 5_000.0] {
            assert!(is_header_scrolled(y, 60.0), "y = {y}");
        }
    }

    #[test]
    fn one_shot_fires_once_per_item() {
        let mut set = OneShotSet::new();
        assert!(set.subscribe("a"));
        assert!(set.subscribe("b"));
        assert!(!set.subscribe("a"));

        assert_eq!(set.trigger(&"a", false), None);
        assert_eq!(set.trigger(&"a", true), Some("a"));
        assert_eq!(set.trigger(&"a", true), None);
        assert_eq!(set.pending(), 1);
    }

    #[test]
    fn one_shot_fires_exactly_once_across_repeated_crossings() {
        let mut set = OneShotSet::new();
        set.subscribe(7_u32);

        let crossings = [false, true, false, true, true];
        let fired = crossings
            .iter()
            .filter(|&&intersecting| set.trigger(&7, intersecting).is_some())
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn never_intersecting_items_stay_pending() {
        let mut set = OneShotSet::new();
        set.subscribe(1_u8);
        for _ in 0..3 {
            assert_eq!(set.trigger(&1, false), None);
        }
        assert_eq!(set.pending(), 1);
    }

    #[test]
    fn counter_for_zero_finishes_on_first_frame() {
        let frames: Vec<_> = CounterAnimation::new(0, FRAMES).collect();
        assert_eq!(frames, vec![CounterFrame::Finished(0)]);
    }

    #[test]
    fn counter_to_hundred_is_monotonic_and_exact() {
        let frames: Vec<_> = CounterAnimation::new(100, FRAMES).collect();
        let (last, running) = frames.split_last().expect("at least one frame");

        assert_eq!(*last, CounterFrame::Finished(100));
        assert!(running
            .iter()
            .all(|frame| matches!(frame, CounterFrame::Running(v) if *v < 100)));
        assert!(frames.windows(2).all(|w| w[0].value() <= w[1].value()));
    }

    #[test]
    fn counter_step_rounds_up() {
        assert_eq!(CounterAnimation::new(100, FRAMES).step(), 1);
        assert_eq!(CounterAnimation::new(1_000, FRAMES).step(), 9);
        let frames = CounterAnimation::new(1_000, FRAMES).count();
        assert_eq!(frames, 112);
    }

    #[test]
    fn counter_for_negative_target_terminates() {
        let frames: Vec<_> = CounterAnimation::new(-250, FRAMES).collect();
        assert_eq!(frames, vec![CounterFrame::Finished(-250)]);
    }

    #[test]
    fn skill_width_keeps_authored_number() {
        assert_eq!(skill_width(Some("85")).as_deref(), Some("85%"));
        assert_eq!(skill_width(Some(" 72.5 ")).as_deref(), Some("72.5%"));
        assert_eq!(skill_width(Some("wide")), None);
        assert_eq!(skill_width(Some("NaN")), None);
        assert_eq!(skill_width(None), None);
    }

    #[test]
    fn counter_target_takes_leading_integer() {
        assert_eq!(counter_target(Some("42")), Some(42));
        assert_eq!(counter_target(Some(" 7")), Some(7));
        assert_eq!(counter_target(Some("4.2")), Some(4));
        assert_eq!(counter_target(Some("1200+")), Some(1200));
        assert_eq!(counter_target(Some("50px")), Some(50));
        assert_eq!(counter_target(Some("-15 days")), Some(-15));
        assert_eq!(counter_target(Some("+3")), Some(3));
    }

    #[test]
    fn counter_target_without_digits_is_rejected() {
        assert_eq!(counter_target(Some("abc")), None);
        assert_eq!(counter_target(Some("-")), None);
        assert_eq!(counter_target(Some("")), None);
        assert_eq!(counter_target(None), None);
    }

    #[test]
    fn one_shot_set_empties_once_every_item_fired() {
        let mut set = OneShotSet::new();
        set.subscribe('x');
        set.subscribe('y');
        set.trigger(&'x', true);
        assert!(!set.is_empty());
        set.trigger(&'y', true);
        assert!(set.is_empty());
    }

    #[test]
    fn anchor_selector_skips_bare_hash() {
        assert_eq!(anchor_selector(Some("#about")), Some("#about"));
        assert_eq!(anchor_selector(Some("#")), None);
        assert_eq!(anchor_selector(Some("projects.html")), None);
        assert_eq!(anchor_selector(None), None);
    }
}
