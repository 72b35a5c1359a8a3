//! Tracks which page sections are currently in the viewport.
//!
//! The browser side plugs in through [`ViewportWatcher`]; everything else here
//! is platform independent so the bookkeeping can be exercised natively.

use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::error::{SectionError, WatchError};
use crate::section::Section;

/// Callback handed to a watcher for one section: `true` when it becomes visible.
pub type VisibilityCallback = Rc<dyn Fn(bool)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction at which the platform reports a change. It only
    /// decides when a report arrives; the report's intersecting flag is what
    /// counts.
    pub threshold: f64,
    /// CSS margin applied to the viewport; negative values shrink it.
    pub root_margin: &'static str,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            root_margin: "-50px",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySet {
    visible: BTreeSet<usize>,
    count: usize,
}

impl VisibilitySet {
    /// The hero counts as visible before any observation arrives.
    pub fn new(count: usize) -> Self {
        let mut visible = BTreeSet::new();
        if count > 0 {
            visible.insert(Section::Hero.index());
        }
        Self { visible, count }
    }

    /// Records a visibility change. Returns whether the set changed.
    pub fn apply(&mut self, index: usize, is_visible: bool) -> Result<bool, SectionError> {
        if index >= self.count {
            return Err(SectionError::OutOfRange {
                index,
                count: self.count,
            });
        }
        let changed = if is_visible {
            self.visible.insert(index)
        } else {
            self.visible.remove(&index)
        };
        Ok(changed)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.visible.contains(&index)
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.contains(section.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

impl Default for VisibilitySet {
    fn default() -> Self {
        Self::new(Section::COUNT)
    }
}

/// Platform capability that reports when a region enters or leaves the viewport.
pub trait ViewportWatcher {
    type Target;
    type Handle;

    fn observe(
        &mut self,
        target: &Self::Target,
        options: &ObserverOptions,
        on_change: VisibilityCallback,
    ) -> Result<Self::Handle, WatchError>;

    fn release(&mut self, handle: Self::Handle);
}

/// Fixed-size arena mapping a section index to its observation handle.
#[derive(Debug)]
pub struct SectionRegistry<H> {
    slots: Vec<Option<H>>,
}

impl<H> SectionRegistry<H> {
    pub fn new(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| None).collect(),
        }
    }

    /// Stores `handle` for `index`, handing back whatever was there before.
    pub fn insert(&mut self, index: usize, handle: H) -> Result<Option<H>, SectionError> {
        let count = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SectionError::OutOfRange { index, count })?;
        Ok(slot.replace(handle))
    }

    /// Empties every slot, returning the handles in index order.
    pub fn take_all(&mut self) -> Vec<(usize, H)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.take().map(|h| (i, h)))
            .collect()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Owns one observation per mounted section and forwards changes to a sink
/// until torn down.
pub struct VisibilityTracker<W: ViewportWatcher> {
    watcher: W,
    registry: SectionRegistry<W::Handle>,
    live: Rc<Cell<bool>>,
}

impl<W: ViewportWatcher> VisibilityTracker<W> {
    /// Observes every present target; `targets[i]` is section `i`.
    ///
    /// Sections whose observation fails keep their initial visibility.
    pub fn mount<F>(mut watcher: W, targets: Vec<Option<W::Target>>, on_change: F) -> Self
    where
        F: Fn(usize, bool) + 'static,
    {
        let live = Rc::new(Cell::new(true));
        let on_change: Rc<dyn Fn(usize, bool)> = Rc::new(on_change);
        let options = ObserverOptions::default();
        let mut registry = SectionRegistry::new(targets.len());

        for (index, target) in targets.iter().enumerate() {
            let Some(target) = target else {
                log::debug!("section {index} not mounted, skipping observation");
                continue;
            };
            let callback: VisibilityCallback = {
                let live = live.clone();
                let on_change = on_change.clone();
                Rc::new(move |is_visible| {
                    if live.get() {
                        on_change(index, is_visible);
                    }
                })
            };
            match watcher.observe(target, &options, callback) {
                Ok(handle) => {
                    // one slot per target, so the index is always in range and free
                    let _ = registry.insert(index, handle);
                }
                Err(err) => {
                    log::warn!("section {index} stays at its default visibility: {err}");
                }
            }
        }

        Self {
            watcher,
            registry,
            live,
        }
    }

    pub fn observed(&self) -> usize {
        self.registry.occupied()
    }

    /// Stops forwarding changes and releases every observation.
    ///
    /// Returns how many observations were released; calling it again releases nothing.
    pub fn teardown(&mut self) -> usize {
        self.live.set(false);
        let handles = self.registry.take_all();
        let released = handles.len();
        for (_, handle) in handles {
            self.watcher.release(handle);
        }
        if released > 0 {
            log::debug!("released {released} section observations");
        }
        released
    }
}

impl<W: ViewportWatcher> Drop for VisibilityTracker<W> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use log::Level;

    use super::*;
    use crate::reveal::reveal;
    use crate::test_support::{capture_logs, logged_at};

    #[derive(Default)]
    struct FakeState {
        observed: Vec<(usize, VisibilityCallback)>,
        released: Vec<usize>,
        unsupported: bool,
    }

    /// Keeps callbacks around after release so late events can still be fired.
    #[derive(Clone, Default)]
    struct FakeWatcher {
        state: Rc<RefCell<FakeState>>,
    }

    impl FakeWatcher {
        fn unsupported() -> Self {
            let watcher = Self::default();
            watcher.state.borrow_mut().unsupported = true;
            watcher
        }

        fn fire(&self, target: usize, is_visible: bool) {
            let callbacks = self
                .state
                .borrow()
                .observed
                .iter()
                .filter(|(t, _)| *t == target)
                .map(|(_, cb)| cb.clone())
                .collect::<Vec<_>>();
            for cb in callbacks {
                cb(is_visible);
            }
        }

        fn released(&self) -> Vec<usize> {
            self.state.borrow().released.clone()
        }
    }

    impl ViewportWatcher for FakeWatcher {
        type Target = usize;
        type Handle = usize;

        fn observe(
            &mut self,
            target: &usize,
            options: &ObserverOptions,
            on_change: VisibilityCallback,
        ) -> Result<usize, WatchError> {
            assert_eq!(*options, ObserverOptions::default());
            let mut state = self.state.borrow_mut();
            if state.unsupported {
                return Err(WatchError::Unsupported);
            }
            state.observed.push((*target, on_change));
            Ok(*target)
        }

        fn release(&mut self, handle: usize) {
            self.state.borrow_mut().released.push(handle);
        }
    }

    fn mount_all(watcher: &FakeWatcher) -> (VisibilityTracker<FakeWatcher>, Rc<RefCell<VisibilitySet>>) {
        let set = Rc::new(RefCell::new(VisibilitySet::default()));
        let sink = set.clone();
        let targets = (0..Section::COUNT).map(Some).collect();
        let tracker = VisibilityTracker::mount(watcher.clone(), targets, move |index, visible| {
            sink.borrow_mut()
                .apply(index, visible)
                .expect("tracker only reports mounted sections");
        });
        (tracker, set)
    }

    #[test]
    fn starts_with_only_the_hero() {
        let set = VisibilitySet::default();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0]);
        assert!(VisibilitySet::new(0).is_empty());
    }

    #[test]
    fn default_options_shrink_viewport_and_trigger_at_thirty_percent() {
        let options = ObserverOptions::default();
        assert_eq!(options.threshold, 0.3);
        assert_eq!(options.root_margin, "-50px");
    }

    #[test]
    fn section_reported_below_threshold_stays_visible_while_intersecting() {
        let watcher = FakeWatcher::default();
        let (_tracker, set) = mount_all(&watcher);

        // entering, then reported again on the way out with ~29% still on screen
        watcher.fire(1, true);
        watcher.fire(1, true);
        assert!(set.borrow().contains(1));

        // first report for a section that never reaches the threshold
        watcher.fire(2, true);
        assert!(set.borrow().contains(2));

        watcher.fire(1, false);
        assert!(!set.borrow().contains(1));
    }

    #[test]
    fn apply_rejects_unknown_sections() {
        let mut set = VisibilitySet::default();
        assert_eq!(
            set.apply(3, true),
            Err(SectionError::OutOfRange { index: 3, count: 3 })
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn apply_reports_changes_only() {
        let mut set = VisibilitySet::default();
        assert_eq!(set.apply(0, true), Ok(false));
        assert_eq!(set.apply(2, true), Ok(true));
        assert_eq!(set.apply(2, false), Ok(true));
        assert_eq!(set.apply(2, false), Ok(false));
    }

    #[test]
    fn registry_is_fixed_size() {
        let mut registry = SectionRegistry::new(2);
        assert_eq!(registry.insert(1, "b"), Ok(None));
        assert_eq!(registry.insert(1, "c"), Ok(Some("b")));
        assert!(registry.insert(2, "x").is_err());
        assert_eq!(registry.occupied(), 1);
        assert_eq!(registry.take_all(), vec![(1, "c")]);
        assert_eq!(registry.occupied(), 0);
    }

    #[test]
    fn entering_and_leaving_updates_within_one_callback() {
        let watcher = FakeWatcher::default();
        let (tracker, set) = mount_all(&watcher);
        assert_eq!(tracker.observed(), 3);

        watcher.fire(2, true);
        assert!(set.borrow().contains(2));
        watcher.fire(2, false);
        assert!(!set.borrow().contains(2));
        watcher.fire(0, false);
        assert!(set.borrow().is_empty());
    }

    #[test]
    fn same_frame_changes_are_not_lost() {
        let watcher = FakeWatcher::default();
        let (_tracker, set) = mount_all(&watcher);

        watcher.fire(1, true);
        watcher.fire(2, true);
        watcher.fire(0, false);
        assert_eq!(set.borrow().iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn teardown_releases_once_and_silences_late_events() {
        let watcher = FakeWatcher::default();
        let (mut tracker, set) = mount_all(&watcher);

        assert_eq!(tracker.teardown(), 3);
        watcher.fire(1, true);
        watcher.fire(0, false);
        assert_eq!(*set.borrow(), VisibilitySet::default());

        assert_eq!(tracker.teardown(), 0);
        drop(tracker);
        assert_eq!(watcher.released(), vec![0, 1, 2]);
    }

    #[test]
    fn dropping_the_tracker_releases_observations() {
        let watcher = FakeWatcher::default();
        let (tracker, _set) = mount_all(&watcher);
        drop(tracker);
        assert_eq!(watcher.released(), vec![0, 1, 2]);
    }

    #[test]
    fn missing_sections_are_skipped() {
        let watcher = FakeWatcher::default();
        let tracker = VisibilityTracker::mount(watcher.clone(), vec![Some(0), None, Some(2)], |_, _| {});
        assert_eq!(tracker.observed(), 2);
    }

    #[test]
    fn unsupported_platform_keeps_default_visibility() {
        capture_logs();
        let watcher = FakeWatcher::unsupported();
        let (tracker, set) = mount_all(&watcher);

        assert_eq!(tracker.observed(), 0);
        assert_eq!(*set.borrow(), VisibilitySet::default());
        assert_eq!(logged_at(Level::Warn).len(), Section::COUNT);
    }

    #[test]
    fn about_section_reveals_when_observed() {
        let watcher = FakeWatcher::default();
        let (_tracker, set) = mount_all(&watcher);

        watcher.fire(Section::About.index(), true);
        let set = set.borrow();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 1]);

        let about = reveal(Section::About, set.is_visible(Section::About));
        let contact = reveal(Section::Contact, set.is_visible(Section::Contact));
        assert!(about.class().contains("opacity-100"));
        assert!(contact.class().contains("opacity-0"));
    }
}
