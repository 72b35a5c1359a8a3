/// Something that can be brought to the top of the viewport with a smooth scroll.
pub trait ScrollIntoView {
    fn scroll_into_view_smoothly(&self);
}

/// Requests one smooth scroll to `target`. Returns whether a request was made;
/// an unmounted target is a no-op.
pub fn scroll_to<T: ScrollIntoView + ?Sized>(target: Option<&T>) -> bool {
    match target {
        Some(target) => {
            target.scroll_into_view_smoothly();
            true
        }
        None => {
            log::debug!("scroll target not mounted yet");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Default)]
    struct Node {
        requests: Cell<usize>,
    }

    impl ScrollIntoView for Node {
        fn scroll_into_view_smoothly(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    #[test]
    fn mounted_target_gets_exactly_one_request() {
        let node = Node::default();
        assert!(scroll_to(Some(&node)));
        assert_eq!(node.requests.get(), 1);
    }

    #[test]
    fn missing_target_is_a_no_op() {
        assert!(!scroll_to::<Node>(None));
    }
}
