//! Interception of router-managed anchors.

use super::router::Router;
use std::sync::Arc;
use waypoint_core::{ClickEvent, Node, ROUTE_BOUND_ATTRIBUTE, ROUTE_LINK_SELECTOR};

impl Router {
    /// Bind every `a[data-route-link]` beneath `roots` to this router.
    ///
    /// A click calls `navigate_to(anchor.pathname, anchor.search, false)` and
    /// suppresses the default navigation. Bound anchors are marked with
    /// `data-route-bound` and skipped on later calls, so calling this again
    /// on the same or an overlapping subtree never adds a second listener.
    ///
    /// Returns the number of anchors bound by this call.
    pub fn set_route_links(self: &Arc<Self>, roots: &[&dyn Node]) -> usize {
        let mut bound = 0;
        for root in roots {
            for anchor in root.query_anchors(ROUTE_LINK_SELECTOR) {
                if anchor.attribute(ROUTE_BOUND_ATTRIBUTE).is_some() {
                    continue;
                }
                anchor.set_attribute(ROUTE_BOUND_ATTRIBUTE, "");

                // Weak on both sides: the anchor owns this listener.
                let router = Arc::downgrade(self);
                let target = Arc::downgrade(&anchor);
                anchor.add_click_listener(Arc::new(move |event: &dyn ClickEvent| {
                    let (Some(router), Some(anchor)) = (router.upgrade(), target.upgrade()) else {
                        return;
                    };
                    event.prevent_default();
                    // Refusals are already reported on the error channel.
                    let _ = router.navigate_to(&anchor.pathname(), &anchor.search(), false);
                }));
                bound += 1;
            }
        }

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(bound, "Route links bound");
        }
        bound
    }
}
