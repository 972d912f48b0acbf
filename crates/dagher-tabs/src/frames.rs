//! Per-frame task queue.
//!
//! Stands in for the browser's animation-frame callbacks. Tasks queued during
//! a frame run on the next one, which is what separates the two stages of a
//! focus-then-scroll navigation.

use std::collections::HashMap;

use dagher_dom::NodeId;

/// Identifies one focus-and-scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// Stage one: focus `target` without scrolling.
    Focus {
        group: NodeId,
        target: NodeId,
        ticket: Ticket,
    },
    /// Stage two: smoothly scroll `target` to the start of its container.
    Scroll {
        group: NodeId,
        target: NodeId,
        ticket: Ticket,
    },
}

/// Queue of frame tasks plus the latest navigation of every group.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    queue: Vec<FrameTask>,
    latest: HashMap<NodeId, Ticket>,
    next_ticket: u64,
}

impl FrameScheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a focus-then-scroll of `target` on behalf of `group`.
    ///
    /// The new request supersedes any earlier one from the same group whose
    /// scroll stage has not run yet.
    pub fn focus_and_scroll(&mut self, group: NodeId, target: NodeId) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.latest.insert(group, ticket);
        self.request(FrameTask::Focus {
            group,
            target,
            ticket,
        });
        ticket
    }

    /// Queue a task for the next frame.
    pub fn request(&mut self, task: FrameTask) {
        tracing::trace!(?task, "Frame task requested");
        self.queue.push(task);
    }

    /// Take the tasks due in the frame about to run.
    ///
    /// Tasks requested while these run land in the following frame.
    pub fn take_frame(&mut self) -> Vec<FrameTask> {
        std::mem::take(&mut self.queue)
    }

    /// Whether `ticket` is still the latest request of `group`.
    #[must_use]
    pub fn is_current(&self, group: NodeId, ticket: Ticket) -> bool {
        self.latest.get(&group) == Some(&ticket)
    }

    /// Drop queued work and the navigation record of `group`.
    pub fn cancel_group(&mut self, group: NodeId) {
        self.latest.remove(&group);
        self.queue.retain(|task| match task {
            FrameTask::Focus { group: g, .. } | FrameTask::Scroll { group: g, .. } => *g != group,
        });
    }

    /// Number of tasks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether no task is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use dagher_dom::Document;
    use pretty_assertions::assert_eq;

    use super::*;

    fn nodes() -> (NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        (
            doc.create_element("dagher-tab-group"),
            doc.create_element("button"),
            doc.create_element("button"),
        )
    }

    #[test]
    fn test_focus_and_scroll_queues_focus_stage() {
        let (group, target, _) = nodes();
        let mut frames = FrameScheduler::new();
        let ticket = frames.focus_and_scroll(group, target);

        assert_eq!(frames.pending(), 1);
        assert_eq!(
            frames.take_frame(),
            vec![FrameTask::Focus {
                group,
                target,
                ticket
            }]
        );
        assert!(frames.is_idle());
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let (group, a, b) = nodes();
        let mut frames = FrameScheduler::new();
        let first = frames.focus_and_scroll(group, a);
        let second = frames.focus_and_scroll(group, b);

        assert!(!frames.is_current(group, first));
        assert!(frames.is_current(group, second));
    }

    #[test]
    fn test_cancel_group_drops_tasks() {
        let (group, a, _) = nodes();
        let mut frames = FrameScheduler::new();
        let ticket = frames.focus_and_scroll(group, a);
        frames.cancel_group(group);

        assert!(frames.is_idle());
        assert!(!frames.is_current(group, ticket));
    }
}
