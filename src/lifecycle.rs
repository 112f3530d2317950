//! Start-up and teardown of the interceptor.
//!
//! Starting installs three slots on the pop channel, in this order:
//!
//! 1. **Augment**: stamps each pop with the top of the history stack, or
//!    [`OutgoingFragment::InitialLoad`] for the null-state pop browsers fire on
//!    page load.
//! 2. **Route**: the intercepted pop path, installed as part of the
//!    manager's own start.
//! 3. **Suppress**: stops propagation of a vetoed pop and of the echo of its
//!    compensating push.
//!
//! The order matters. Augmentation must precede the manager's listener, and
//! suppression must follow it so the manager has already consumed the echo
//! by the time later listeners are cut off.

use crate::channel::{ListenerSlot, PopEvent};
use crate::config::StartOptions;
use crate::interceptor::{NavigationInterceptor, PopOutcome};
use crate::intent::OutgoingFragment;
use crate::manager::NavigationManager;
use crate::{debug_log, info_log, trace_log, warn_log};

impl<M: NavigationManager> NavigationInterceptor<M> {
    /// Reset interception state, install the pop slots and start the manager.
    ///
    /// Returns the manager's start result, or `false` if already started.
    pub fn start(&mut self, options: &StartOptions) -> bool {
        if self.started {
            warn_log!("Interceptor already started");
            return false;
        }

        self.history.clear();
        self.pending_suppressions = 0;

        let augment = self.channel.add(ListenerSlot::Augment);
        let route = self.channel.add(ListenerSlot::Route);
        self.started = true;
        let routed = self.manager.start(options);
        let suppress = self.channel.add(ListenerSlot::Suppress);
        self.installed = vec![augment, route, suppress];

        info_log!(
            "Interceptor started at '{}' (push_state: {}, root: '{}')",
            self.manager.current_fragment(),
            options.push_state,
            options.root
        );
        routed
    }

    /// Remove the pop slots and stop the manager.
    ///
    /// Host listeners stay registered. Afterwards `navigate` is refused and
    /// pops only reach host listeners.
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        for id in std::mem::take(&mut self.installed) {
            self.channel.remove(id);
        }
        self.manager.stop();
        self.started = false;
        self.pending_suppressions = 0;
        info_log!("Interceptor stopped");
    }

    /// Stamp the history fragment onto a native pop.
    pub(crate) fn augment_pop(&self, event: &mut PopEvent) {
        event.fragment = match self.history.peek_top() {
            Some(top) => OutgoingFragment::Known(top.to_string()),
            None if event.state.is_none() => OutgoingFragment::InitialLoad,
            None => OutgoingFragment::Unknown,
        };
        trace_log!("Pop stamped with {:?}", event.fragment);
    }

    /// Cut off later listeners for vetoed pops and compensating-push echoes.
    pub(crate) fn suppress_pop(&mut self, event: &mut PopEvent, outcome: &PopOutcome) {
        match outcome {
            PopOutcome::Cancelled { .. } => {
                debug_log!("Suppressing cancelled pop");
                event.stop_propagation();
            }
            PopOutcome::Echo => {
                self.pending_suppressions = self.pending_suppressions.saturating_sub(1);
                debug_log!(
                    "Suppressing compensating echo ({} still pending)",
                    self.pending_suppressions
                );
                event.stop_propagation();
            }
            PopOutcome::Ignored | PopOutcome::Unchanged | PopOutcome::Popped { .. } => {}
        }
    }
}
