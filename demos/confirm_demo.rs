//! Confirmation Demo
//!
//! Drives an interceptor over an in-memory browser history from the console.
//! A draft editor objects to leaving while it has unsaved text; the scripted
//! user declines once and accepts the second time.
//!
//! Run with `RUST_LOG=navigator_intercept=debug cargo run --example confirm_demo`.

use navigator_intercept::{
    before_fn, pop_listener_fn, push_fn, HandlerRegistry, NavigateOptions, NavigationInterceptor,
    NavigationManager, PopEvent, Propagation, StartOptions,
};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ============================================================================
// In-memory browser + manager
// ============================================================================

/// Hash-change style manager: every push produces one pop notification.
struct MemoryRouter {
    entries: Vec<String>,
    index: usize,
    fragment: String,
    pending_pops: Vec<PopEvent>,
}

impl MemoryRouter {
    fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
            index: 0,
            fragment: String::new(),
            pending_pops: Vec::new(),
        }
    }

    fn back(&mut self) -> Option<PopEvent> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(PopEvent::with_state(self.entries[self.index].clone()))
    }
}

impl NavigationManager for MemoryRouter {
    fn start(&mut self, _options: &StartOptions) -> bool {
        self.fragment = self.entries[self.index].clone();
        println!("  [router] started at {}", self.fragment);
        true
    }

    fn handle_pop(&mut self, _event: &PopEvent) -> bool {
        let location = self.location();
        if location == self.fragment {
            return false;
        }
        println!("  [router] routed back to {}", location);
        self.fragment = location;
        true
    }

    fn navigate(&mut self, fragment: &str, _options: &NavigateOptions) -> bool {
        if fragment == self.fragment {
            return false;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(fragment.to_string());
        self.index += 1;
        self.fragment = fragment.to_string();
        self.pending_pops.push(PopEvent::with_state(fragment));
        println!("  [router] routed to {}", fragment);
        true
    }

    fn current_fragment(&self) -> &str {
        &self.fragment
    }

    fn location(&self) -> String {
        self.entries[self.index].clone()
    }

    fn sync_fragment(&mut self) {
        self.fragment = self.location();
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    env_logger::init();

    let registry = HandlerRegistry::new();
    let draft_dirty = Arc::new(AtomicBool::new(false));

    let dirty = draft_dirty.clone();
    registry.on_pre_pop(before_fn(move |_| {
        dirty
            .load(Ordering::SeqCst)
            .then(|| "Your draft has not been saved.".to_string())
    }));
    let dirty = draft_dirty.clone();
    registry.on_pre_push(before_fn(move |_| {
        dirty
            .load(Ordering::SeqCst)
            .then(|| "Your draft has not been saved.".to_string())
    }));
    registry.on_post_push(push_fn(|event| {
        println!("  [analytics] page view {}", event.fragment);
        Propagation::Continue
    }));

    // Decline the first prompt, accept every later one.
    let answered = Cell::new(0);
    let confirm = move |message: &str| {
        answered.set(answered.get() + 1);
        let accept = answered.get() > 1;
        println!(
            "  [confirm] {:?} -> {}",
            message,
            if accept { "leave" } else { "stay" }
        );
        accept
    };

    let mut nav = NavigationInterceptor::new(MemoryRouter::new("/inbox"), registry, confirm);
    nav.start(&StartOptions::default());
    nav.on_pop(pop_listener_fn(|event: &mut PopEvent| {
        println!("  [listener] pop to {:?}", event.state);
    }));

    println!("> open the draft editor");
    let result = nav.navigate("/drafts/new", NavigateOptions::new().trigger(true));
    println!("  {}", result);
    flush_pops(&mut nav);

    draft_dirty.store(true, Ordering::SeqCst);

    println!("> press back with unsaved text");
    if let Some(event) = nav.manager_mut().back() {
        let report = nav.dispatch_pop(event);
        println!("  {:?}", report.outcome);
    }
    flush_pops(&mut nav);
    println!("  still at {}", nav.manager().current_fragment());

    println!("> press back again");
    if let Some(event) = nav.manager_mut().back() {
        let report = nav.dispatch_pop(event);
        println!("  {:?}", report.outcome);
    }
    println!("  now at {}", nav.manager().current_fragment());
}

/// Deliver the pop notifications the router produced while navigating.
fn flush_pops(nav: &mut NavigationInterceptor<MemoryRouter>) {
    let pops = std::mem::take(&mut nav.manager_mut().pending_pops);
    for event in pops {
        let report = nav.dispatch_pop(event);
        if report.suppressed {
            println!("  [interceptor] suppressed {:?}", report.outcome);
        }
    }
}
