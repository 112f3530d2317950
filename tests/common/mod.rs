//! Test utilities for interception tests
//!
//! Provides a simulated browser history, a recording navigation manager and
//! helpers for recording handler calls.

#![allow(dead_code)]

use navigator_intercept::*;
use std::sync::{Arc, Mutex};

/// Shared log of calls, in order.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

// ============================================================================
// SimulatedBrowser
// ============================================================================

/// Browser session history with a movable pointer.
#[derive(Debug)]
pub struct SimulatedBrowser {
    entries: Vec<String>,
    index: usize,
    /// Pop notifications produced by compensating pushes, not yet dispatched.
    echoes: Vec<PopEvent>,
}

impl SimulatedBrowser {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
            index: 0,
            echoes: Vec::new(),
        }
    }

    pub fn location(&self) -> String {
        self.entries[self.index].clone()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.clone()
    }

    fn push(&mut self, fragment: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(fragment.to_string());
        self.index += 1;
    }

    fn replace(&mut self, fragment: &str) {
        self.entries[self.index] = fragment.to_string();
    }

    /// Move the pointer back and return the native pop the browser fires.
    pub fn back(&mut self) -> PopEvent {
        assert!(self.index > 0, "nothing to go back to");
        self.index -= 1;
        PopEvent::with_state(self.location())
    }

    /// Move the pointer forward and return the native pop the browser fires.
    pub fn forward(&mut self) -> PopEvent {
        assert!(self.index + 1 < self.entries.len(), "nothing to go forward to");
        self.index += 1;
        PopEvent::with_state(self.location())
    }

    pub fn take_echoes(&mut self) -> Vec<PopEvent> {
        std::mem::take(&mut self.echoes)
    }
}

pub type SharedBrowser = Arc<Mutex<SimulatedBrowser>>;

pub fn browser(initial: &str) -> SharedBrowser {
    Arc::new(Mutex::new(SimulatedBrowser::new(initial)))
}

// ============================================================================
// RecordingManager
// ============================================================================

/// Navigation manager backed by a [`SimulatedBrowser`], recording every call.
#[derive(Debug)]
pub struct RecordingManager {
    browser: SharedBrowser,
    fragment: String,
    log: CallLog,
    echoes: usize,
    restoring: bool,
}

impl RecordingManager {
    pub fn new(browser: SharedBrowser, log: CallLog) -> Self {
        Self {
            browser,
            fragment: String::new(),
            log,
            echoes: 1,
            restoring: false,
        }
    }

    /// Number of pop notifications a compensating push produces.
    pub fn with_echoes(mut self, echoes: usize) -> Self {
        self.echoes = echoes;
        self
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

impl NavigationManager for RecordingManager {
    fn start(&mut self, options: &StartOptions) -> bool {
        self.fragment = self.browser.lock().unwrap().location();
        self.record(format!("start:{}", options.root));
        !options.silent
    }

    fn stop(&mut self) {
        self.record("stop".to_string());
    }

    fn handle_pop(&mut self, _event: &PopEvent) -> bool {
        let location = self.browser.lock().unwrap().location();
        if location == self.fragment {
            return false;
        }
        self.record(format!("pop:{location}"));
        self.fragment = location;
        true
    }

    fn navigate(&mut self, fragment: &str, options: &NavigateOptions) -> bool {
        let restoring = std::mem::take(&mut self.restoring);
        if fragment == self.fragment {
            return false;
        }
        self.fragment = fragment.to_string();

        let mut browser = self.browser.lock().unwrap();
        if options.replace {
            browser.replace(fragment);
        } else {
            browser.push(fragment);
        }
        if restoring {
            for _ in 0..self.echoes {
                browser.echoes.push(PopEvent::with_state(fragment));
            }
        }
        drop(browser);

        let label = if restoring { "restore" } else { "push" };
        self.record(format!("{label}:{fragment}"));
        true
    }

    fn current_fragment(&self) -> &str {
        &self.fragment
    }

    fn location(&self) -> String {
        self.browser.lock().unwrap().location()
    }

    fn sync_fragment(&mut self) {
        self.fragment = self.browser.lock().unwrap().location();
        self.restoring = true;
    }

    fn compensating_pop_echoes(&self) -> usize {
        self.echoes
    }
}

// ============================================================================
// Fixture
// ============================================================================

/// A started interceptor over a fresh browser at `initial`.
pub struct Fixture {
    pub browser: SharedBrowser,
    pub manager_log: CallLog,
    pub prompts: CallLog,
    pub registry: HandlerRegistry,
    pub nav: NavigationInterceptor<RecordingManager>,
}

impl Fixture {
    /// Build and start with a confirm prompt that always answers `answer`.
    pub fn started(initial: &str, answer: bool) -> Self {
        Self::with_echoes(initial, answer, 1)
    }

    pub fn with_echoes(initial: &str, answer: bool, echoes: usize) -> Self {
        let mut fixture = Self::unstarted(initial, answer, echoes);
        fixture.nav.start(&StartOptions::default());
        fixture
    }

    pub fn unstarted(initial: &str, answer: bool, echoes: usize) -> Self {
        let browser = browser(initial);
        let manager_log = call_log();
        let prompts = call_log();
        let registry = HandlerRegistry::new();
        let manager =
            RecordingManager::new(browser.clone(), manager_log.clone()).with_echoes(echoes);
        let prompt_log = prompts.clone();
        let nav = NavigationInterceptor::with_config(
            manager,
            registry.clone(),
            move |message: &str| {
                prompt_log.lock().unwrap().push(message.to_string());
                answer
            },
            InterceptorConfig::new().confirm_suffix(""),
        );
        Self {
            browser,
            manager_log,
            prompts,
            registry,
            nav,
        }
    }

    pub fn push(&mut self, fragment: &str) -> NavigationResult {
        self.nav.navigate(fragment, NavigateOptions::new().trigger(true))
    }

    pub fn back(&mut self) -> PopReport {
        let event = self.browser.lock().unwrap().back();
        self.nav.dispatch_pop(event)
    }

    /// Dispatch every queued echo, returning their reports.
    pub fn drain_echoes(&mut self) -> Vec<PopReport> {
        let echoes = self.browser.lock().unwrap().take_echoes();
        echoes
            .into_iter()
            .map(|event| self.nav.dispatch_pop(event))
            .collect()
    }

    pub fn location(&self) -> String {
        self.browser.lock().unwrap().location()
    }

    /// Manager calls, skipping the initial start.
    pub fn manager_calls(&self) -> Vec<String> {
        calls(&self.manager_log)
            .into_iter()
            .filter(|c| !c.starts_with("start:"))
            .collect()
    }
}

/// A before-handler that records its label and returns `message`.
pub fn recording_before(
    label: &'static str,
    log: &CallLog,
    message: Option<&'static str>,
) -> impl BeforeNavigationHandler {
    let log = log.clone();
    before_fn(move |intent| {
        log.lock()
            .unwrap()
            .push(format!("{label}:{}:{}", intent.kind, intent.fragment));
        message.map(str::to_string)
    })
}

/// A post-push handler that records its label and returns `propagation`.
pub fn recording_push(
    label: &'static str,
    log: &CallLog,
    propagation: Propagation,
) -> impl PushHandler {
    let log = log.clone();
    push_fn(move |event| {
        log.lock()
            .unwrap()
            .push(format!("{label}:{}", event.fragment));
        propagation
    })
}
