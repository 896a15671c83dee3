//! Phase sequencer - a small enter/action/exit state machine
//!
//! States are registered under an id and carry three optional hooks. Every hook
//! receives the sequencer itself plus a caller-owned context, so a hook can
//! request further transitions (`goto`, `gosub`, `ret`) while it runs.
//!
//! Two transition styles exist:
//!
//! - [`PhaseSequencer::goto`]: Exit the current state, Enter the target.
//! - [`PhaseSequencer::gosub`] / [`PhaseSequencer::ret`]: push the current state
//!   without running its Exit, run the target's Enter; on return, run the
//!   sub-state's Exit and resume the pushed state without running its Enter.
//!
//! # Example
//!
//! ```
//! use tile_merge_core::sequencer::{PhaseDef, PhaseSequencer};
//!
//! let mut sm: PhaseSequencer<u8, Vec<&'static str>> = PhaseSequencer::new();
//! sm.add_state(0, PhaseDef::new().on_enter(|_, log: &mut Vec<&'static str>| {
//!     log.push("enter idle");
//!     Ok(())
//! }));
//! sm.add_state(1, PhaseDef::new().on_action(|sm, log: &mut Vec<&'static str>| {
//!     log.push("busy");
//!     sm.goto(0, log)
//! }));
//!
//! let mut log = Vec::new();
//! sm.goto(1, &mut log).unwrap();
//! sm.do_action(&mut log).unwrap();
//! assert_eq!(sm.current(), Some(0));
//! assert_eq!(log, vec!["busy", "enter idle"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::error::SequencerError;

/// A state hook. Receives the sequencer and the caller's context.
pub type Hook<S, C> =
    Rc<dyn Fn(&mut PhaseSequencer<S, C>, &mut C) -> Result<(), SequencerError<S>>>;

/// Hook table for one state. Missing hooks are no-ops.
pub struct PhaseDef<S, C> {
    enter: Option<Hook<S, C>>,
    action: Option<Hook<S, C>>,
    exit: Option<Hook<S, C>>,
}

impl<S, C> PhaseDef<S, C> {
    pub fn new() -> Self {
        Self {
            enter: None,
            action: None,
            exit: None,
        }
    }

    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut PhaseSequencer<S, C>, &mut C) -> Result<(), SequencerError<S>> + 'static,
    {
        self.enter = Some(Rc::new(f));
        self
    }

    pub fn on_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut PhaseSequencer<S, C>, &mut C) -> Result<(), SequencerError<S>> + 'static,
    {
        self.action = Some(Rc::new(f));
        self
    }

    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut PhaseSequencer<S, C>, &mut C) -> Result<(), SequencerError<S>> + 'static,
    {
        self.exit = Some(Rc::new(f));
        self
    }
}

impl<S, C> Default for PhaseDef<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C> Clone for PhaseDef<S, C> {
    fn clone(&self) -> Self {
        Self {
            enter: self.enter.clone(),
            action: self.action.clone(),
            exit: self.exit.clone(),
        }
    }
}

impl<S, C> fmt::Debug for PhaseDef<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseDef")
            .field("enter", &self.enter.is_some())
            .field("action", &self.action.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}

#[derive(Clone, Copy)]
enum HookKind {
    Enter,
    Action,
    Exit,
}

/// Enter/action/exit state machine with a gosub/return stack
pub struct PhaseSequencer<S, C> {
    states: HashMap<S, PhaseDef<S, C>>,
    /// None until the first `goto`/`gosub`
    current: Option<S>,
    /// States suspended by `gosub`, innermost last
    stack: Vec<Option<S>>,
}

impl<S, C> PhaseSequencer<S, C>
where
    S: Copy + Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            current: None,
            stack: Vec::new(),
        }
    }

    /// Register a state. Overwrites any previous definition for `id`.
    pub fn add_state(&mut self, id: S, def: PhaseDef<S, C>) {
        self.states.insert(id, def);
    }

    pub fn is_registered(&self, id: S) -> bool {
        self.states.contains_key(&id)
    }

    /// Active state, if any
    pub fn current(&self) -> Option<S> {
        self.current
    }

    /// Number of states suspended by `gosub`
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn hook(&self, id: S, kind: HookKind) -> Option<Hook<S, C>> {
        let def = self.states.get(&id)?;
        match kind {
            HookKind::Enter => def.enter.clone(),
            HookKind::Action => def.action.clone(),
            HookKind::Exit => def.exit.clone(),
        }
    }

    fn run(&mut self, id: S, kind: HookKind, ctx: &mut C) -> Result<(), SequencerError<S>> {
        match self.hook(id, kind) {
            Some(hook) => (*hook)(self, ctx),
            None => Ok(()),
        }
    }

    /// Run the active state's Action hook. No-op without an active state.
    pub fn do_action(&mut self, ctx: &mut C) -> Result<(), SequencerError<S>> {
        match self.current {
            Some(id) => self.run(id, HookKind::Action, ctx),
            None => Ok(()),
        }
    }

    /// Exit the active state (if any) and Enter `id`.
    ///
    /// An unregistered `id` is rejected before any hook runs.
    pub fn goto(&mut self, id: S, ctx: &mut C) -> Result<(), SequencerError<S>> {
        if !self.is_registered(id) {
            return Err(SequencerError::UnknownState(id));
        }

        if let Some(current) = self.current {
            self.run(current, HookKind::Exit, ctx)?;
        }

        self.current = Some(id);
        self.run(id, HookKind::Enter, ctx)
    }

    /// Suspend the active state (its Exit does not run) and Enter `id`.
    pub fn gosub(&mut self, id: S, ctx: &mut C) -> Result<(), SequencerError<S>> {
        if !self.is_registered(id) {
            return Err(SequencerError::UnknownState(id));
        }

        self.stack.push(self.current);
        self.current = Some(id);
        self.run(id, HookKind::Enter, ctx)
    }

    /// Exit the active state and resume the most recently suspended one
    /// without running its Enter hook.
    pub fn ret(&mut self, ctx: &mut C) -> Result<(), SequencerError<S>> {
        if self.stack.is_empty() {
            return Err(SequencerError::EmptyStack);
        }

        if let Some(current) = self.current {
            self.run(current, HookKind::Exit, ctx)?;
        }

        self.current = self.stack.pop().ok_or(SequencerError::EmptyStack)?;
        Ok(())
    }
}

impl<S, C> Default for PhaseSequencer<S, C>
where
    S: Copy + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: fmt::Debug, C> fmt::Debug for PhaseSequencer<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseSequencer")
            .field("states", &self.states.len())
            .field("current", &self.current)
            .field("stack", &self.stack)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Vec<String>;

    fn logging(name: &'static str) -> PhaseDef<u8, Log> {
        PhaseDef::new()
            .on_enter(move |_, log: &mut Log| {
                log.push(format!("enter {name}"));
                Ok(())
            })
            .on_action(move |_, log: &mut Log| {
                log.push(format!("action {name}"));
                Ok(())
            })
            .on_exit(move |_, log: &mut Log| {
                log.push(format!("exit {name}"));
                Ok(())
            })
    }

    #[test]
    fn test_do_action_without_state_is_noop() {
        let mut sm: PhaseSequencer<u8, Log> = PhaseSequencer::new();
        sm.add_state(0, logging("a"));
        let mut log = Log::new();

        sm.do_action(&mut log).unwrap();
        assert!(log.is_empty());
        assert_eq!(sm.current(), None);
    }

    #[test]
    fn test_missing_hooks_are_noops() {
        let mut sm: PhaseSequencer<u8, Log> = PhaseSequencer::new();
        sm.add_state(0, PhaseDef::new());
        sm.add_state(1, PhaseDef::new());
        let mut log = Log::new();

        sm.goto(0, &mut log).unwrap();
        sm.do_action(&mut log).unwrap();
        sm.gosub(1, &mut log).unwrap();
        sm.ret(&mut log).unwrap();
        assert_eq!(sm.current(), Some(0));
    }

    #[test]
    fn test_add_state_last_write_wins() {
        let mut sm: PhaseSequencer<u8, Log> = PhaseSequencer::new();
        sm.add_state(0, logging("old"));
        sm.add_state(0, logging("new"));
        let mut log = Log::new();

        sm.goto(0, &mut log).unwrap();
        assert_eq!(log, vec!["enter new"]);
    }

    #[test]
    fn test_failed_goto_leaves_state_untouched() {
        let mut sm: PhaseSequencer<u8, Log> = PhaseSequencer::new();
        sm.add_state(0, logging("a"));
        let mut log = Log::new();
        sm.goto(0, &mut log).unwrap();
        log.clear();

        assert_eq!(sm.goto(9, &mut log), Err(SequencerError::UnknownState(9)));
        assert_eq!(sm.gosub(9, &mut log), Err(SequencerError::UnknownState(9)));
        assert_eq!(sm.current(), Some(0));
        assert_eq!(sm.depth(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_gosub_from_no_state_returns_to_no_state() {
        let mut sm: PhaseSequencer<u8, Log> = PhaseSequencer::new();
        sm.add_state(1, logging("sub"));
        let mut log = Log::new();

        sm.gosub(1, &mut log).unwrap();
        assert_eq!(sm.depth(), 1);
        sm.ret(&mut log).unwrap();
        assert_eq!(sm.current(), None);
        assert_eq!(log, vec!["enter sub", "exit sub"]);
    }

    #[test]
    fn test_hook_errors_propagate() {
        let mut sm: PhaseSequencer<u8, Log> = PhaseSequencer::new();
        sm.add_state(0, PhaseDef::new().on_enter(|sm, log| sm.goto(42, log)));
        let mut log = Log::new();

        assert_eq!(sm.goto(0, &mut log), Err(SequencerError::UnknownState(42)));
        assert_eq!(sm.current(), Some(0));
    }
}
