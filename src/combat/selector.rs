//! Decision sources for choosing an action each turn

use crate::core::config::PolicyConfig;
use crate::core::error::{Result, SkirmishError};
use crate::entity::Entity;
use crate::narration;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Supplies a zero-based action index for `actor` each turn.
///
/// `Ok(None)` means no usable choice was made; the session reports it and
/// the turn is spent. `Err` aborts the session.
pub trait ActionSelector {
    fn choose(&mut self, actor: &Entity, target: &Entity) -> Result<Option<usize>>;
}

/// Uniform random choice among the first `choice_limit` actions
#[derive(Debug, Clone)]
pub struct RandomPolicy<R: Rng> {
    rng: R,
    choice_limit: usize,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R, choice_limit: usize) -> Self {
        Self { rng, choice_limit }
    }

    pub fn from_config(rng: R, config: &PolicyConfig) -> Self {
        Self::new(rng, config.opponent_choice_limit)
    }
}

impl RandomPolicy<ChaCha8Rng> {
    /// Reproducible policy for simulations and tests
    pub fn with_seed(seed: u64, choice_limit: usize) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed), choice_limit)
    }
}

impl<R: Rng> ActionSelector for RandomPolicy<R> {
    fn choose(&mut self, actor: &Entity, _target: &Entity) -> Result<Option<usize>> {
        let available = actor.actions().len().min(self.choice_limit);
        if available == 0 {
            return Ok(None);
        }
        Ok(Some(self.rng.gen_range(0..available)))
    }
}

/// Replays a fixed sequence of choices
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    script: VecDeque<Option<usize>>,
    fallback: Option<usize>,
}

impl ScriptedSelector {
    /// Errors with `InputClosed` once the script runs out
    pub fn new(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: choices.into_iter().map(Some).collect(),
            fallback: None,
        }
    }

    /// Script that may include "no choice" turns
    pub fn from_choices(choices: impl IntoIterator<Item = Option<usize>>) -> Self {
        Self {
            script: choices.into_iter().collect(),
            fallback: None,
        }
    }

    /// Always picks `index`
    pub fn repeat(index: usize) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: Some(index),
        }
    }

    /// Keep picking `index` after the script is exhausted
    pub fn then_repeat(mut self, index: usize) -> Self {
        self.fallback = Some(index);
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ActionSelector for ScriptedSelector {
    fn choose(&mut self, _actor: &Entity, _target: &Entity) -> Result<Option<usize>> {
        match self.script.pop_front() {
            Some(choice) => Ok(choice),
            None => self.fallback.map(Some).ok_or(SkirmishError::InputClosed),
        }
    }
}

/// Interactive choice: prints a 1-based menu and reads one line.
///
/// The entered number is converted to a zero-based index. Anything that
/// is not a positive integer counts as no choice.
pub struct PromptSelector<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ActionSelector for PromptSelector<R, W> {
    fn choose(&mut self, actor: &Entity, target: &Entity) -> Result<Option<usize>> {
        write!(self.output, "{}", narration::action_menu(actor, target))?;
        self.output.flush()?;

        // A line that is not UTF-8 decodes lossily and parses as no choice
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(SkirmishError::InputClosed);
        }
        let line = String::from_utf8_lossy(&raw);

        let choice = parse_menu_choice(&line);
        tracing::debug!(actor = actor.name(), input = line.trim(), ?choice, "menu choice");
        Ok(choice)
    }
}

/// "1" -> Some(0); "0", "-1" or "abc" -> None
pub fn parse_menu_choice(line: &str) -> Option<usize> {
    line.trim().parse::<usize>().ok()?.checked_sub(1)
}
