//! Scripted in-memory messenger shared by the integration tests.
//!
//! Every member has a queue of lines. Waiting for input pops the next line;
//! an empty queue or a [`SILENCE`] line answers `TimedOut` at once, so
//! timeouts cost no time.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use versus::{
    Confirmation, MessageHandle, Messenger, MessengerError, ReactionReply, Reply, is_affirmative,
    Member,
};

/// Scripted line standing for one input window passing without a message.
pub const SILENCE: &str = "(silence)";

/// Everything the session sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Notice(String),
    Board(String),
    Prompt(String),
    Private { to: String, text: String },
    Reactions(Vec<String>),
    Confirm { with: String, prompt: String },
    Flush,
}

/// Runs once, just before the next confirmation question is answered.
type ConfirmHook = Box<dyn FnOnce() + Send>;

#[derive(Default)]
pub struct ScriptedMessenger {
    inputs: Mutex<HashMap<String, VecDeque<String>>>,
    events: Mutex<Vec<Event>>,
    next: AtomicU64,
    before_confirm: Mutex<Option<ConfirmHook>>,
}

impl std::fmt::Debug for ScriptedMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedMessenger")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl ScriptedMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends lines `who` will send, in order.
    pub fn script(self, who: &str, lines: &[&str]) -> Self {
        self.inputs
            .lock()
            .unwrap()
            .entry(who.to_string())
            .or_default()
            .extend(lines.iter().map(|l| l.to_string()));
        self
    }

    /// Runs `hook` while the next confirmation question is open.
    pub fn before_confirm(self, hook: impl FnOnce() + Send + 'static) -> Self {
        *self.before_confirm.lock().unwrap() = Some(Box::new(hook));
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notice(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Prompt(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn privates_to(&self, who: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Private { to, text } if to == who => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn saw_notice(&self, needle: &str) -> bool {
        self.notices().iter().any(|n| n.contains(needle))
    }

    pub fn saw_prompt(&self, needle: &str) -> bool {
        self.prompts().iter().any(|p| p.contains(needle))
    }

    /// Lines of `who` not consumed yet.
    pub fn unread(&self, who: &str) -> usize {
        self.inputs.lock().unwrap().get(who).map_or(0, VecDeque::len)
    }

    fn push(&self, event: Event) -> MessageHandle {
        self.events.lock().unwrap().push(event);
        MessageHandle(self.next.fetch_add(1, Ordering::Relaxed))
    }

    fn pop(&self, who: &Member) -> Option<String> {
        self.inputs
            .lock()
            .unwrap()
            .get_mut(who.id())
            .and_then(VecDeque::pop_front)
    }
}

#[async_trait]
impl Messenger for ScriptedMessenger {
    async fn send_notice(&self, text: &str) -> Result<MessageHandle, MessengerError> {
        Ok(self.push(Event::Notice(text.to_string())))
    }

    async fn send_board(&self, rendering: &str) -> Result<MessageHandle, MessengerError> {
        Ok(self.push(Event::Board(rendering.to_string())))
    }

    async fn update_board(&self, _handle: MessageHandle, rendering: &str) -> Result<(), MessengerError> {
        self.push(Event::Board(rendering.to_string()));
        Ok(())
    }

    async fn send_prompt(&self, text: &str) -> Result<MessageHandle, MessengerError> {
        Ok(self.push(Event::Prompt(text.to_string())))
    }

    async fn update_prompt(&self, _handle: MessageHandle, text: &str) -> Result<(), MessengerError> {
        self.push(Event::Prompt(text.to_string()));
        Ok(())
    }

    async fn await_input(&self, from: &Member, _timeout: Duration) -> Result<Reply, MessengerError> {
        Ok(match self.pop(from) {
            Some(text) if text != SILENCE => Reply::Message(text),
            _ => Reply::TimedOut,
        })
    }

    async fn add_reactions(&self, _handle: MessageHandle, glyphs: &[&str]) -> Result<(), MessengerError> {
        self.push(Event::Reactions(glyphs.iter().map(|g| g.to_string()).collect()));
        Ok(())
    }

    async fn await_reaction(
        &self,
        from: &Member,
        _on: MessageHandle,
        glyphs: &[&str],
        _timeout: Duration,
    ) -> Result<ReactionReply, MessengerError> {
        while let Some(text) = self.pop(from) {
            if text == SILENCE {
                break;
            }
            if let Ok(n) = text.trim().parse::<usize>() {
                if (1..=glyphs.len()).contains(&n) {
                    return Ok(ReactionReply::Picked(n - 1));
                }
            }
        }
        Ok(ReactionReply::TimedOut)
    }

    async fn confirm(
        &self,
        with: &Member,
        prompt: &str,
        _timeout: Duration,
    ) -> Result<Confirmation, MessengerError> {
        self.push(Event::Confirm {
            with: with.id().clone(),
            prompt: prompt.to_string(),
        });
        let hook = self.before_confirm.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        Ok(match self.pop(with) {
            Some(text) if is_affirmative(&text) => Confirmation::Accepted,
            Some(_) => Confirmation::Declined,
            None => Confirmation::TimedOut,
        })
    }

    async fn flush(&self, _since: MessageHandle) -> Result<(), MessengerError> {
        self.push(Event::Flush);
        Ok(())
    }

    async fn send_private(&self, to: &Member, text: &str) -> Result<MessageHandle, MessengerError> {
        Ok(self.push(Event::Private {
            to: to.id().clone(),
            text: text.to_string(),
        }))
    }

    async fn update_private(
        &self,
        to: &Member,
        _handle: MessageHandle,
        text: &str,
    ) -> Result<(), MessengerError> {
        self.push(Event::Private {
            to: to.id().clone(),
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Seats `first` in seat one and `second` in seat two.
pub fn players(kind: versus_rules::GameKind, first: &str, second: &str) -> [versus::Player; 2] {
    versus::Player::pair(kind, Member::named(first), Member::named(second))
}
