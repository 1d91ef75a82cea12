//! Hot-seat terminal transport.
//!
//! Everything is printed to one writer. Input lines are read by a background
//! task and routed per member: `name: text` goes to that member, and an
//! unprefixed line goes to the member being waited on when there is exactly
//! one.

use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::grammar::is_affirmative;
use crate::messenger::{
    Confirmation, MessageHandle, Messenger, MessengerError, ReactionReply, Reply,
};
use crate::{Member, PlayerId};

type Inbox = Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<String>>>;

/// Members currently being waited on, shared with the reader task.
type Awaiting = Arc<Mutex<Vec<PlayerId>>>;

/// Removes a member from the waiting list when the wait ends or is dropped.
struct AwaitGuard {
    awaiting: Awaiting,
    id: PlayerId,
}

impl AwaitGuard {
    fn new(awaiting: &Awaiting, id: &str) -> Self {
        awaiting
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(id.to_string());
        Self {
            awaiting: Arc::clone(awaiting),
            id: id.to_string(),
        }
    }
}

impl Drop for AwaitGuard {
    fn drop(&mut self) {
        let mut awaiting = self.awaiting.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pos) = awaiting.iter().position(|id| *id == self.id) {
            awaiting.remove(pos);
        }
    }
}

/// Terminal messenger for local two-player matches.
pub struct ConsoleMessenger {
    inboxes: HashMap<PlayerId, Inbox>,
    awaiting: Awaiting,
    next_handle: AtomicU64,
    out: Mutex<Box<dyn Write + Send>>,
    reader: JoinHandle<()>,
}

impl std::fmt::Debug for ConsoleMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleMessenger")
            .field("members", &self.inboxes.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ConsoleMessenger {
    /// Reads stdin and prints to stdout.
    #[instrument(skip(members))]
    pub fn stdio(members: &[Member]) -> Self {
        Self::from_reader(
            BufReader::new(tokio::io::stdin()),
            members,
            Box::new(std::io::stdout()),
        )
    }

    /// Reads lines from `reader` and prints to `out`. Must be called inside a
    /// tokio runtime.
    #[instrument(skip_all, fields(members = members.len()))]
    pub fn from_reader<R>(reader: R, members: &[Member], out: Box<dyn Write + Send>) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let mut inboxes = HashMap::new();
        let mut routes = HashMap::new();
        for member in members {
            let (tx, rx) = mpsc::unbounded_channel();
            inboxes.insert(member.id().clone(), Arc::new(tokio::sync::Mutex::new(rx)));
            routes.insert(member.name().to_lowercase(), (member.id().clone(), tx.clone()));
            routes.insert(member.id().to_lowercase(), (member.id().clone(), tx));
        }
        let awaiting: Awaiting = Arc::default();
        let reader = tokio::spawn(route_lines(reader, routes, Arc::clone(&awaiting)));
        info!("Console messenger ready");
        Self {
            inboxes,
            awaiting,
            next_handle: AtomicU64::new(1),
            out: Mutex::new(out),
            reader,
        }
    }

    fn handle(&self) -> MessageHandle {
        MessageHandle(self.next_handle.fetch_add(1, Ordering::Relaxed))
    }

    fn print(&self, text: &str) -> Result<(), MessengerError> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }

    fn inbox(&self, member: &Member) -> Result<Inbox, MessengerError> {
        self.inboxes
            .get(member.id())
            .cloned()
            .ok_or_else(|| MessengerError::new(format!("{} is not at this console", member)))
    }

    /// Next line for `member` before `deadline`; `None` on timeout.
    async fn next_line(
        &self,
        member: &Member,
        deadline: tokio::time::Instant,
    ) -> Result<Option<String>, MessengerError> {
        let inbox = self.inbox(member)?;
        let _guard = AwaitGuard::new(&self.awaiting, member.id());
        let mut rx = inbox.lock().await;
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Ok(Some(line)) => Ok(Some(line)),
            Ok(None) => Err(MessengerError::new("Console input closed")),
            Err(_) => Ok(None),
        }
    }
}

impl Drop for ConsoleMessenger {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

type Routes = HashMap<String, (PlayerId, mpsc::UnboundedSender<String>)>;

async fn route_lines<R>(reader: R, routes: Routes, awaiting: Awaiting)
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Console read failed");
                break;
            }
        };
        let addressed = line.split_once(':').and_then(|(name, text)| {
            routes
                .get(&name.trim().to_lowercase())
                .map(|(_, tx)| (tx, text.trim().to_string()))
        });
        let routed = match addressed {
            Some((tx, text)) => tx.send(text).is_ok(),
            None => {
                let waiting = awaiting.lock().unwrap_or_else(|e| e.into_inner()).clone();
                match waiting.as_slice() {
                    [only] => routes
                        .values()
                        .find(|(id, _)| id == only)
                        .is_some_and(|(_, tx)| tx.send(line.trim().to_string()).is_ok()),
                    _ => false,
                }
            }
        };
        if !routed {
            warn!(%line, "Line not routed; prefix it with a player name");
        }
    }
    debug!("Console input finished");
}

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send_notice(&self, text: &str) -> Result<MessageHandle, MessengerError> {
        self.print(text)?;
        Ok(self.handle())
    }

    async fn send_board(&self, rendering: &str) -> Result<MessageHandle, MessengerError> {
        self.print(rendering)?;
        Ok(self.handle())
    }

    async fn update_board(&self, _handle: MessageHandle, rendering: &str) -> Result<(), MessengerError> {
        self.print(rendering)
    }

    async fn send_prompt(&self, text: &str) -> Result<MessageHandle, MessengerError> {
        self.print(&format!("> {text}"))?;
        Ok(self.handle())
    }

    async fn update_prompt(&self, _handle: MessageHandle, text: &str) -> Result<(), MessengerError> {
        self.print(&format!("> {text}"))
    }

    #[instrument(skip(self), fields(player_id = %from.id()))]
    async fn await_input(&self, from: &Member, timeout: Duration) -> Result<Reply, MessengerError> {
        let deadline = tokio::time::Instant::now() + timeout;
        Ok(match self.next_line(from, deadline).await? {
            Some(text) => Reply::Message(text),
            None => Reply::TimedOut,
        })
    }

    async fn add_reactions(&self, _handle: MessageHandle, glyphs: &[&str]) -> Result<(), MessengerError> {
        self.print(&format!("[{}]", glyphs.join(" ")))
    }

    #[instrument(skip(self, glyphs), fields(player_id = %from.id()))]
    async fn await_reaction(
        &self,
        from: &Member,
        _on: MessageHandle,
        glyphs: &[&str],
        timeout: Duration,
    ) -> Result<ReactionReply, MessengerError> {
        let deadline = tokio::time::Instant::now() + timeout;
        while let Some(text) = self.next_line(from, deadline).await? {
            let text = text.trim();
            let picked = glyphs.iter().position(|g| *g == text).or_else(|| {
                text.parse::<usize>()
                    .ok()
                    .filter(|n| (1..=glyphs.len()).contains(n))
                    .map(|n| n - 1)
            });
            match picked {
                Some(index) => return Ok(ReactionReply::Picked(index)),
                None => self.print(&format!("{from}: pick one of {}", glyphs.join(" ")))?,
            }
        }
        Ok(ReactionReply::TimedOut)
    }

    #[instrument(skip(self, prompt), fields(player_id = %with.id()))]
    async fn confirm(
        &self,
        with: &Member,
        prompt: &str,
        timeout: Duration,
    ) -> Result<Confirmation, MessengerError> {
        self.print(&format!("? {with}: {prompt}"))?;
        Ok(match self.await_input(with, timeout).await? {
            Reply::Message(text) if is_affirmative(&text) => Confirmation::Accepted,
            Reply::Message(_) => Confirmation::Declined,
            Reply::TimedOut => Confirmation::TimedOut,
        })
    }

    async fn flush(&self, _since: MessageHandle) -> Result<(), MessengerError> {
        self.print("----------------")
    }

    async fn send_private(&self, to: &Member, text: &str) -> Result<MessageHandle, MessengerError> {
        self.print(&format!("[to {to}]\n{text}"))?;
        Ok(self.handle())
    }

    async fn update_private(
        &self,
        to: &Member,
        _handle: MessageHandle,
        text: &str,
    ) -> Result<(), MessengerError> {
        self.print(&format!("[to {to}]\n{text}"))
    }
}
